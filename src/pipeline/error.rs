//! Pipeline-specific error types.

use crate::error::BoardFlowError;
use thiserror::Error;

/// Errors that can occur while running a dispatch cycle.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Action '{name}' failed: {source}")]
    Action {
        name: String,
        #[source]
        source: BoardFlowError,
    },

    #[error("Calculation '{name}' failed: {source}")]
    Calculation {
        name: String,
        #[source]
        source: BoardFlowError,
    },

    #[error("Side effect '{name}' failed: {source}")]
    SideEffect {
        name: String,
        #[source]
        source: BoardFlowError,
    },

    #[error("Dispatch channel disconnected")]
    ChannelSend,
}

// Side-effect bodies return the crate error; let them `?` a failed
// dispatch enqueue.
impl From<PipelineError> for BoardFlowError {
    fn from(err: PipelineError) -> Self {
        BoardFlowError::Channel(err.to_string())
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
