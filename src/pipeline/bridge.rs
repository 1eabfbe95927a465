//! Bridge between external input adapters and the engine.
//!
//! Input adapters never touch the engine directly: they hold a cloneable
//! [`Dispatcher`] and send [`ActionCall`]s over a channel. The engine
//! drains the channel between cycles, so a call made while a cycle is in
//! flight (a follow-up from a side effect, a late async completion) runs
//! strictly after it — total ordering of committed states falls out of
//! the queue.

use crate::pipeline::error::{PipelineError, PipelineResult};
use crate::state::Value;
use crossbeam_channel::Sender;

/// A dispatched invocation of a named action.
#[derive(Debug, Clone)]
pub struct ActionCall {
    pub name: String,
    pub args: Vec<Value>,
}

impl ActionCall {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }
}

/// Cloneable handle for enqueueing dispatches from outside the engine.
#[derive(Clone)]
pub struct Dispatcher {
    tx: Sender<ActionCall>,
}

impl Dispatcher {
    pub(crate) fn new(tx: Sender<ActionCall>) -> Self {
        Self { tx }
    }

    /// Enqueue `action(args)`. The call runs once the engine reaches it
    /// in queue order; this never blocks on a cycle in flight.
    pub fn call(&self, action: impl Into<String>, args: Vec<Value>) -> PipelineResult<()> {
        self.tx
            .send(ActionCall::new(action, args))
            .map_err(|_| PipelineError::ChannelSend)
    }
}
