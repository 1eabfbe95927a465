//! # boardflow-rs: board editor on a staged state pipeline
//!
//! An interactive board editor (boxes arranged in lanes, boxes holding
//! items) whose engineering core is a unidirectional state-management
//! pipeline: one immutable state value, replaced on every dispatch by
//! running the named action and then ordered, predicate-gated
//! calculation stages, with side effects observing the committed result.
//!
//! ## Architecture
//!
//! - **State**: an `Arc`-backed immutable [`state::Value`] tree with
//!   structural sharing; "did X change?" is a reference comparison
//! - **Pipeline**: [`pipeline::Engine`] runs
//!   `action → calculations → commit → side effects` per dispatch,
//!   queueing follow-ups for a total order of commits
//! - **Board domain**: the actions, calculations and side effects of the
//!   editor itself, wired by [`board::build_engine`]
//! - **Adapters**: rendering, persistence, content decoding, id minting
//!   and input translation behind traits in [`adapters`]
//!
//! ## Example
//!
//! ```ignore
//! use boardflow_rs::{
//!     adapters::{JsonDecoder, SequentialIds, TextRenderer},
//!     board::{build_engine_without_store},
//!     config::EditorConfig,
//! };
//! use std::sync::Arc;
//!
//! let config = EditorConfig::default();
//! let mut engine = build_engine_without_store(
//!     &config,
//!     Arc::new(JsonDecoder),
//!     Arc::new(SequentialIds::new("box")),
//!     Arc::new(TextRenderer::new(std::io::stdout())),
//! );
//! engine.start()?;
//! engine.dispatch("add_box", vec!["b1".into(), 0i64.into()])?;
//! ```

pub mod adapters;
pub mod board;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod state;

// Re-export commonly used types
pub use board::{build_engine, build_engine_without_store, BoardDeps};
pub use config::EditorConfig;
pub use error::{BoardFlowError, Result};
pub use pipeline::{Action, Calculation, Dispatcher, Engine, EngineBuilder, SideEffect};
pub use state::{Path, Value};
