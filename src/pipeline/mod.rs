//! Staged state-pipeline engine.
//!
//! Every state transition flows one way through a fixed cycle:
//!
//! ```text
//! dispatch(action, args) ──► action ──► calculation stages ──► commit ──► side effects
//! ```
//!
//! # Design
//!
//! - **Predicate gating** — guarded actions, calculations and side
//!   effects all carry a pure `when` predicate; a false gate skips the
//!   member entirely.
//! - **Reference-equality change detection** — gates compare state
//!   regions with [`crate::state::Value::same`], never deep equality.
//! - **No reentrancy** — `dispatch` holds `&mut Engine`; follow-up calls
//!   from side effects queue through the [`Dispatcher`] channel and run
//!   after the current cycle, preserving a total order of commits.
//! - **Builder construction** — engines are ordinary values assembled by
//!   [`EngineBuilder`]; any number can coexist in one process.

pub mod bridge;
pub mod engine;
pub mod error;
pub mod gate;
pub mod hooks;
pub mod stage;

pub use bridge::{ActionCall, Dispatcher};
pub use engine::{Engine, EngineBuilder};
pub use error::{PipelineError, PipelineResult};
pub use gate::{all_of, any_of, changed, not, ArgGate, Gate};
pub use hooks::{InitHook, InitHooks};
pub use stage::{Action, Calculation, SideEffect};
