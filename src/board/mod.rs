//! The board editor domain, built on the pipeline engine.
//!
//! Boxes live in `model.boxes`, lanes order their ids in `model.layout`,
//! and everything the user is in the middle of doing (editing, dragging,
//! expanding) lives in `trans`. Calculations keep `model` tidy and
//! derive `view.board`; side effects render and persist.

pub mod actions;
pub mod calculations;
pub mod effects;
pub mod model;
pub mod predicates;
pub mod setup;

pub use model::{create_box, create_item, initial_state};
pub use setup::{build_engine, build_engine_without_store, BoardDeps};
