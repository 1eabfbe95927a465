//! Board state shape and constructors.
//!
//! State is partitioned into three fixed regions, created once and only
//! ever replaced:
//!
//! - `model` — the persisted board: `boxes` (id → box) and `layout`
//!   (lanes of box ids);
//! - `trans` — transient interaction state: the edit cursor, the drop
//!   target, the drag payload and per-box expansion flags;
//! - `view` — the derived render representation, rebuilt by calculation.

use crate::error::{BoardFlowError, Result};
use crate::state::{get, Path, Segment, Value};
use std::sync::Arc;

/// The state every engine starts from.
pub fn initial_state(lanes: usize) -> Value {
    Value::map([
        (
            "model",
            Value::map([
                ("boxes", Value::empty_map()),
                (
                    "layout",
                    Value::seq((0..lanes).map(|_| Value::empty_seq())),
                ),
            ]),
        ),
        (
            "trans",
            Value::map([
                (
                    "edit",
                    Value::map([("path", Value::Null), ("value", Value::Null)]),
                ),
                ("target", Value::map([("lane", Value::Null)])),
                (
                    "drag",
                    Value::map([("path", Value::Null), ("data", Value::Null)]),
                ),
                ("expand", Value::empty_map()),
            ]),
        ),
        ("view", Value::map([("board", Value::Null)])),
    ])
}

/// A fresh box with a placeholder title and no items.
pub fn create_box(id: &str) -> Value {
    Value::map([
        ("id", Value::from(id)),
        ("title", Value::from("New")),
        ("items", Value::empty_seq()),
    ])
}

/// A fresh, untitled item.
pub fn create_item(id: &str) -> Value {
    Value::map([
        ("id", Value::from(id)),
        ("title", Value::Null),
        ("content", Value::Null),
    ])
}

/// Canonical path of a box, matching the parsed dotted spelling.
pub(crate) fn box_path(id: &str) -> Path {
    Path::from_segments([
        Segment::from("model"),
        Segment::from("boxes"),
        Segment::from(id),
    ])
}

/// The edit cursor as a parsed path, if an edit is in progress.
pub(crate) fn edit_path(state: &Value) -> Option<Path> {
    get(state, &Path::parse("trans.edit.path"))
        .and_then(Value::as_str)
        .map(Path::parse)
}

/// A copy of `current` with `item` appended. A missing or null target
/// counts as empty.
pub(crate) fn appended(current: Option<&Value>, item: Value) -> Result<Value> {
    let mut out: Vec<Value> = match current {
        Some(Value::Seq(seq)) => (**seq).clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            return Err(BoardFlowError::NotAContainer {
                path: "<append target>".to_string(),
                kind: other.kind(),
            })
        }
    };
    out.push(item);
    Ok(Value::Seq(Arc::new(out)))
}
