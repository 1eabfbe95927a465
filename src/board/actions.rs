//! Board actions — the only way state changes.
//!
//! Every action is a pure transition built from the path-update
//! primitives; none of them performs external effects. Dispatch
//! arguments arrive as plain values from whatever input adapter is
//! installed.

use crate::board::model::{appended, box_path, create_box, edit_path};
use crate::error::{BoardFlowError, Result};
use crate::pipeline::Action;
use crate::state::{chain, get, update, update_with, Path, Segment, Value};

// ── Argument helpers ──

fn arg<'a>(args: &'a [Value], index: usize, action: &str) -> Result<&'a Value> {
    args.get(index).ok_or_else(|| {
        BoardFlowError::InvalidArgument(format!("{}: missing argument {}", action, index))
    })
}

fn str_arg<'a>(args: &'a [Value], index: usize, action: &str) -> Result<&'a str> {
    arg(args, index, action)?.as_str().ok_or_else(|| {
        BoardFlowError::InvalidArgument(format!("{}: argument {} must be a string", action, index))
    })
}

fn lane_arg(args: &[Value], index: usize, action: &str) -> Result<usize> {
    let lane = arg(args, index, action)?.as_int().ok_or_else(|| {
        BoardFlowError::InvalidArgument(format!("{}: argument {} must be a lane index", action, index))
    })?;
    usize::try_from(lane).map_err(|_| {
        BoardFlowError::InvalidArgument(format!("{}: negative lane index {}", action, lane))
    })
}

fn lane_path(lane: usize) -> Path {
    Path::parse("model.layout").join(lane)
}

/// Write the pending edit value to its path, then point the cursor at
/// `path`/`value` (both `Null` to finish editing).
fn save_and_set_edit(state: &Value, path: Value, value: Value) -> Result<Value> {
    let current = edit_path(state).ok_or_else(|| {
        BoardFlowError::InvalidArgument("save_and_set_edit: no edit in progress".to_string())
    })?;
    let pending = get(state, &Path::parse("trans.edit.value"))
        .cloned()
        .unwrap_or(Value::Null);
    chain([
        update(current, pending),
        update(
            "trans.edit",
            Value::map([("path", path), ("value", value)]),
        ),
    ])(state)
}

// ── Actions ──

/// `add_box(id, lane = 0)` — create a box and slot it into a lane.
pub fn add_box() -> Action {
    Action::new("add_box", |args, state| {
        let id = str_arg(args, 0, "add_box")?.to_string();
        let lane = match args.get(1) {
            Some(v) => usize::try_from(v.as_int().unwrap_or(0)).unwrap_or(0),
            None => 0,
        };
        chain([
            update(box_path(&id), create_box(&id)),
            update_with(lane_path(lane), move |lane_val, _| {
                appended(lane_val, Value::from(id.as_str()))
            }),
        ])(state)
    })
}

/// `start_edit(path)` — begin editing the value at `path`. Re-targeting
/// the path already being edited is a no-op; switching away from an edit
/// in progress saves it first.
pub fn start_edit() -> Action {
    Action::new("start_edit", |args, state| {
        let requested = Path::parse(str_arg(args, 0, "start_edit")?);
        let current = edit_path(state);

        if current.as_ref() == Some(&requested) {
            return Ok(state.clone());
        }

        let value = get(state, &requested).cloned().unwrap_or(Value::Null);
        let cursor = Value::from(requested.to_string());
        if current.is_some() {
            save_and_set_edit(state, cursor, value)
        } else {
            update(
                "trans.edit",
                Value::map([("path", cursor), ("value", value)]),
            )(state)
        }
    })
}

/// `update_edit(value)` — replace the pending edit value.
pub fn update_edit() -> Action {
    Action::new("update_edit", |args, state| {
        let value = arg(args, 0, "update_edit")?.clone();
        update("trans.edit.value", value)(state)
    })
}

/// `save_edit` — guarded on an edit being in progress: commit the
/// pending value and clear the cursor.
pub fn save_edit() -> Action {
    Action::guarded(
        "save_edit",
        |state, _args| edit_path(state).is_some(),
        |_args, state| save_and_set_edit(state, Value::Null, Value::Null),
    )
}

/// `cancel_edit` — clear the cursor without saving.
pub fn cancel_edit() -> Action {
    Action::new("cancel_edit", |_args, state| {
        update(
            "trans.edit",
            Value::map([("path", Value::Null), ("value", Value::Null)]),
        )(state)
    })
}

/// `target_lane(lane | null)` — highlight (or clear) the drop target.
pub fn target_lane() -> Action {
    Action::new("target_lane", |args, state| {
        let lane = args.first().cloned().unwrap_or(Value::Null);
        update("trans.target.lane", lane)(state)
    })
}

/// `drag_start(path)` — capture the dragged value into `trans.drag`.
/// Input adapters that own an external transfer buffer can mirror the
/// payload there; the engine keeps its own copy.
pub fn drag_start() -> Action {
    Action::new("drag_start", |args, state| {
        let path = Path::parse(str_arg(args, 0, "drag_start")?);
        let data = get(state, &path).cloned().unwrap_or(Value::Null);
        update(
            "trans.drag",
            Value::map([("path", Value::from(path.to_string())), ("data", data)]),
        )(state)
    })
}

/// `drop_on_lane(lane)` — guarded on the lane existing and a drag
/// payload carrying an id: move the dragged box into the lane and clear
/// the drag state.
pub fn drop_on_lane() -> Action {
    Action::guarded(
        "drop_on_lane",
        |state, args| {
            let Some(lane) = args.first().and_then(Value::as_int) else {
                return false;
            };
            let lane_exists = usize::try_from(lane)
                .ok()
                .and_then(|lane| get(state, &lane_path(lane)))
                .is_some();
            let has_payload = get(state, &Path::parse("trans.drag.data"))
                .and_then(|data| data.get("id"))
                .and_then(Value::as_str)
                .is_some();
            lane_exists && has_payload
        },
        |args, state| {
            let lane = lane_arg(args, 0, "drop_on_lane")?;
            let id = get(state, &Path::parse("trans.drag.data"))
                .and_then(|data| data.get("id"))
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    BoardFlowError::InvalidArgument("drop_on_lane: no drag payload".to_string())
                })?
                .to_string();
            let appended_id = id.clone();
            chain([
                remove_from_layout(id),
                update_with(lane_path(lane), move |lane_val, _| {
                    appended(lane_val, Value::from(appended_id.as_str()))
                }),
                update(
                    "trans.drag",
                    Value::map([("path", Value::Null), ("data", Value::Null)]),
                ),
                update("trans.target.lane", Value::Null),
            ])(state)
        },
    )
}

/// Remove `id` from whichever lane holds it; no-op when absent.
fn remove_from_layout(id: String) -> crate::state::Updater {
    Box::new(move |state: &Value| {
        let Some((lane, position)) = find_box_position(state, &id) else {
            return Ok(state.clone());
        };
        update_with(lane_path(lane), move |lane_val, _| {
            let seq = lane_val.and_then(Value::as_seq).ok_or_else(|| {
                BoardFlowError::NotAContainer {
                    path: "model.layout".to_string(),
                    kind: "missing lane",
                }
            })?;
            let out: Vec<Value> = seq
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != position)
                .map(|(_, v)| v.clone())
                .collect();
            Ok(Value::from(out))
        })(state)
    })
}

fn find_box_position(state: &Value, id: &str) -> Option<(usize, usize)> {
    let layout = get(state, &Path::parse("model.layout"))?.as_seq()?;
    for (lane_index, lane) in layout.iter().enumerate() {
        let lane = lane.as_seq()?;
        if let Some(position) = lane.iter().position(|v| v.as_str() == Some(id)) {
            return Some((lane_index, position));
        }
    }
    None
}

fn toggle_expand(name: &'static str, value: bool) -> Action {
    Action::new(name, move |args, state| {
        let id = str_arg(args, 0, name)?;
        let path = Path::from_segments([
            Segment::from("trans"),
            Segment::from("expand"),
            Segment::from(id),
        ]);
        update(path, Value::from(value))(state)
    })
}

/// `expand(id)` — show a box's items.
pub fn expand() -> Action {
    toggle_expand("expand", true)
}

/// `collapse(id)` — hide a box's items.
pub fn collapse() -> Action {
    toggle_expand("collapse", false)
}

/// `set_model(model)` — replace the whole model region. Used by the
/// startup load hook to inject a previously saved board.
pub fn set_model() -> Action {
    Action::new("set_model", |args, state| {
        let model = arg(args, 0, "set_model")?.clone();
        update("model", model)(state)
    })
}
