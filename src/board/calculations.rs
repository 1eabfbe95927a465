//! Derived-state calculations, grouped into stages.
//!
//! Declared stage order matters: decoding runs before the empty-item
//! sweep (a decoded box still counts as changed), and the view rebuild
//! runs last so it sees the cycle's final model. Each stage chains its
//! output into the next; every gate compares against the cycle-start
//! state.

use crate::adapters::decode::ContentDecoder;
use crate::adapters::ids::IdSource;
use crate::board::model::{appended, box_path, create_item, edit_path};
use crate::board::predicates::{boxes_changed, model_changed, trans_changed};
use crate::error::Result;
use crate::pipeline::{any_of, Calculation};
use crate::state::{each, get, map, map_from, map_if, update_with, Path, Segment, Value};
use std::sync::Arc;

/// The board's calculation stages, in declared order.
pub fn stages(
    decoder: Arc<dyn ContentDecoder>,
    ids: Arc<dyn IdSource>,
) -> Vec<Vec<Calculation>> {
    vec![
        vec![decode_items(decoder)],
        vec![add_empty_items(ids)],
        vec![refresh_view()],
    ]
}

/// Replace raw text item content with its decoded structure.
///
/// Only strings reach the decoder; content that is already structured
/// (or null) passes through with its reference intact, so re-running the
/// calculation is a no-op.
pub fn decode_items(decoder: Arc<dyn ContentDecoder>) -> Calculation {
    Calculation::new("decode_items", boxes_changed(), move |state, _previous| {
        let decoder = decoder.clone();
        update_with(
            "model.boxes",
            map(each(update_with(
                "items",
                map(each(update_with(
                    "content",
                    move |content, _item| match content {
                        Some(Value::Str(raw)) => decoder.decode(raw),
                        Some(other) => Ok(other.clone()),
                        None => Ok(Value::Null),
                    },
                ))),
            ))),
        )(state)
    })
}

/// Keep every box ending in one blank item to edit next.
///
/// A box qualifies when it has no items or its last item got a title;
/// everything else passes through untouched.
pub fn add_empty_items(ids: Arc<dyn IdSource>) -> Calculation {
    Calculation::new("add_empty_items", boxes_changed(), move |state, _previous| {
        let ids = ids.clone();
        update_with(
            "model.boxes",
            map_if(
                |bx: &Value, _state: &Value, _seg: &Segment| needs_empty_item(bx),
                move |bx, _state, _seg| {
                    let id = ids.next_id();
                    update_with("items", move |items, _| appended(items, create_item(&id)))(bx)
                },
            ),
        )(state)
    })
}

fn needs_empty_item(bx: &Value) -> bool {
    match bx.get("items").and_then(Value::as_seq) {
        Some(items) => match items.last() {
            None => true,
            Some(last) => matches!(last.get("title"), Some(Value::Str(t)) if !t.is_empty()),
        },
        None => false,
    }
}

/// Rebuild the render representation from the model and the transient
/// interaction state.
pub fn refresh_view() -> Calculation {
    Calculation::new(
        "refresh_view",
        any_of(vec![model_changed(), trans_changed()]),
        |state, _previous| update_with("view.board", map_from("model.layout", lane_view))(state),
    )
}

fn lane_view(lane: &Value, state: &Value, segment: &Segment) -> Result<Value> {
    let index = match segment {
        Segment::Index(i) => *i as i64,
        Segment::Key(_) => -1,
    };
    let target =
        get(state, &Path::parse("trans.target.lane")).and_then(Value::as_int) == Some(index);

    let mut boxes = Vec::new();
    if let Some(ids) = lane.as_seq() {
        for id in ids.iter() {
            if let Some(view) = id.as_str().and_then(|id| box_view(id, state)) {
                boxes.push(view);
            }
        }
    }

    Ok(Value::map([
        ("lane", Value::from(index)),
        ("target", Value::from(target)),
        ("boxes", Value::from(boxes)),
    ]))
}

fn box_view(id: &str, state: &Value) -> Option<Value> {
    let base = box_path(id);
    let bx = get(state, &base)?;
    let cursor = edit_path(state);

    let title_path = base.join("title");
    let editing = cursor.as_ref() == Some(&title_path);
    let title = if editing {
        pending_edit_value(state)
    } else {
        bx.get("title").cloned().unwrap_or(Value::Null)
    };

    let expanded = get(state, &Path::parse("trans.expand").join(id))
        .and_then(Value::as_bool)
        .unwrap_or(true);

    let items_base = base.join("items");
    let mut items = Vec::new();
    if let Some(seq) = bx.get("items").and_then(Value::as_seq) {
        for (index, item) in seq.iter().enumerate() {
            items.push(item_view(item, state, &items_base, index, cursor.as_ref()));
        }
    }

    Some(Value::map([
        ("id", Value::from(id)),
        ("title", title),
        ("editing", Value::from(editing)),
        ("expanded", Value::from(expanded)),
        ("items", Value::from(items)),
    ]))
}

fn item_view(
    item: &Value,
    state: &Value,
    items_base: &Path,
    index: usize,
    cursor: Option<&Path>,
) -> Value {
    let title_path = items_base.join(index).join("title");
    let editing = cursor == Some(&title_path);
    let title = if editing {
        pending_edit_value(state)
    } else {
        item.get("title").cloned().unwrap_or(Value::Null)
    };
    Value::map([
        ("id", item.get("id").cloned().unwrap_or(Value::Null)),
        ("title", title),
        ("editing", Value::from(editing)),
    ])
}

fn pending_edit_value(state: &Value) -> Value {
    get(state, &Path::parse("trans.edit.value"))
        .cloned()
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::decode::JsonDecoder;
    use crate::adapters::ids::SequentialIds;
    use crate::board::model::{create_box, initial_state};
    use crate::state::update;

    fn state_with_box(items: Vec<Value>) -> Value {
        let state = initial_state(2);
        let mut bx = create_box("b1");
        bx = update("items", Value::from(items))(&bx).unwrap();
        let state = update(box_path("b1"), bx)(&state).unwrap();
        update_with("model.layout.0", |lane, _| {
            appended(lane, Value::from("b1"))
        })(&state)
        .unwrap()
    }

    fn item(id: &str, title: Option<&str>, content: Value) -> Value {
        Value::map([
            ("id", Value::from(id)),
            (
                "title",
                title.map(Value::from).unwrap_or(Value::Null),
            ),
            ("content", content),
        ])
    }

    fn run(calc: &Calculation, state: &Value, previous: &Value) -> Value {
        if (calc.when)(state, previous) {
            (calc.then)(state, previous).unwrap()
        } else {
            state.clone()
        }
    }

    #[test]
    fn test_needs_empty_item() {
        assert!(needs_empty_item(&create_box("b")));
        let untitled = update("items", Value::seq([item("i1", None, Value::Null)]))(
            &create_box("b"),
        )
        .unwrap();
        assert!(!needs_empty_item(&untitled));
        let titled = update("items", Value::seq([item("i1", Some("done"), Value::Null)]))(
            &create_box("b"),
        )
        .unwrap();
        assert!(needs_empty_item(&titled));
    }

    #[test]
    fn test_add_empty_items_appends_to_qualifying_box() {
        let previous = initial_state(2);
        let state = state_with_box(vec![]);
        let calc = add_empty_items(Arc::new(SequentialIds::new("item")));
        let next = run(&calc, &state, &previous);
        let items = get(&next, &Path::parse("model.boxes.b1.items")).unwrap();
        assert_eq!(items.as_seq().unwrap().len(), 1);
        // Running again against the new state: last item is untitled, no append
        let again = run(&calc, &next, &state);
        assert!(again.same(&next));
    }

    #[test]
    fn test_decode_items_parses_and_is_idempotent() {
        let previous = initial_state(2);
        let state = state_with_box(vec![item(
            "i1",
            Some("estimate"),
            Value::from(r#"{"estimate": 3}"#),
        )]);
        let calc = decode_items(Arc::new(JsonDecoder));

        let decoded = run(&calc, &state, &previous);
        let content = get(&decoded, &Path::parse("model.boxes.b1.items.0.content")).unwrap();
        assert_eq!(content.get("estimate").and_then(Value::as_int), Some(3));

        // Re-running over already-structured content changes nothing
        let again = (calc.then)(&decoded, &previous).unwrap();
        assert!(again.same(&decoded));
    }

    #[test]
    fn test_decode_leaves_plain_text_alone() {
        let previous = initial_state(2);
        let state = state_with_box(vec![item("i1", Some("note"), Value::from("plain prose"))]);
        let calc = decode_items(Arc::new(JsonDecoder));
        let next = run(&calc, &state, &previous);
        assert!(next.same(&state));
    }

    #[test]
    fn test_refresh_view_builds_lanes() {
        let previous = initial_state(2);
        let state = state_with_box(vec![item("i1", Some("task"), Value::Null)]);
        let state = update("trans.target.lane", Value::from(1i64))(&state).unwrap();
        let next = run(&refresh_view(), &state, &previous);

        let board = get(&next, &Path::parse("view.board")).unwrap();
        let lanes = board.as_seq().unwrap();
        assert_eq!(lanes.len(), 2);
        assert_eq!(lanes[1].get("target").and_then(Value::as_bool), Some(true));
        let bx = lanes[0].get("boxes").unwrap().idx(0).unwrap();
        assert_eq!(bx.get("title").and_then(Value::as_str), Some("New"));
        assert_eq!(
            bx.get("items").unwrap().idx(0).unwrap().get("title").and_then(Value::as_str),
            Some("task")
        );
    }

    #[test]
    fn test_refresh_view_shows_pending_edit_value() {
        let previous = initial_state(1);
        let state = state_with_box(vec![]);
        let state = update(
            "trans.edit",
            Value::map([
                ("path", Value::from("model.boxes.b1.title")),
                ("value", Value::from("Renaming")),
            ]),
        )(&state)
        .unwrap();
        let next = run(&refresh_view(), &state, &previous);
        let bx = get(&next, &Path::parse("view.board.0.boxes.0")).unwrap();
        assert_eq!(bx.get("editing").and_then(Value::as_bool), Some(true));
        assert_eq!(bx.get("title").and_then(Value::as_str), Some("Renaming"));
    }
}
