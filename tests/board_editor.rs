//! End-to-end board editing flows through the assembled engine.

mod common;

use boardflow_rs::adapters::{BoardStore, JsonFileStore};
use boardflow_rs::pipeline::{Action, Engine};
use boardflow_rs::state::{get, update, Path, Value};
use common::{board_rig, MemoryStore};
use std::sync::Arc;

fn at(state: &Value, path: &str) -> Value {
    get(state, &Path::parse(path)).cloned().unwrap_or(Value::Null)
}

#[test]
fn resetting_a_title_to_its_value_leaves_state_reference_equal() {
    // A minimal engine over a bare item list, no board wiring.
    let initial = Value::map([(
        "items",
        Value::seq([Value::map([
            ("id", Value::from(1i64)),
            ("title", Value::from("x")),
        ])]),
    )]);
    let mut engine = Engine::builder(initial)
        .action(Action::new("set_title", |args, state| {
            let title = args.first().cloned().unwrap_or(Value::Null);
            update("items.0.title", title)(state)
        }))
        .build();

    let before = engine.state().clone();
    engine.dispatch("set_title", vec!["x".into()]).unwrap();
    assert!(engine.state().same(&before));
}

#[test]
fn empty_item_calculation_touches_only_the_qualifying_box() {
    let rig = board_rig(2, MemoryStore::default());
    let mut engine = rig.engine;

    engine.dispatch("add_box", vec!["a".into(), 0i64.into()]).unwrap();
    engine.dispatch("add_box", vec!["b".into(), 1i64.into()]).unwrap();

    // Title box b's blank item so the next boxes change appends another.
    engine
        .dispatch("start_edit", vec!["model.boxes.b.items.0.title".into()])
        .unwrap();
    engine.dispatch("update_edit", vec!["done".into()]).unwrap();

    let before = engine.state().clone();
    engine.dispatch("save_edit", vec![]).unwrap();
    let after = engine.state().clone();

    // Box b grew a fresh blank item; box a passed through untouched.
    assert_eq!(at(&after, "model.boxes.b.items").as_seq().unwrap().len(), 2);
    assert!(!at(&after, "model.boxes").same(&at(&before, "model.boxes")));
    assert!(!at(&after, "model.boxes.b").same(&at(&before, "model.boxes.b")));
    assert!(at(&after, "model.boxes.a").same(&at(&before, "model.boxes.a")));
}

#[test]
fn decoding_is_idempotent_across_cycles() {
    let rig = board_rig(1, MemoryStore::default());
    let mut engine = rig.engine;

    engine.dispatch("add_box", vec!["b1".into(), 0i64.into()]).unwrap();
    engine
        .dispatch("start_edit", vec!["model.boxes.b1.items.0.content".into()])
        .unwrap();
    engine
        .dispatch("update_edit", vec![r#"{"estimate": 5}"#.into()])
        .unwrap();
    engine.dispatch("save_edit", vec![]).unwrap();

    let decoded = at(engine.state(), "model.boxes.b1.items.0.content");
    assert_eq!(decoded.get("estimate").and_then(Value::as_int), Some(5));

    // Another boxes-changing dispatch re-runs the decode stage; the
    // already-structured content keeps its reference.
    engine.dispatch("add_box", vec!["b2".into(), 0i64.into()]).unwrap();
    let redecoded = at(engine.state(), "model.boxes.b1.items.0.content");
    assert!(redecoded.same(&decoded));
}

#[test]
fn titling_the_last_item_keeps_a_blank_item_available() {
    let rig = board_rig(1, MemoryStore::default());
    let mut engine = rig.engine;

    engine.dispatch("add_box", vec!["b1".into(), 0i64.into()]).unwrap();
    assert_eq!(at(engine.state(), "model.boxes.b1.items").as_seq().unwrap().len(), 1);

    for (index, title) in ["first", "second"].iter().enumerate() {
        let path = format!("model.boxes.b1.items.{}.title", index);
        engine.dispatch("start_edit", vec![path.as_str().into()]).unwrap();
        engine.dispatch("update_edit", vec![(*title).into()]).unwrap();
        engine.dispatch("save_edit", vec![]).unwrap();
    }

    let items = at(engine.state(), "model.boxes.b1.items");
    let items = items.as_seq().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].get("title").and_then(Value::as_str), Some("first"));
    assert_eq!(items[1].get("title").and_then(Value::as_str), Some("second"));
    assert!(items[2].get("title").unwrap().is_null());
}

#[test]
fn drag_and_drop_through_the_engine() {
    let rig = board_rig(3, MemoryStore::default());
    let mut engine = rig.engine;

    engine.dispatch("add_box", vec!["b1".into(), 0i64.into()]).unwrap();
    engine.dispatch("add_box", vec!["b2".into(), 0i64.into()]).unwrap();

    engine.dispatch("drag_start", vec!["model.boxes.b1".into()]).unwrap();
    engine.dispatch("target_lane", vec![2i64.into()]).unwrap();
    engine.dispatch("drop_on_lane", vec![2i64.into()]).unwrap();

    let state = engine.state();
    let lane0 = at(state, "model.layout.0");
    let lane2 = at(state, "model.layout.2");
    assert_eq!(lane0.as_seq().unwrap().first().and_then(Value::as_str), Some("b2"));
    assert_eq!(lane2.as_seq().unwrap().first().and_then(Value::as_str), Some("b1"));
    // Drop cleared the transient drag state and the target highlight
    assert!(at(state, "trans.drag.data").is_null());
    assert!(at(state, "trans.target.lane").is_null());
}

#[test]
fn expanded_flag_flows_into_the_view() {
    let rig = board_rig(1, MemoryStore::default());
    let mut engine = rig.engine;

    engine.dispatch("add_box", vec!["b1".into(), 0i64.into()]).unwrap();
    engine.dispatch("collapse", vec!["b1".into()]).unwrap();

    let rendered = rig.surface.last_current().unwrap();
    let bx = rendered.idx(0).unwrap().get("boxes").unwrap().idx(0).unwrap();
    assert_eq!(bx.get("expanded").and_then(Value::as_bool), Some(false));

    engine.dispatch("expand", vec!["b1".into()]).unwrap();
    let rendered = rig.surface.last_current().unwrap();
    let bx = rendered.idx(0).unwrap().get("boxes").unwrap().idx(0).unwrap();
    assert_eq!(bx.get("expanded").and_then(Value::as_bool), Some(true));
}

#[test]
fn autosaved_board_survives_an_engine_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("board.json");

    // First session: create some content, autosave writes the file.
    {
        let config = boardflow_rs::config::EditorConfig {
            lanes: 2,
            autosave: true,
            board_file: Some(path.clone()),
        };
        let store: Arc<dyn BoardStore> = Arc::new(JsonFileStore::new(path.clone()));
        let surface = Arc::new(common::CapturingSurface::default());
        let mut engine = boardflow_rs::board::build_engine(
            &config,
            boardflow_rs::board::BoardDeps {
                decoder: Arc::new(boardflow_rs::adapters::JsonDecoder),
                ids: Arc::new(boardflow_rs::adapters::SequentialIds::new("item")),
                surface,
                store: Some(store),
            },
        );
        engine.start().unwrap();
        engine.dispatch("add_box", vec!["b1".into(), 1i64.into()]).unwrap();
    }
    assert!(path.exists());

    // Second session: the startup hook restores the same model.
    {
        let store: Arc<dyn BoardStore> = Arc::new(JsonFileStore::new(path.clone()));
        let loaded = store.load().unwrap().unwrap();
        assert!(get(&loaded, &Path::parse("boxes.b1")).is_some());

        let rig = board_rig(2, MemoryStore::preloaded(loaded));
        let mut engine = rig.engine;
        engine.start().unwrap();
        assert_eq!(
            at(engine.state(), "model.boxes.b1.id").as_str(),
            Some("b1")
        );
        let lane1 = at(engine.state(), "model.layout.1");
        assert_eq!(lane1.as_seq().unwrap().first().and_then(Value::as_str), Some("b1"));
    }
}
