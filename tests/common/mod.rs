//! Shared helpers for integration tests

#![allow(dead_code)]

use boardflow_rs::adapters::{BoardStore, JsonDecoder, RenderSurface, SequentialIds};
use boardflow_rs::board::{build_engine, BoardDeps};
use boardflow_rs::config::EditorConfig;
use boardflow_rs::error::Result;
use boardflow_rs::pipeline::Engine;
use boardflow_rs::state::Value;
use std::sync::{Arc, Mutex};

/// Render surface that records every (previous, current) pair it is
/// handed, instead of drawing anything.
#[derive(Default)]
pub struct CapturingSurface {
    pub frames: Mutex<Vec<(Value, Value)>>,
}

impl CapturingSurface {
    pub fn frame_count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    pub fn last_current(&self) -> Option<Value> {
        self.frames.lock().unwrap().last().map(|(_, cur)| cur.clone())
    }
}

impl RenderSurface for CapturingSurface {
    fn apply(&self, previous: &Value, current: &Value) -> Result<()> {
        self.frames
            .lock()
            .unwrap()
            .push((previous.clone(), current.clone()));
        Ok(())
    }
}

/// In-memory store recording each save; optionally preloaded with a
/// model to return at startup.
#[derive(Default)]
pub struct MemoryStore {
    pub preload: Option<Value>,
    pub saved: Mutex<Vec<Value>>,
}

impl MemoryStore {
    pub fn preloaded(model: Value) -> Self {
        Self {
            preload: Some(model),
            saved: Mutex::new(Vec::new()),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saved.lock().unwrap().len()
    }

    pub fn last_saved(&self) -> Option<Value> {
        self.saved.lock().unwrap().last().cloned()
    }
}

impl BoardStore for MemoryStore {
    fn save(&self, model: &Value) -> Result<()> {
        self.saved.lock().unwrap().push(model.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Value>> {
        Ok(self.preload.clone())
    }
}

/// Everything a board-engine test usually needs in one place.
pub struct TestRig {
    pub engine: Engine,
    pub surface: Arc<CapturingSurface>,
    pub store: Arc<MemoryStore>,
}

/// A board engine with capturing fakes for rendering and persistence.
pub fn board_rig(lanes: usize, store: MemoryStore) -> TestRig {
    let config = EditorConfig {
        lanes,
        autosave: true,
        board_file: None,
    };
    let surface = Arc::new(CapturingSurface::default());
    let store = Arc::new(store);
    let engine = build_engine(
        &config,
        BoardDeps {
            decoder: Arc::new(JsonDecoder),
            ids: Arc::new(SequentialIds::new("item")),
            surface: surface.clone(),
            store: Some(store.clone()),
        },
    );
    TestRig {
        engine,
        surface,
        store,
    }
}
