//! Board side effects.
//!
//! Side effects observe the committed (current, previous) pair and talk
//! to the outside world; they never produce state. Both are gated on a
//! single region reference comparison, so a dispatch that only touches
//! transient state never renders twice or saves at all.

use crate::adapters::render::RenderSurface;
use crate::adapters::store::BoardStore;
use crate::board::predicates::{model_changed, view_changed};
use crate::pipeline::SideEffect;
use crate::state::{get, Path, Value};
use std::sync::Arc;

/// Hand the before/after view pair to the render surface.
pub fn patch_surface(surface: Arc<dyn RenderSurface>) -> SideEffect {
    SideEffect::new(
        "patch_surface",
        view_changed(),
        move |state, previous, _dispatcher| {
            let path = Path::parse("view.board");
            let before = get(previous, &path).cloned().unwrap_or(Value::Null);
            let after = get(state, &path).cloned().unwrap_or(Value::Null);
            surface.apply(&before, &after)
        },
    )
}

/// Persist the model region whenever it changed.
pub fn autosave(store: Arc<dyn BoardStore>) -> SideEffect {
    SideEffect::new(
        "autosave",
        model_changed(),
        move |state, _previous, _dispatcher| {
            let model = state.get("model").cloned().unwrap_or(Value::Null);
            store.save(&model)
        },
    )
}
