//! Engine assembly for the board editor.
//!
//! `build_engine` is the one place that knows the full wiring: every
//! action, the calculation stage order, both side effects and the
//! startup load hook. Adapters come in from the caller, so tests swap
//! in capturing fakes and the binary swaps in the real ones.

use crate::adapters::decode::ContentDecoder;
use crate::adapters::ids::IdSource;
use crate::adapters::render::RenderSurface;
use crate::adapters::store::BoardStore;
use crate::board::{actions, calculations, effects, model};
use crate::config::EditorConfig;
use crate::pipeline::Engine;
use std::sync::Arc;

/// The adapter set a board engine runs against.
pub struct BoardDeps {
    pub decoder: Arc<dyn ContentDecoder>,
    pub ids: Arc<dyn IdSource>,
    pub surface: Arc<dyn RenderSurface>,
    pub store: Option<Arc<dyn BoardStore>>,
}

/// Assemble a ready-to-start engine for the board editor.
pub fn build_engine(config: &EditorConfig, deps: BoardDeps) -> Engine {
    let mut builder = Engine::builder(model::initial_state(config.lanes))
        .action(actions::add_box())
        .action(actions::start_edit())
        .action(actions::update_edit())
        .action(actions::save_edit())
        .action(actions::cancel_edit())
        .action(actions::target_lane())
        .action(actions::drag_start())
        .action(actions::drop_on_lane())
        .action(actions::expand())
        .action(actions::collapse())
        .action(actions::set_model());

    for stage in calculations::stages(deps.decoder, deps.ids) {
        builder = builder.stage(stage);
    }

    builder = builder.side_effect(effects::patch_surface(deps.surface));

    if let Some(store) = deps.store {
        if config.autosave {
            builder = builder.side_effect(effects::autosave(store.clone()));
        }
        builder = builder.init(move |dispatcher| match store.load() {
            Ok(Some(saved)) => {
                tracing::info!("restoring saved board");
                if let Err(e) = dispatcher.call("set_model", vec![saved]) {
                    tracing::error!("failed to inject saved board: {}", e);
                }
            }
            Ok(None) => tracing::debug!("no saved board found"),
            Err(e) => tracing::warn!("failed to load saved board: {}", e),
        });
    }

    builder.build()
}

/// Convenience for tests and demos: an engine with no persistence.
pub fn build_engine_without_store(
    config: &EditorConfig,
    decoder: Arc<dyn ContentDecoder>,
    ids: Arc<dyn IdSource>,
    surface: Arc<dyn RenderSurface>,
) -> Engine {
    build_engine(
        config,
        BoardDeps {
            decoder,
            ids,
            surface,
            store: None,
        },
    )
}
