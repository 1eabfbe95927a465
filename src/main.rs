//! Board Editor - Main Entry Point
//!
//! Interactive terminal front end for the board pipeline: reads line
//! commands from stdin, translates them into dispatches and lets the
//! engine's side effects render and persist.

use anyhow::Context;
use boardflow_rs::adapters::{
    BoardStore, JsonDecoder, JsonFileStore, LineInput, SequentialIds, TextRenderer, Translated,
};
use boardflow_rs::board::{build_engine, BoardDeps};
use boardflow_rs::config::{ensure_app_data_dir, EditorConfig};
use std::io::BufRead;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,boardflow_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting board editor");

    let config = EditorConfig::load_or_default();

    let store: Option<Arc<dyn BoardStore>> = match config.board_file_path() {
        Some(path) => {
            ensure_app_data_dir().context("preparing app data directory")?;
            tracing::info!("Board file: {:?}", path);
            Some(Arc::new(JsonFileStore::new(path)))
        }
        None => {
            tracing::warn!("No data directory available; running without persistence");
            None
        }
    };

    let mut engine = build_engine(
        &config,
        BoardDeps {
            decoder: Arc::new(JsonDecoder),
            ids: Arc::new(SequentialIds::new("item")),
            surface: Arc::new(TextRenderer::new(std::io::stdout())),
            store,
        },
    );

    // Run init hooks (installs the saved board, if any) before taking input.
    engine.start().context("engine startup")?;

    let box_ids = SequentialIds::new("box");
    let input = LineInput::new(&box_ids);
    let stdin = std::io::stdin();

    println!("board editor ready — try: add, edit <path>, type <text>, save, drag <path>, drop <lane>, quit");

    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        match input.translate(&line) {
            Translated::Call(call) => {
                if let Err(e) = engine.dispatch(&call.name, call.args) {
                    tracing::error!("dispatch failed: {}", e);
                }
            }
            Translated::Nothing(Some(reason)) => println!("{}", reason),
            Translated::Nothing(None) => {}
            Translated::Quit => break,
        }
    }

    tracing::info!("Shutting down after {} cycles", engine.cycles());
    Ok(())
}
