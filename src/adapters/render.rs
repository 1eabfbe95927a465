//! Render surface seam.
//!
//! A surface receives the before/after pair of the derived view region
//! whenever it changed by reference. How (or whether) it diffs the pair
//! is its own business; the engine guarantees only that an unchanged
//! view never reaches it.

use crate::error::Result;
use crate::state::Value;
use std::io::Write;
use std::sync::Mutex;

/// An external display reconciled against the derived view.
pub trait RenderSurface: Send + Sync {
    fn apply(&self, previous: &Value, current: &Value) -> Result<()>;
}

/// Renders the board as indented text to a writer. Ignores the previous
/// view — a terminal has nothing to reconcile.
pub struct TextRenderer<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }
}

impl<W: Write + Send> RenderSurface for TextRenderer<W> {
    fn apply(&self, _previous: &Value, current: &Value) -> Result<()> {
        let mut out = self.out.lock().expect("renderer poisoned");
        writeln!(out, "{}", render_board(current))?;
        out.flush()?;
        Ok(())
    }
}

/// Plain-text projection of the view region.
pub fn render_board(board: &Value) -> String {
    let mut text = String::new();
    let Some(lanes) = board.as_seq() else {
        return "(empty board)".to_string();
    };
    for lane in lanes.iter() {
        let index = lane.get("lane").and_then(Value::as_int).unwrap_or(-1);
        let marker = if lane.get("target").and_then(Value::as_bool) == Some(true) {
            " *"
        } else {
            ""
        };
        text.push_str(&format!("lane {}{}\n", index, marker));
        let Some(boxes) = lane.get("boxes").and_then(Value::as_seq) else {
            continue;
        };
        for bx in boxes.iter() {
            let title = bx.get("title").and_then(Value::as_str).unwrap_or("?");
            let editing = if bx.get("editing").and_then(Value::as_bool) == Some(true) {
                " [editing]"
            } else {
                ""
            };
            text.push_str(&format!(
                "  [{}] {}{}\n",
                bx.get("id").and_then(Value::as_str).unwrap_or("?"),
                title,
                editing
            ));
            if bx.get("expanded").and_then(Value::as_bool) == Some(false) {
                continue;
            }
            let Some(items) = bx.get("items").and_then(Value::as_seq) else {
                continue;
            };
            for item in items.iter() {
                let title = item.get("title").and_then(Value::as_str).unwrap_or("add item...");
                let editing = if item.get("editing").and_then(Value::as_bool) == Some(true) {
                    " [editing]"
                } else {
                    ""
                };
                text.push_str(&format!("    - {}{}\n", title, editing));
            }
        }
    }
    text
}
