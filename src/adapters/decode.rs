//! Content decoding seam.
//!
//! Items carry a free-form `content` field. A decoder turns raw text
//! into a structured [`Value`]; the decode calculation only ever hands
//! it strings, so already-structured content is never re-parsed.

use crate::error::Result;
use crate::state::Value;

/// Turns an item's raw text content into a structured value.
pub trait ContentDecoder: Send + Sync {
    fn decode(&self, raw: &str) -> Result<Value>;
}

/// JSON-backed decoder. Text that parses as JSON becomes the parsed
/// structure; anything else passes through as the original string, so
/// plain prose is left alone.
#[derive(Default)]
pub struct JsonDecoder;

impl ContentDecoder for JsonDecoder {
    fn decode(&self, raw: &str) -> Result<Value> {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Ok(value),
            Err(_) => Ok(Value::from(raw)),
        }
    }
}
