//! Adapter seams around the engine core.
//!
//! Every external collaborator lives behind a trait here: content
//! decoding, identifier generation, rendering, persistence and input
//! translation. The engine only ever sees the traits; the binary picks
//! concrete implementations.

pub mod decode;
pub mod ids;
pub mod input;
pub mod render;
pub mod store;

pub use decode::{ContentDecoder, JsonDecoder};
pub use ids::{IdSource, SequentialIds};
pub use input::{LineInput, Translated};
pub use render::{render_board, RenderSurface, TextRenderer};
pub use store::{BoardFile, BoardStore, JsonFileStore, BOARD_FILE_VERSION};
