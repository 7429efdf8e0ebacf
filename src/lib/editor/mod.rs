//! Module with the editing state of a stamp: undo history and live preview.

mod history;
mod preview;


pub use self::history::History;
pub use self::preview::{Preview, PreviewState, RenderRequest, DEFAULT_DEBOUNCE};
