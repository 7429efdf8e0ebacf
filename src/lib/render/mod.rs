//! Module implementing stamp rendering.

mod background;
mod engine;
mod error;
mod options;
mod output;
mod task;
mod text;


pub use self::engine::{Builder as EngineBuilder,
                       BuildError as EngineBuildError,
                       Engine};
pub use self::error::RenderError;
pub use self::options::{OutputFormat, RenderOptions,
                        DEFAULT_HEIGHT, DEFAULT_QUALITY, DEFAULT_SCALE, DEFAULT_WIDTH};
pub use self::output::RenderOutput;
pub use self::task::MAX_SURFACE_SIZE;
