//! Module defining the model types.

mod color;
mod config;
mod enums;
mod gradient;
mod patch;
mod preferences;
mod raw;

pub use self::color::Color;
pub use self::config::{split_lines, Config};
pub use self::enums::{FontSize, Language, TemplateId, TextPosition, Theme, UnknownValue};
pub use self::gradient::{Gradient, GradientKind};
pub use self::patch::ConfigPatch;
pub use self::preferences::Preferences;
pub use self::raw::RawConfig;
