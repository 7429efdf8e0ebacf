//! Module defining the data model of a stamp.

pub mod constants;
mod de;
mod types;

pub use self::de::ColorParseError;
pub use self::types::*;
