//! (De)serializers for data model types.

mod color;

pub use self::color::ColorParseError;
