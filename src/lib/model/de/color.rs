//! (De)serializer for the Color type.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Visitor};
use serde::ser::{Serialize, Serializer};
use thiserror::Error;

use super::super::Color;


const EXPECTING_MSG: &'static str = "hex color string in the #RRGGBB format";
const HEX_DIGITS: usize = 6;


impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where D: de::Deserializer<'de>
    {
        deserializer.deserialize_str(ColorVisitor)
    }
}

struct ColorVisitor;
impl<'de> Visitor<'de> for ColorVisitor {
    type Value = Color;

    fn expecting(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", EXPECTING_MSG)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        let color = Color::from_str(v).map_err(|e| {
            warn!("Failed to parse color `{}`: {}", v, e);
            E::custom(e)
        })?;
        Ok(color)
    }
}


impl FromStr for Color {
    type Err = ColorParseError;

    /// Parse the color from its `#RRGGBB` notation.
    /// Hex digits may be of either case, but the short `#RGB` form is not accepted.
    fn from_str(v: &str) -> Result<Self, Self::Err> {
        let digits = v.strip_prefix('#').ok_or(ColorParseError::Prefix)?;
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorParseError::Digit(bad));
        }
        if digits.len() != HEX_DIGITS {
            return Err(ColorParseError::Length(digits.len()));
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|_| ColorParseError::Length(digits.len()));
        Ok(Color(channel(0)?, channel(2)?, channel(4)?))
    }
}


/// Error that may occur while parsing the Color.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string doesn't start with the `#` prefix.
    #[error("color must start with `#`")]
    Prefix,
    /// A character other than a hex digit follows the prefix.
    #[error("invalid hex digit `{0}`")]
    Digit(char),
    /// Wrong number of hex digits.
    #[error("expected 6 hex digits, got {0}")]
    Length(usize),
}
