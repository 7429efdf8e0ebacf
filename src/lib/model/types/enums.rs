//! Module implementing the closed sets of stamp options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// Define a closed, string-named enum together with its textual conversions.
macro_rules! string_enum {
    ($(#[$attr:meta])* pub enum $name:ident : $kind:literal {
        $($(#[$vattr:meta])* $variant:ident => $text:literal,)+
    }) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($(#[$vattr])* $variant,)+
        }

        impl $name {
            /// All the possible values, in their canonical order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Name of the value, as used in configs and links.
            pub fn as_str(&self) -> &'static str {
                match *self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
                write!(fmt, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(UnknownValue::new($kind, s)),
                }
            }
        }
    };
}


string_enum! {
    /// Identifier of one of the predefined stamp templates.
    pub enum TemplateId : "template" {
        Classic => "classic",
        Dark => "dark",
        Minimal => "minimal",
        Vibrant => "vibrant",
        Retro => "retro",
    }
}

string_enum! {
    /// Size of the stamp text.
    pub enum FontSize : "font size" {
        Small => "small",
        Medium => "medium",
        Large => "large",
    }
}

string_enum! {
    /// Vertical placement of the stamp text.
    pub enum TextPosition : "text position" {
        Top => "top",
        Center => "center",
        Bottom => "bottom",
    }
}

string_enum! {
    /// Language of the user interface.
    pub enum Language : "language" {
        En => "en",
        Ja => "ja",
    }
}

string_enum! {
    /// Color theme of the user interface.
    pub enum Theme : "theme" {
        Light => "light",
        Dark => "dark",
    }
}

impl FontSize {
    /// Size of the font in logical pixels.
    pub fn pixels(&self) -> f32 {
        match *self {
            FontSize::Small => 32.0,
            FontSize::Medium => 48.0,
            FontSize::Large => 64.0,
        }
    }
}

impl TextPosition {
    /// Vertical anchor of the text block, as a fraction of image height.
    pub fn fraction(&self) -> f32 {
        match *self {
            TextPosition::Top => 0.25,
            TextPosition::Center => 0.5,
            TextPosition::Bottom => 0.75,
        }
    }
}

impl Default for TemplateId {
    fn default() -> Self { TemplateId::Classic }
}
impl Default for FontSize {
    fn default() -> Self { FontSize::Medium }
}
impl Default for TextPosition {
    fn default() -> Self { TextPosition::Center }
}


/// Error for a string which doesn't name any value of an option enum.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownValue {
    kind: &'static str,
    value: String,
}

impl UnknownValue {
    #[inline]
    pub(crate) fn new<V: Into<String>>(kind: &'static str, value: V) -> Self {
        UnknownValue{kind, value: value.into()}
    }

    /// The string that failed to parse.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}


#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use spectral::prelude::*;
    use super::{FontSize, TemplateId, TextPosition};

    #[test]
    fn names_round_trip() {
        for &id in TemplateId::ALL {
            assert_that!(TemplateId::from_str(id.as_str())).is_ok().is_equal_to(id);
        }
        for &size in FontSize::ALL {
            assert_that!(FontSize::from_str(&size.to_string())).is_ok().is_equal_to(size);
        }
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_that!(TemplateId::from_str("Classic")).is_err();
        assert_that!(TextPosition::from_str("middle")).is_err();
        let err = FontSize::from_str("huge").unwrap_err();
        assert_that!(err.value()).is_equal_to("huge");
        assert_that!(err.to_string()).is_equal_to("unknown font size: huge".to_owned());
    }

    #[test]
    fn render_metrics() {
        assert_that!(FontSize::Small.pixels()).is_equal_to(32.0);
        assert_that!(FontSize::Large.pixels()).is_equal_to(64.0);
        assert_that!(TextPosition::Bottom.fraction()).is_equal_to(0.75);
    }
}
