//! Module implementing validation of stamp configs.

mod sanitize;

pub use self::sanitize::{sanitize_and_validate, sanitize_color, sanitize_text};


use std::fmt;
use std::slice;

use regex::Regex;
use thiserror::Error;

use crate::model::constants::MAX_TEXT_LENGTH;
use crate::model::{FontSize, RawConfig, TemplateId, TextPosition};


lazy_static! {
    static ref HEX_COLOR_RE: Regex = Regex::new("^#[0-9A-Fa-f]{6}$").unwrap();
}


/// Single problem found in a config.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Text cannot be empty")]
    EmptyText,
    #[error("Text must be 50 characters or less")]
    TextTooLong,
    #[error("Invalid template: {0}")]
    Template(String),
    #[error("Invalid font size: {0}")]
    FontSize(String),
    #[error("Invalid text position: {0}")]
    TextPosition(String),
    #[error("Invalid text color format: {0}")]
    TextColor(String),
    #[error("Invalid background color format: {0}")]
    BackgroundColor(String),
}


/// Outcome of validating a config: the ordered list of errors found, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use = "validation result which should be checked"]
pub struct Validation {
    errors: Vec<ValidationError>,
}

impl Validation {
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[inline]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors[..]
    }

    #[inline]
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Human-readable messages of all the errors, in order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    #[inline]
    pub(crate) fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }
}

impl<'v> IntoIterator for &'v Validation {
    type Item = &'v ValidationError;
    type IntoIter = slice::Iter<'v, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        if self.is_valid() {
            return write!(fmt, "valid");
        }
        write!(fmt, "{}", self.messages().join("; "))
    }
}


/// Validate an untyped config.
///
/// Only the fields that are present are checked.
pub fn validate(config: &RawConfig) -> Validation {
    let mut result = Validation::default();

    if let Some(ref text) = config.text {
        check_text(text, &mut result);
    }
    if let Some(ref template) = config.template {
        if template.parse::<TemplateId>().is_err() {
            result.push(ValidationError::Template(template.clone()));
        }
    }
    if let Some(ref size) = config.font_size {
        if size.parse::<FontSize>().is_err() {
            result.push(ValidationError::FontSize(size.clone()));
        }
    }
    if let Some(ref position) = config.text_position {
        if position.parse::<TextPosition>().is_err() {
            result.push(ValidationError::TextPosition(position.clone()));
        }
    }
    if let Some(ref color) = config.text_color {
        if !is_hex_color(color) {
            result.push(ValidationError::TextColor(color.clone()));
        }
    }
    if let Some(ref color) = config.background_color {
        if !is_hex_color(color) {
            result.push(ValidationError::BackgroundColor(color.clone()));
        }
    }

    if !result.is_valid() {
        debug!("Config failed validation: {}", result);
    }
    result
}

/// Check the stamp text, recording any problems.
pub(crate) fn check_text(text: &str, result: &mut Validation) {
    if text.is_empty() {
        result.push(ValidationError::EmptyText);
    } else if text.chars().count() > MAX_TEXT_LENGTH {
        result.push(ValidationError::TextTooLong);
    }
}

/// Whether the string is a color in the full `#RRGGBB` notation.
#[inline]
pub fn is_hex_color(s: &str) -> bool {
    HEX_COLOR_RE.is_match(s)
}
