//! Module implementing the `Config` type.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::model::constants::{DEFAULT_BACKGROUND_COLOR, DEFAULT_FONT_SIZE, DEFAULT_TEMPLATE,
                              DEFAULT_TEXT, DEFAULT_TEXT_COLOR, DEFAULT_TEXT_POSITION,
                              MAX_TEXT_LINES};
use crate::resources::Template;
use crate::validation::{self, Validation};
use super::color::Color;
use super::enums::{FontSize, TemplateId, TextPosition};


/// Complete description of a single LGTM stamp.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Opaque identifier, assigned when the config is persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Text of the stamp. May contain newlines.
    pub text: String,
    pub template: TemplateId,
    pub font_size: FontSize,
    pub text_color: Color,
    pub background_color: Color,
    pub text_position: TextPosition,

    #[serde(default, skip_serializing_if = "Option::is_none",
            with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none",
            with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl Default for Config {
    fn default() -> Self {
        Config{
            id: None,
            text: DEFAULT_TEXT.into(),
            template: DEFAULT_TEMPLATE,
            font_size: DEFAULT_FONT_SIZE,
            text_color: DEFAULT_TEXT_COLOR,
            background_color: DEFAULT_BACKGROUND_COLOR,
            text_position: DEFAULT_TEXT_POSITION,
            created_at: None,
            updated_at: None,
        }
    }
}

impl Config {
    /// Create a default config with given text.
    #[inline]
    pub fn with_text<T: Into<String>>(text: T) -> Self {
        Config{text: text.into(), ..Config::default()}
    }

    /// Create a config from the defaults of given template.
    pub fn from_template(id: TemplateId) -> Self {
        let mut config = Config::default();
        config.set_template(id);
        config
    }
}

impl Config {
    /// The template this config refers to.
    #[inline]
    pub fn template(&self) -> &'static Template {
        self.template.template()
    }

    /// Switch to another template, overwriting the style fields
    /// with that template's defaults.
    pub fn set_template(&mut self, id: TemplateId) {
        let defaults = &id.template().defaults;
        self.template = id;
        self.font_size = defaults.font_size;
        self.text_color = defaults.text_color;
        self.background_color = defaults.background_color;
        self.text_position = defaults.text_position;
    }

    /// Lines of text that will actually be rendered.
    #[inline]
    pub fn lines(&self) -> Vec<&str> {
        split_lines(&self.text)
    }

    /// Check the config for correctness.
    ///
    /// Since every other field is strongly typed, only the text can be invalid.
    pub fn validate(&self) -> Validation {
        let mut result = Validation::default();
        validation::check_text(&self.text, &mut result);
        result
    }

    /// Whether the two configs describe the same stamp,
    /// disregarding the persistence metadata.
    pub fn same_stamp(&self, other: &Config) -> bool {
        self.text == other.text
            && self.template == other.template
            && self.font_size == other.font_size
            && self.text_color == other.text_color
            && self.background_color == other.background_color
            && self.text_position == other.text_position
    }
}


/// Split stamp text into the lines that get rendered.
/// Lines past the limit are dropped.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .take(MAX_TEXT_LINES)
        .collect()
}
