//! Module implementing the untyped form of a config.

use serde::{Deserialize, Serialize};

use crate::validation::{validate, Validation};
use super::config::Config;


/// Config as it arrives from an untrusted source (JSON document, query string),
/// before validation.
///
/// Every field is optional and kept as a string,
/// so that invalid values can be reported rather than rejected outright.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_position: Option<String>,
}

impl RawConfig {
    /// Validate the raw config and convert it into a typed `Config`.
    ///
    /// Absent fields are filled in from `base`.
    pub fn into_config(self, base: &Config) -> Result<Config, Validation> {
        let validation = validate(&self);
        if !validation.is_valid() {
            return Err(validation);
        }

        // Everything that's present has been validated, so it will parse.
        let mut config = base.clone();
        if let Some(id) = self.id {
            config.id = Some(id);
        }
        if let Some(text) = self.text {
            config.text = text;
        }
        if let Some(template) = self.template.and_then(|t| t.parse().ok()) {
            config.template = template;
        }
        if let Some(size) = self.font_size.and_then(|s| s.parse().ok()) {
            config.font_size = size;
        }
        if let Some(color) = self.text_color.and_then(|c| c.parse().ok()) {
            config.text_color = color;
        }
        if let Some(color) = self.background_color.and_then(|c| c.parse().ok()) {
            config.background_color = color;
        }
        if let Some(position) = self.text_position.and_then(|p| p.parse().ok()) {
            config.text_position = position;
        }
        Ok(config)
    }
}

impl<'c> From<&'c Config> for RawConfig {
    fn from(config: &'c Config) -> Self {
        RawConfig{
            id: config.id.clone(),
            text: Some(config.text.clone()),
            template: Some(config.template.to_string()),
            font_size: Some(config.font_size.to_string()),
            text_color: Some(config.text_color.to_string()),
            background_color: Some(config.background_color.to_string()),
            text_position: Some(config.text_position.to_string()),
        }
    }
}
