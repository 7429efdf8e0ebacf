//! Module implementing partial updates of a `Config`.

use super::color::Color;
use super::config::Config;
use super::enums::{FontSize, TemplateId, TextPosition};


/// A set of changes to apply to a `Config`.
///
/// Fields left as `None` are not touched.
/// Note that changing the `template` through a patch does *not* bring in
/// the template's style defaults; use `Config::set_template` for that.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use = "unused patch which must be applied"]
pub struct ConfigPatch {
    pub text: Option<String>,
    pub template: Option<TemplateId>,
    pub font_size: Option<FontSize>,
    pub text_color: Option<Color>,
    pub background_color: Option<Color>,
    pub text_position: Option<TextPosition>,
}

impl ConfigPatch {
    #[inline]
    pub fn new() -> Self {
        ConfigPatch::default()
    }

    #[inline]
    pub fn text<T: Into<String>>(mut self, text: T) -> Self {
        self.text = Some(text.into()); self
    }

    #[inline]
    pub fn template(mut self, template: TemplateId) -> Self {
        self.template = Some(template); self
    }

    #[inline]
    pub fn font_size(mut self, font_size: FontSize) -> Self {
        self.font_size = Some(font_size); self
    }

    #[inline]
    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color); self
    }

    #[inline]
    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color); self
    }

    #[inline]
    pub fn text_position(mut self, position: TextPosition) -> Self {
        self.text_position = Some(position); self
    }
}

impl ConfigPatch {
    /// Whether the patch doesn't change anything.
    pub fn is_empty(&self) -> bool {
        *self == ConfigPatch::default()
    }

    /// Apply the patch to given config.
    pub fn apply_to(self, config: &mut Config) {
        if let Some(text) = self.text { config.text = text; }
        if let Some(template) = self.template { config.template = template; }
        if let Some(size) = self.font_size { config.font_size = size; }
        if let Some(color) = self.text_color { config.text_color = color; }
        if let Some(color) = self.background_color { config.background_color = color; }
        if let Some(position) = self.text_position { config.text_position = position; }
    }
}

impl Config {
    /// Return a copy of the config with the patch applied.
    pub fn merged(&self, patch: ConfigPatch) -> Config {
        let mut result = self.clone();
        patch.apply_to(&mut result);
        result
    }
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;
    use crate::model::{Color, Config, FontSize};
    use super::ConfigPatch;

    #[test]
    fn empty_patch_changes_nothing() {
        let config = Config::default();
        assert_that!(ConfigPatch::new().is_empty()).is_true();
        assert_that!(config.merged(ConfigPatch::new())).is_equal_to(config);
    }

    #[test]
    fn patch_touches_only_given_fields() {
        let config = Config::default().merged(ConfigPatch::new()
            .text("Nice")
            .font_size(FontSize::Small)
            .background_color(Color::black()));
        assert_that!(config.text.as_str()).is_equal_to("Nice");
        assert_that!(config.font_size).is_equal_to(FontSize::Small);
        assert_that!(config.background_color).is_equal_to(Color::black());
        assert_that!(config.text_color).is_equal_to(Config::default().text_color);
    }
}
