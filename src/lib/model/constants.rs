//! Module defining constants relevant to the data model.

use super::types::{Color, FontSize, TemplateId, TextPosition};


/// Text of a freshly created stamp.
pub const DEFAULT_TEXT: &'static str = "LGTM";
pub const DEFAULT_TEMPLATE: TemplateId = TemplateId::Classic;
pub const DEFAULT_FONT_SIZE: FontSize = FontSize::Medium;
pub const DEFAULT_TEXT_COLOR: Color = Color(0xFF, 0xFF, 0xFF);
pub const DEFAULT_BACKGROUND_COLOR: Color = Color(0x3B, 0x82, 0xF6);
pub const DEFAULT_TEXT_POSITION: TextPosition = TextPosition::Center;

/// Maximum length of the stamp text, in characters.
pub const MAX_TEXT_LENGTH: usize = 50;

/// Maximum number of text lines that are rendered.
/// Any lines past that are silently dropped.
pub const MAX_TEXT_LINES: usize = 3;

/// Height of a text line relative to the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;


/// Preset text colors offered to the user, by name.
pub const TEXT_COLOR_PRESETS: &'static [(&'static str, Color)] = &[
    ("White", Color(0xFF, 0xFF, 0xFF)),
    ("Black", Color(0x00, 0x00, 0x00)),
    ("Red", Color(0xEF, 0x44, 0x44)),
    ("Blue", Color(0x3B, 0x82, 0xF6)),
    ("Green", Color(0x10, 0xB9, 0x81)),
    ("Yellow", Color(0xFB, 0xBF, 0x24)),
    ("Purple", Color(0xA8, 0x55, 0xF7)),
    ("Pink", Color(0xEC, 0x48, 0x99)),
];

/// Preset background colors offered to the user, by name.
pub const BACKGROUND_COLOR_PRESETS: &'static [(&'static str, Color)] = &[
    ("Blue", Color(0x3B, 0x82, 0xF6)),
    ("Dark Gray", Color(0x1F, 0x29, 0x37)),
    ("White", Color(0xFF, 0xFF, 0xFF)),
    ("Purple", Color(0x7C, 0x3A, 0xED)),
    ("Teal", Color(0x14, 0xB8, 0xA6)),
    ("Orange", Color(0xF9, 0x73, 0x16)),
    ("Red", Color(0xEF, 0x44, 0x44)),
    ("Green", Color(0x10, 0xB9, 0x81)),
];


/// Look up a preset color by name within given palette.
///
/// Matching ignores case, whitespace, dashes and underscores,
/// so "Dark Gray", "dark-gray" and "darkgray" are all the same preset.
pub fn preset_color(palette: &[(&str, Color)], name: &str) -> Option<Color> {
    fn normalize(s: &str) -> String {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect()
    }
    let name = normalize(name);
    palette.iter()
        .find(|&&(preset, _)| normalize(preset) == name)
        .map(|&(_, color)| color)
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;
    use crate::model::Color;
    use super::{BACKGROUND_COLOR_PRESETS, TEXT_COLOR_PRESETS, preset_color};

    #[test]
    fn preset_lookup_is_lenient() {
        assert_that!(preset_color(BACKGROUND_COLOR_PRESETS, "Dark Gray"))
            .is_some().is_equal_to(Color(0x1F, 0x29, 0x37));
        assert_that!(preset_color(BACKGROUND_COLOR_PRESETS, "dark-gray"))
            .is_some().is_equal_to(Color(0x1F, 0x29, 0x37));
        assert_that!(preset_color(TEXT_COLOR_PRESETS, "PINK"))
            .is_some().is_equal_to(Color(0xEC, 0x48, 0x99));
    }

    #[test]
    fn preset_lookup_is_per_palette() {
        assert_that!(preset_color(TEXT_COLOR_PRESETS, "teal")).is_none();
        assert_that!(preset_color(BACKGROUND_COLOR_PRESETS, "teal")).is_some();
    }
}
