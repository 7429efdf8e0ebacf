//! Best-effort cleanup of user-provided config values.

use crate::model::constants::MAX_TEXT_LENGTH;
use crate::model::RawConfig;
use super::{is_hex_color, validate, Validation};


/// Color returned by `sanitize_color` for anything that can't be salvaged.
const FALLBACK_COLOR: &'static str = "#000000";


/// Clean up the stamp text: strip angle brackets, trim whitespace
/// and cut it down to the maximum length.
pub fn sanitize_text(text: &str) -> String {
    let stripped: String = text.chars().filter(|&c| c != '<' && c != '>').collect();
    stripped.trim().chars().take(MAX_TEXT_LENGTH).collect()
}

/// Coerce the string into an uppercase `#RRGGBB` color.
///
/// Non-hex characters are dropped and a missing `#` is added.
/// If the result still isn't a full hex color, black is returned.
pub fn sanitize_color(color: &str) -> String {
    let cleaned: String = color.chars()
        .filter(|&c| c == '#' || c.is_ascii_hexdigit())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let with_hash = if cleaned.starts_with('#') { cleaned } else { format!("#{}", cleaned) };

    if is_hex_color(&with_hash) {
        with_hash
    } else {
        trace!("Color `{}` cannot be salvaged, using {}", color, FALLBACK_COLOR);
        FALLBACK_COLOR.to_owned()
    }
}

/// Sanitize the text and colors of the config (where present and non-empty),
/// then validate the result.
pub fn sanitize_and_validate(config: RawConfig) -> (RawConfig, Validation) {
    let mut config = config;

    if let Some(text) = config.text.as_mut().filter(|t| !t.is_empty()) {
        *text = sanitize_text(text);
    }
    for color in [&mut config.text_color, &mut config.background_color] {
        if let Some(value) = color.as_mut().filter(|c| !c.is_empty()) {
            *value = sanitize_color(value);
        }
    }

    let validation = validate(&config);
    (config, validation)
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;
    use crate::model::RawConfig;
    use super::{sanitize_and_validate, sanitize_color, sanitize_text};

    #[test]
    fn text_is_trimmed() {
        assert_that!(sanitize_text(" LGTM ")).is_equal_to("LGTM".to_owned());
        assert_that!(sanitize_text("\tShip it\n")).is_equal_to("Ship it".to_owned());
    }

    #[test]
    fn text_loses_angle_brackets() {
        assert_that!(sanitize_text("<b>LGTM</b>")).is_equal_to("bLGTM/b".to_owned());
        // Whitespace exposed by the removal is trimmed too.
        assert_that!(sanitize_text("> LGTM <")).is_equal_to("LGTM".to_owned());
    }

    #[test]
    fn text_is_truncated() {
        assert_that!(sanitize_text(&"a".repeat(100)).chars().count()).is_equal_to(50);
        assert_that!(sanitize_text(&"é".repeat(60)).chars().count()).is_equal_to(50);
    }

    #[test]
    fn color_is_normalized() {
        assert_that!(sanitize_color("FFFFFF")).is_equal_to("#FFFFFF".to_owned());
        assert_that!(sanitize_color("#abc123")).is_equal_to("#ABC123".to_owned());
        assert_that!(sanitize_color(" #3b 82 f6 ")).is_equal_to("#3B82F6".to_owned());
    }

    #[test]
    fn bad_color_becomes_black() {
        assert_that!(sanitize_color("gg0000")).is_equal_to("#000000".to_owned());
        assert_that!(sanitize_color("#FFF")).is_equal_to("#000000".to_owned());
        assert_that!(sanitize_color("")).is_equal_to("#000000".to_owned());
        assert_that!(sanitize_color("##123456")).is_equal_to("#000000".to_owned());
    }

    #[test]
    fn color_sanitizing_is_idempotent() {
        for input in &["FFFFFF", "#abc123", "gg0000", "#FFF", "red", "#1e40af", "x#12y3456"] {
            let once = sanitize_color(input);
            assert_that!(sanitize_color(&once)).is_equal_to(once);
        }
    }

    #[test]
    fn sanitize_then_validate() {
        let raw = RawConfig{
            text: Some("  <LGTM>  ".into()),
            text_color: Some("ffffff".into()),
            background_color: Some("nope".into()),
            template: Some("dark".into()),
            ..RawConfig::default()
        };
        let (sanitized, validation) = sanitize_and_validate(raw);
        assert_that!(validation.is_valid()).is_true();
        assert_that!(sanitized.text).is_equal_to(Some("LGTM".to_owned()));
        assert_that!(sanitized.text_color).is_equal_to(Some("#FFFFFF".to_owned()));
        assert_that!(sanitized.background_color).is_equal_to(Some("#000000".to_owned()));
    }

    #[test]
    fn empty_values_are_left_for_validation() {
        let raw = RawConfig{text: Some("".into()), ..RawConfig::default()};
        let (_, validation) = sanitize_and_validate(raw);
        assert_that!(validation.messages()).is_equal_to(vec!["Text cannot be empty".to_owned()]);
    }
}
