//! Module for encoding stamp configs into shareable links and back.

use base64::prelude::*;
use serde::Serialize;
use thiserror::Error;
use url::{form_urlencoded, Url};

use crate::model::{Config, RawConfig};


/// Base URL of share links when none is given.
pub const DEFAULT_BASE_URL: &'static str = "http://localhost:3000/";


/// Query parameters of a share link.
///
/// Short names keep the links manageable.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
struct ShareParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tpl: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<String>,
    /// Text color, without the `#`.
    #[serde(skip_serializing_if = "Option::is_none")]
    tc: Option<String>,
    /// Background color, without the `#`.
    #[serde(skip_serializing_if = "Option::is_none")]
    bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pos: Option<String>,
}

impl<'c> From<&'c Config> for ShareParams {
    fn from(config: &'c Config) -> Self {
        ShareParams{
            text: Some(config.text.clone()),
            tpl: Some(config.template.to_string()),
            size: Some(config.font_size.to_string()),
            tc: Some(config.text_color.hex_digits()),
            bg: Some(config.background_color.hex_digits()),
            pos: Some(config.text_position.to_string()),
        }
    }
}

impl ShareParams {
    /// Pick the stamp parameters out of a query string.
    ///
    /// When a parameter is repeated, its first value is used.
    fn from_query(query: &str) -> Self {
        let mut params = ShareParams::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "text" => &mut params.text,
                "tpl" => &mut params.tpl,
                "size" => &mut params.size,
                "tc" => &mut params.tc,
                "bg" => &mut params.bg,
                "pos" => &mut params.pos,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    /// Whether the parameters describe a stamp at all.
    fn has_config(&self) -> bool {
        self.text.is_some() || self.tpl.is_some()
    }

    /// Convert into a raw config, leaving out empty parameters.
    fn into_raw(self) -> RawConfig {
        fn non_empty(s: Option<String>) -> Option<String> {
            s.filter(|s| !s.is_empty())
        }
        let color = |s: Option<String>| non_empty(s).map(|c| format!("#{}", c));

        RawConfig{
            id: None,
            text: non_empty(self.text),
            template: non_empty(self.tpl),
            font_size: non_empty(self.size),
            text_color: color(self.tc),
            background_color: color(self.bg),
            text_position: non_empty(self.pos),
        }
    }
}


/// Encode the config as a share link.
///
/// If `base_url` is omitted, `DEFAULT_BASE_URL` is used.
/// Any query already present in the base URL is replaced.
pub fn encode(config: &Config, base_url: Option<&str>) -> Result<String, ShareError> {
    let base_url = base_url.unwrap_or(DEFAULT_BASE_URL);
    let mut url = Url::parse(base_url).map_err(|e| {
        warn!("Invalid base URL for share link `{}`: {}", base_url, e);
        e
    })?;
    let query = encode_query(config);
    url.set_query(Some(&query));
    Ok(url.into())
}

/// Encode the config as a query string (without the leading `?`).
pub fn encode_query(config: &Config) -> String {
    let params = ShareParams::from(config);
    // Serializing a flat struct of strings doesn't fail.
    serde_qs::to_string(&params).unwrap_or_else(|e| {
        error!("Failed to serialize share parameters {:?}: {}", params, e);
        String::new()
    })
}


/// Decode a config from a share link.
///
/// Returns `None` if the link doesn't describe a valid stamp.
pub fn decode(url: &str) -> Option<Config> {
    let url = match Url::parse(url) {
        Ok(u) => u,
        Err(e) => {
            warn!("Failed to parse share link `{}`: {}", url, e);
            return None;
        }
    };
    decode_query(url.query().unwrap_or(""))
}

/// Decode a config from the query string of a share link.
///
/// Parameters that are missing or empty take the default values.
/// Returns `None` if the query has no stamp parameters
/// or if the resulting config is invalid.
pub fn decode_query(query: &str) -> Option<Config> {
    let query = query.trim_start_matches('?');
    let params = ShareParams::from_query(query);
    trace!("Share link parameters: {:?}", params);

    if !params.has_config() {
        debug!("No stamp parameters in share link query `{}`", query);
        return None;
    }
    match params.into_raw().into_config(&Config::default()) {
        Ok(config) => Some(config),
        Err(validation) => {
            error!("Invalid config from share link: {}", validation);
            None
        }
    }
}


/// Encode the config as a compact base64 string of its JSON form.
pub fn encode_base64(config: &Config) -> String {
    match serde_json::to_vec(config) {
        Ok(json) => BASE64_STANDARD.encode(json),
        Err(e) => {
            error!("Failed to serialize config {:?}: {}", config, e);
            String::new()
        }
    }
}

/// Decode a config from the base64 string made by `encode_base64`.
///
/// Percent-encoded JSON is accepted inside the base64, too.
/// Missing fields take the default values.
/// Returns `None` if the string doesn't hold a valid stamp.
pub fn decode_base64(encoded: &str) -> Option<Config> {
    let bytes = match BASE64_STANDARD.decode(encoded.trim()) {
        Ok(b) => b,
        Err(e) => {
            warn!("Invalid base64 config `{}`: {}", encoded, e);
            return None;
        }
    };
    let json: Vec<u8> = if bytes.starts_with(b"%7B") || bytes.starts_with(b"%7b") {
        // Percent-encoded JSON has no bare `&` or `=`, so it decodes as one key.
        form_urlencoded::parse(&bytes).next()
            .map(|(key, _)| key.into_owned().into_bytes())
            .unwrap_or_default()
    } else {
        bytes
    };

    let raw: RawConfig = match serde_json::from_slice(&json) {
        Ok(r) => r,
        Err(e) => {
            warn!("Invalid JSON in base64 config: {}", e);
            return None;
        }
    };
    match raw.into_config(&Config::default()) {
        Ok(config) => Some(config),
        Err(validation) => {
            error!("Invalid config from base64: {}", validation);
            None
        }
    }
}


/// Error while creating a share link.
#[derive(Debug, Error)]
pub enum ShareError {
    /// The base URL is malformed.
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;
    use crate::model::{Color, Config, FontSize, TemplateId, TextPosition};
    use super::{decode, decode_base64, decode_query, encode, encode_base64, encode_query};

    fn vibrant() -> Config {
        Config{
            text: "Test".into(),
            template: TemplateId::Vibrant,
            font_size: FontSize::Large,
            text_color: Color(0xFF, 0x6B, 0x6B),
            background_color: Color(0x4E, 0xCD, 0xC4),
            text_position: TextPosition::Bottom,
            ..Config::default()
        }
    }

    #[test]
    fn encode_uses_short_names() {
        let query = encode_query(&Config::default());
        assert_that!(query.as_str())
            .is_equal_to("text=LGTM&tpl=classic&size=medium&tc=FFFFFF&bg=3B82F6&pos=center");
    }

    #[test]
    fn encode_with_base() {
        let link = encode(&Config::default(), None).unwrap();
        assert_that!(link.starts_with("http://localhost:3000/?text=LGTM&tpl=classic")).is_true();
        assert_that!(link.contains('#')).is_false();

        let link = encode(&Config::default(), Some("https://lgtm.example.com/app?old=1")).unwrap();
        assert_that!(link.starts_with("https://lgtm.example.com/app?text=LGTM")).is_true();
        assert_that!(link.contains("old=1")).is_false();

        assert_that!(encode(&Config::default(), Some("not a url"))).is_err();
    }

    #[test]
    fn round_trip() {
        for config in &[Config::default(), vibrant(),
                        Config::with_text("Looks Good\nTo Me"),
                        Config::with_text("Zażółć & ?=+%"),
                        Config::from_template(TemplateId::Retro)] {
            let link = encode(config, Some("http://localhost:3000")).unwrap();
            assert_that!(decode(&link)).is_equal_to(Some(config.clone()));
        }
    }

    #[test]
    fn decode_basic() {
        let config = decode(
            "http://localhost:3000?text=Hello+World&tpl=dark&size=medium&tc=FF0000&bg=00ff00&pos=center")
            .unwrap();
        assert_that!(config.text.as_str()).is_equal_to("Hello World");
        assert_that!(config.template).is_equal_to(TemplateId::Dark);
        assert_that!(config.text_color).is_equal_to(Color(0xFF, 0, 0));
        assert_that!(config.background_color).is_equal_to(Color(0, 0xFF, 0));
    }

    #[test]
    fn decode_without_stamp_params() {
        assert_that!(decode("http://localhost:3000")).is_none();
        assert_that!(decode("http://localhost:3000/?size=large&foo=bar")).is_none();
        assert_that!(decode("::garbage::")).is_none();
    }

    #[test]
    fn decode_fills_defaults() {
        let config = decode_query("text=Hi").unwrap();
        assert_that!(config).is_equal_to(Config::with_text("Hi"));

        let config = decode_query("?tpl=minimal").unwrap();
        assert_that!(config.text.as_str()).is_equal_to("LGTM");
        assert_that!(config.template).is_equal_to(TemplateId::Minimal);
        assert_that!(config.text_color).is_equal_to(Color::white());
    }

    #[test]
    fn decode_rejects_invalid() {
        assert_that!(decode_query("text=Hi&tpl=fancy")).is_none();
        assert_that!(decode_query("text=Hi&tc=FFF")).is_none();
        assert_that!(decode_query("text=Hi&pos=left")).is_none();
        let long = format!("text={}", "a".repeat(51));
        assert_that!(decode_query(&long)).is_none();
    }

    #[test]
    fn decode_ignores_unknown_params() {
        let config = decode_query("text=Hi&utm_source=chat").unwrap();
        assert_that!(config.text.as_str()).is_equal_to("Hi");
    }

    #[test]
    fn repeated_params_use_first_value() {
        let config = decode_query("text=a&text=b&tpl=dark&tpl=retro").unwrap();
        assert_that!(config.text.as_str()).is_equal_to("a");
        assert_that!(config.template).is_equal_to(TemplateId::Dark);
    }

    #[test]
    fn base64_round_trip() {
        for config in &[Config::default(), vibrant(), Config::with_text("Zażółć\ngęślą")] {
            let encoded = encode_base64(config);
            assert_that!(encoded.chars().all(|c| c.is_ascii_alphanumeric() || "+/=".contains(c)))
                .is_true();
            assert_that!(decode_base64(&encoded)).is_equal_to(Some(config.clone()));
        }
    }

    #[test]
    fn base64_of_percent_encoded_json() {
        // {"text":"Hi there","template":"dark"}
        let encoded = "JTdCJTIydGV4dCUyMiUzQSUyMkhpJTIwdGhlcmUlMjIlMkMlMjJ0ZW1wbGF0ZSUyMiUzQSUyMmRhcmslMjIlN0Q=";
        let config = decode_base64(encoded).unwrap();
        assert_that!(config.text.as_str()).is_equal_to("Hi there");
        assert_that!(config.template).is_equal_to(TemplateId::Dark);
    }

    #[test]
    fn base64_rejects_bad_input() {
        assert_that!(decode_base64("not base64!")).is_none();
        // "not json"
        assert_that!(decode_base64("bm90IGpzb24=")).is_none();
        // {"text":""}
        assert_that!(decode_base64("eyJ0ZXh0IjoiIn0=")).is_none();
    }
}
