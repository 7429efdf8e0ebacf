//! Module defining the options of a rendering.

use std::fmt;
use std::str::FromStr;

use mime::{self, Mime};
use serde::{Deserialize, Serialize};

use crate::model::UnknownValue;


/// Default logical width of the stamp, in pixels.
pub const DEFAULT_WIDTH: u32 = 800;
/// Default logical height of the stamp, in pixels.
pub const DEFAULT_HEIGHT: u32 = 600;
/// Default ratio of device pixels to logical pixels.
pub const DEFAULT_SCALE: f32 = 2.0;
/// Default quality of lossy formats, in the [0, 1] range.
pub const DEFAULT_QUALITY: f32 = 0.95;


lazy_static! {
    static ref IMAGE_WEBP: Mime = "image/webp".parse().unwrap();
}


/// Image format of the rendered stamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
    Webp,
}

impl Default for OutputFormat {
    fn default() -> Self { OutputFormat::Png }
}

impl OutputFormat {
    /// Interpret a format name, falling back to PNG when it's not recognized.
    pub fn from_str_lossy(s: &str) -> Self {
        s.parse().unwrap_or_else(|e| {
            warn!("{}, falling back to {}", e, OutputFormat::Png);
            OutputFormat::Png
        })
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match *self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Webp => "webp",
        }
    }

    /// Usual extension of files in this format.
    #[inline]
    pub fn extension(&self) -> &'static str {
        match *self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Webp => "webp",
        }
    }

    pub fn mime_type(&self) -> Mime {
        match *self {
            OutputFormat::Png => mime::IMAGE_PNG,
            OutputFormat::Jpeg => mime::IMAGE_JPEG,
            OutputFormat::Webp => IMAGE_WEBP.clone(),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "webp" => Ok(OutputFormat::Webp),
            _ => Err(UnknownValue::new("image format", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.as_str())
    }
}


/// Options of a single rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Logical width of the stamp.
    pub width: u32,
    /// Logical height of the stamp.
    pub height: u32,
    /// Ratio of device pixels to logical pixels.
    pub scale: f32,
    pub format: OutputFormat,
    /// Quality of lossy formats, in the [0, 1] range.
    pub quality: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions{
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
            format: OutputFormat::default(),
            quality: DEFAULT_QUALITY,
        }
    }
}

impl RenderOptions {
    #[inline]
    pub fn new() -> Self {
        RenderOptions::default()
    }

    #[inline]
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[inline]
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale; self
    }

    #[inline]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format; self
    }

    /// Set the format by name, falling back to PNG if it's not recognized.
    #[inline]
    pub fn format_name(self, name: &str) -> Self {
        self.format(OutputFormat::from_str_lossy(name))
    }

    #[inline]
    pub fn quality(mut self, quality: f32) -> Self {
        self.quality = quality; self
    }
}

impl RenderOptions {
    /// Quality actually used for encoding: clamped to [0, 1],
    /// with the default substituted for non-finite values.
    pub fn effective_quality(&self) -> f32 {
        if self.quality.is_finite() {
            self.quality.max(0.0).min(1.0)
        } else {
            DEFAULT_QUALITY
        }
    }

    /// Size of the rendered image in device pixels.
    /// Fractional pixels are truncated.
    pub fn device_size(&self) -> (u32, u32) {
        let device = |logical: u32| (logical as f64 * self.scale as f64).floor();
        let (w, h) = (device(self.width), device(self.height));
        let clamp = |v: f64| if v.is_finite() && v > 0.0 { v.min(u32::MAX as f64) as u32 } else { 0 };
        (clamp(w), clamp(h))
    }
}
