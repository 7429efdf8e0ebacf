//! Module implementing the actual rendering task.
//! Most if not all rendering logic lives here.

use std::ops::Deref;

use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use unicode_normalization::UnicodeNormalization;

use crate::model::{split_lines, Config};
use super::background::{self, Fill};
use super::engine;
use super::error::RenderError;
use super::options::{OutputFormat, RenderOptions};
use super::output::RenderOutput;
use super::text::{self, Placement, Style};


/// Largest allowed width or height of the image, in device pixels.
pub const MAX_SURFACE_SIZE: u32 = 8192;


/// Represents a single rendering task and contains all the relevant logic.
///
/// All the code here may be executed in a background thread,
/// and so it can be synchronous.
pub(super) struct RenderTask<'a> {
    config: &'a Config,
    options: &'a RenderOptions,
    engine: &'a engine::Inner,
}

impl<'a> Deref for RenderTask<'a> {
    type Target = Config;
    fn deref(&self) -> &Self::Target {
        self.config  // makes the rendering code a little terser
    }
}

impl<'a> RenderTask<'a> {
    #[inline]
    pub fn new(config: &'a Config, options: &'a RenderOptions, engine: &'a engine::Inner) -> Self {
        RenderTask{config, options, engine}
    }
}

impl<'a> RenderTask<'a> {
    /// Perform the rendering task.
    pub fn perform(self) -> Result<RenderOutput, RenderError> {
        debug!("Rendering {:?} with {:?}", self.config, self.options);

        let validation = self.config.validate();
        if !validation.is_valid() {
            warn!("Refusing to render invalid config: {}", validation);
            return Err(RenderError::InvalidConfig(validation));
        }

        let mut img = self.create_surface()?;
        self.draw_background(&mut img);
        self.draw_text(&mut img)?;

        let bytes = self.encode_result(img)?;
        let output = RenderOutput::new(self.options.format, self.options.device_size(), bytes);
        debug!("Rendered {} bytes of {}", output.len(), output.format());
        Ok(output)
    }

    /// Allocate the image that the stamp will be drawn on.
    fn create_surface(&self) -> Result<RgbaImage, RenderError> {
        let scale = self.options.scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RenderError::Surface(format!("invalid scale factor {}", scale)));
        }

        let (width, height) = self.options.device_size();
        trace!("Surface size: {}x{} logical, {}x{} device pixels",
            self.options.width, self.options.height, width, height);
        if width == 0 || height == 0 {
            return Err(RenderError::Surface(format!(
                "empty {}x{} image", width, height)));
        }
        if width > MAX_SURFACE_SIZE || height > MAX_SURFACE_SIZE {
            return Err(RenderError::Surface(format!(
                "{}x{} image exceeds the maximum of {}x{}",
                width, height, MAX_SURFACE_SIZE, MAX_SURFACE_SIZE)));
        }
        let text_size = self.font_size.pixels() * scale;
        if text_size > MAX_SURFACE_SIZE as f32 {
            return Err(RenderError::Surface(format!(
                "{} px text exceeds the maximum of {} px", text_size, MAX_SURFACE_SIZE)));
        }
        Ok(RgbaImage::new(width, height))
    }

    /// Paint the background of the template.
    fn draw_background(&self, img: &mut RgbaImage) {
        let gradient = self.config.template().defaults.gradient.as_ref();
        let fill = Fill::new(gradient, self.background_color);
        background::paint(img, fill, self.options.scale);
    }

    /// Draw the stamp text, with its drop shadow.
    fn draw_text(&self, img: &mut RgbaImage) -> Result<(), RenderError> {
        let text: String = self.text.nfc().collect();
        let lines = split_lines(&text);
        debug!("Rendering {} line(s) of {} text at {}",
            lines.len(), self.font_size, self.text_position);

        let font = &self.engine.font;
        let missing = font.missing_glyphs(&text);
        if !missing.is_empty() {
            warn!("Font `{}` is missing glyphs for {} character(s): {}", font.name(),
                missing.len(),
                missing.iter().map(|c| format!("{:#x}", *c as u32)).collect::<Vec<_>>().join(", "));
        }

        let scale = self.options.scale;
        let placement = Placement{
            center_x: self.options.width as f32 / 2.0 * scale,
            center_y: self.options.height as f32 * self.text_position.fraction() * scale,
        };
        let style = Style::new(font, self.font_size.pixels() * scale, self.text_color);
        if !text::render_lines(img, &lines, placement, &style) {
            return Err(RenderError::Font(font.name().to_owned()));
        }
        Ok(())
    }

    /// Encode final result as bytes of the requested image format.
    fn encode_result(&self, img: RgbaImage) -> Result<Vec<u8>, RenderError> {
        let format = self.options.format;
        let (width, height) = img.dimensions();
        debug!("Encoding final image as {}...", format);

        let mut result = vec![];
        match format {
            OutputFormat::Png => {
                trace!("Writing PNG image");
                PngEncoder::new(&mut result)
                    .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)?;
            }
            OutputFormat::Jpeg => {
                let quality = (self.options.effective_quality() * 100.0).round().max(1.0) as u8;
                trace!("Writing JPEG with quality {}", quality);
                // JPEG has no alpha channel.
                let rgb = DynamicImage::ImageRgba8(img).to_rgb8();
                JpegEncoder::new_with_quality(&mut result, quality)
                    .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)?;
            }
            OutputFormat::Webp => {
                trace!("Writing lossless WebP image");
                WebPEncoder::new_lossless(&mut result)
                    .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)?;
            }
        }
        Ok(result)
    }
}
