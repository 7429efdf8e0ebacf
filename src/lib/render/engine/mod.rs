//! Module which defines the rendering engine.

mod builder;

pub use self::builder::{Builder, Error as BuildError};


use std::sync::Arc;

use crate::model::Config;
use crate::resources::Font;
use super::error::RenderError;
use super::options::RenderOptions;
use super::output::RenderOutput;
use super::task::RenderTask;


/// Stamp rendering engine.
///
/// The engine is thread-safe (`Sync`) since you may want the rendering
/// to be performed in a background thread.
///
/// *Note*: `Engine` implements `Clone`
/// by merely cloning a shared reference to the underlying object.
#[derive(Clone, Debug)]
pub struct Engine {
    inner: Arc<Inner>,
}

/// Shared state of the engine that render tasks have access to.
#[derive(Debug)]
pub(super) struct Inner {
    pub font: Font,
    pub defaults: RenderOptions,
}

impl From<Inner> for Engine {
    fn from(inner: Inner) -> Self {
        Engine{inner: Arc::new(inner)}
    }
}

// Constructors.
impl Engine {
    /// Create an Engine which uses the built-in font and default options.
    ///
    /// For other ways of creating `Engine`, see the `EngineBuilder`.
    #[inline]
    pub fn new() -> Result<Self, BuildError> {
        Builder::new().build()
    }

    /// Create an Engine which renders text with given font.
    #[inline]
    pub fn with_font(font: Font) -> Self {
        Engine::from(Inner{font, defaults: RenderOptions::default()})
    }
}

// Rendering.
impl Engine {
    /// Render given stamp config into an encoded image.
    ///
    /// Rendering is CPU-intensive, especially at larger scales,
    /// so it is recommended to execute it in a separate thread.
    #[inline]
    pub fn render(&self, config: &Config, options: &RenderOptions) -> Result<RenderOutput, RenderError> {
        RenderTask::new(config, options, &self.inner).perform()
    }

    /// Render given stamp config with the engine's default options.
    #[inline]
    pub fn render_default(&self, config: &Config) -> Result<RenderOutput, RenderError> {
        self.render(config, &self.inner.defaults)
    }
}

// Accessors.
impl Engine {
    /// The font that the stamp text is rendered with.
    #[inline]
    pub fn font(&self) -> &Font {
        &self.inner.font
    }

    #[inline]
    pub fn default_options(&self) -> &RenderOptions {
        &self.inner.defaults
    }
}


#[cfg(test)]
mod tests {
    use image::GenericImageView;
    use spectral::prelude::*;
    use crate::model::{Config, TemplateId};
    use crate::render::{OutputFormat, RenderError, RenderOptions};
    use super::Engine;

    const PNG_SIGNATURE: &'static [u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

    fn small() -> RenderOptions {
        RenderOptions::new().size(160, 120).scale(1.0)
    }

    #[test]
    fn thread_safe() {
        fn assert_sync<T: Sync>() {}
        fn assert_send<T: Send>() {}

        assert_sync::<Engine>();
        assert_send::<Engine>();
    }

    #[test]
    fn default_render() {
        let engine = Engine::new().unwrap();
        let output = engine.render(&Config::default(), &small()).unwrap();
        assert_that!(output.format()).is_equal_to(OutputFormat::Png);
        assert_that!(output.dimensions()).is_equal_to((160, 120));
        assert_that!(output.bytes().starts_with(PNG_SIGNATURE)).is_true();

        let img = image::load_from_memory(output.bytes()).unwrap();
        assert_that!(img.dimensions()).is_equal_to((160, 120));
    }

    #[test]
    fn scale_multiplies_size() {
        let engine = Engine::new().unwrap();
        let output = engine.render(&Config::default(),
            &RenderOptions::new().size(100, 50).scale(2.0)).unwrap();
        assert_that!(output.dimensions()).is_equal_to((200, 100));
    }

    #[test]
    fn extra_lines_are_dropped() {
        let engine = Engine::new().unwrap();
        let three = engine.render(&Config::with_text("A\nB\nC"), &small()).unwrap();
        let four = engine.render(&Config::with_text("A\nB\nC\nD"), &small()).unwrap();
        assert_that!(four.bytes()).is_equal_to(three.bytes());
    }

    #[test]
    fn unknown_format_falls_back_to_png() {
        let engine = Engine::new().unwrap();
        let options = small().format_name("tiff-ish");
        let output = engine.render(&Config::default(), &options).unwrap();
        assert_that!(output.format()).is_equal_to(OutputFormat::Png);
        assert_that!(output.bytes().starts_with(PNG_SIGNATURE)).is_true();
    }

    #[test]
    fn jpeg_and_webp() {
        let engine = Engine::new().unwrap();
        let jpeg = engine.render(&Config::default(),
            &small().format(OutputFormat::Jpeg).quality(0.5)).unwrap();
        assert_that!(jpeg.bytes().starts_with(&[0xFF, 0xD8, 0xFF])).is_true();
        assert_that!(jpeg.mime_type().as_ref()).is_equal_to("image/jpeg");

        let webp = engine.render(&Config::default(), &small().format(OutputFormat::Webp)).unwrap();
        assert_eq!(b"RIFF", &webp.bytes()[0..4]);
        assert_eq!(b"WEBP", &webp.bytes()[8..12]);
    }

    #[test]
    fn every_template_renders() {
        let engine = Engine::new().unwrap();
        for &id in TemplateId::ALL {
            let config = Config::from_template(id);
            assert_that!(engine.render(&config, &small())).is_ok();
        }
    }

    #[test]
    fn template_background() {
        let engine = Engine::new().unwrap();
        let options = small();

        let dark = engine.render(&Config::from_template(TemplateId::Dark), &options).unwrap();
        let img = image::load_from_memory(dark.bytes()).unwrap().to_rgba8();
        assert_that!(img.get_pixel(0, 0).0).is_equal_to([0x1F, 0x29, 0x37, 0xFF]);

        // Classic has a gradient, so opposite corners differ.
        let classic = engine.render(&Config::default(), &options).unwrap();
        let img = image::load_from_memory(classic.bytes()).unwrap().to_rgba8();
        assert_that!(img.get_pixel(0, 0)).is_not_equal_to(img.get_pixel(159, 119));
    }

    #[test]
    fn invalid_text() {
        let engine = Engine::new().unwrap();
        let result = engine.render(&Config::with_text(""), &small());
        match result {
            Err(RenderError::InvalidConfig(v)) => assert_that!(v.is_valid()).is_false(),
            r => panic!("expected InvalidConfig, got {:?}", r),
        }

        let long = "x".repeat(51);
        assert_that!(engine.render(&Config::with_text(long), &small())).is_err();
    }

    #[test]
    fn bad_surface() {
        let engine = Engine::new().unwrap();
        let config = Config::default();
        for options in &[
            RenderOptions::new().size(5000, 100),  // 10000 px at the default scale
            RenderOptions::new().size(0, 100),
            small().scale(0.0),
            small().scale(std::f32::NAN),
            // Small image, but the text alone would be huge.
            RenderOptions::new().size(1, 1).scale(8000.0),
        ] {
            match engine.render(&config, options) {
                Err(RenderError::Surface(_)) => {}
                r => panic!("expected Surface error for {:?}, got {:?}", options, r),
            }
        }
    }

    #[test]
    fn default_options_are_used() {
        let engine = Engine::new().unwrap();
        let output = engine.render_default(&Config::default()).unwrap();
        assert_that!(output.dimensions()).is_equal_to((1600, 1200));
        assert_that!(engine.default_options()).is_equal_to(&RenderOptions::default());
    }
}
