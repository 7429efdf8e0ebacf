//! Module implementing the builder for `Engine`.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::resources::{Font, FontError, FontLoader, FONT_STACK};
use crate::render::options::RenderOptions;
use super::{Engine, Inner};


/// Builder for `Engine`.
#[derive(Debug, Default)]
#[must_use = "unused builder which must be used"]
pub struct Builder {
    errors: Vec<Error>,

    font_directory: Option<PathBuf>,
    font: Option<FontSource>,
    options: Option<RenderOptions>,
}

/// Where an explicitly configured font comes from.
#[derive(Debug)]
enum FontSource {
    Loaded(Font),
    Bytes(String, Vec<u8>),
    File(PathBuf),
}

impl Builder {
    /// Create a new `Builder`.
    #[inline]
    pub fn new() -> Self {
        Builder::default()
    }
}

// Setters.
impl Builder {
    /// Set the directory where the fonts of the stack will be looked up.
    ///
    /// Fonts that aren't found there are substituted with the built-in one.
    #[inline]
    pub fn font_directory<P: AsRef<Path>>(mut self, directory: P) -> Self {
        if self.font.is_some() {
            return self.err(Error::font_setup_conflict());
        }
        self.font_directory = Some(directory.as_ref().to_owned());
        self
    }

    /// Use given font for all the text.
    #[inline]
    pub fn font(self, font: Font) -> Self {
        self.set_font(FontSource::Loaded(font))
    }

    /// Use a font parsed from given TrueType/OpenType data.
    #[inline]
    pub fn font_bytes<N: Into<String>>(self, name: N, bytes: Vec<u8>) -> Self {
        self.set_font(FontSource::Bytes(name.into(), bytes))
    }

    /// Use a font read from given file.
    #[inline]
    pub fn font_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.set_font(FontSource::File(path.as_ref().to_owned()))
    }

    /// Set the options used by `Engine::render_default`.
    #[inline]
    pub fn default_options(mut self, options: RenderOptions) -> Self {
        if !options.scale.is_finite() || options.scale <= 0.0 {
            return self.err(Error::Options(format!("invalid scale factor {}", options.scale)));
        }
        self.options = Some(options); self
    }

    fn set_font(mut self, source: FontSource) -> Self {
        if self.font.is_some() || self.font_directory.is_some() {
            return self.err(Error::font_setup_conflict());
        }
        self.font = Some(source); self
    }
}

// Validation & building.
impl Builder {
    /// Build the `Engine`.
    pub fn build(mut self) -> Result<Engine, Error> {
        self.check_errors()?;

        let font = self.build_font()?;
        info!("Rendering engine uses font `{}`", font.name());
        let defaults = self.options.unwrap_or_default();
        Ok(Engine::from(Inner{font, defaults}))
    }

    fn build_font(&mut self) -> Result<Font, Error> {
        match self.font.take() {
            Some(FontSource::Loaded(font)) => return Ok(font),
            Some(FontSource::Bytes(name, bytes)) => return Ok(Font::from_bytes(name, bytes)?),
            Some(FontSource::File(path)) => return Ok(Font::from_file(path)?),
            None => {}
        }

        if let Some(ref directory) = self.font_directory {
            let loader = FontLoader::new(directory);
            if let Some(font) = loader.load_first(FONT_STACK.iter().cloned()) {
                return Ok(font);
            }
            warn!("None of the fonts {:?} found in {}, using the built-in one",
                FONT_STACK, directory.display());
        }
        Ok(Font::builtin()?)
    }

    #[doc(hidden)]
    fn check_errors(&mut self) -> Result<(), Error> {
        if self.errors.is_empty() {
            return Ok(());
        }
        Err(self.errors.remove(0))
    }

    #[doc(hidden)]
    fn err(mut self, error: Error) -> Self {
        self.errors.push(error); self
    }
}


/// Error that resulted from misconfiguration of the `Engine` via its `Builder`.
#[derive(Debug, Error)]
pub enum Error {
    /// The configured font couldn't be loaded.
    #[error(transparent)]
    Font(#[from] FontError),

    /// Font configuration setup error.
    #[error("{0}")]
    Conflict(String),

    /// Invalid default rendering options.
    #[error("{0}")]
    Options(String),
}

impl Error {
    #[inline]
    fn font_setup_conflict() -> Self {
        Error::Conflict(
            "invalid combination of configuration parameters for setting up the font".into())
    }
}
