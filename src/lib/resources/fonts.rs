//! Module for loading fonts used to render stamp text.

use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

use rusttype::{self, GlyphId};
use thiserror::Error;

use super::Loader;
use super::filesystem::{BytesLoader, PathLoader};


/// Extensions of font files that are looked up in the font directory.
pub const FILE_EXTENSIONS: &'static [&'static str] = &["ttf", "otf"];

/// Names of the fonts to try, in order, before falling back to the built-in one.
pub const FONT_STACK: &'static [&'static str] = &["Inter-Bold", "DejaVuSans-Bold"];

/// Name of the font that's compiled into the library.
pub const BUILTIN_FONT_NAME: &'static str = "DejaVuSans-Bold (built-in)";

static BUILTIN_FONT_BYTES: &'static [u8] = include_bytes!(
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/fonts/DejaVuSans-Bold.ttf"));


/// Font that can be used to render stamp text.
#[derive(Clone)]
pub struct Font {
    name: Arc<str>,
    inner: rusttype::Font<'static>,
}

impl Font {
    /// Parse a font from the content of a TrueType/OpenType file.
    pub fn from_bytes<N: AsRef<str>>(name: N, bytes: Vec<u8>) -> Result<Self, FontError> {
        let name = name.as_ref();
        let inner = rusttype::Font::try_from_vec(bytes)
            .ok_or_else(|| FontError::Invalid(name.to_owned()))?;
        Ok(Font{name: name.into(), inner})
    }

    /// Read a font from given file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FontError> {
        let path = path.as_ref();
        let name = format!("{}", path.display());
        let bytes = std::fs::read(path)
            .map_err(|e| FontError::Io{name: name.clone(), source: e})?;
        Self::from_bytes(name, bytes)
    }

    /// The font compiled into the library.
    pub fn builtin() -> Result<Self, FontError> {
        let inner = rusttype::Font::try_from_bytes(BUILTIN_FONT_BYTES)
            .ok_or_else(|| FontError::Invalid(BUILTIN_FONT_NAME.to_owned()))?;
        Ok(Font{name: BUILTIN_FONT_NAME.into(), inner})
    }
}

impl Font {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Characters of given text that the font has no glyphs for.
    /// Whitespace is never reported.
    pub fn missing_glyphs(&self, text: &str) -> Vec<char> {
        let missing: BTreeSet<_> = text.chars()
            .filter(|c| !c.is_whitespace())
            .filter(|&c| self.inner.glyph(c).id() == GlyphId(0))
            .collect();
        missing.into_iter().collect()
    }
}

impl Deref for Font {
    type Target = rusttype::Font<'static>;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Font({:?})", self.name)
    }
}


/// Loader of fonts from a directory.
#[derive(Debug)]
pub struct FontLoader {
    inner: BytesLoader,
}

impl FontLoader {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        FontLoader{
            inner: BytesLoader::new(
                PathLoader::for_extensions(directory, FILE_EXTENSIONS.iter()))
        }
    }

    /// Load the first font of given stack that is available in the directory.
    pub fn load_first<'n, I>(&self, names: I) -> Option<Font>
        where I: IntoIterator<Item=&'n str>
    {
        for name in names {
            match self.load(name) {
                Ok(font) => return Some(font),
                Err(e) => debug!("Font `{}` unavailable in {}: {}",
                    name, self.inner.directory().display(), e),
            }
        }
        None
    }
}

impl Loader for FontLoader {
    type Item = Font;
    type Err = FontError;

    fn load<'n>(&self, name: &'n str) -> Result<Font, Self::Err> {
        let bytes = self.inner.load(name)
            .map_err(|e| FontError::Io{name: name.to_owned(), source: e})?;
        let font = Font::from_bytes(name, bytes).map_err(|e| {
            error!("Font file for `{}` resource couldn't be parsed", name);
            e
        })?;
        debug!("Font `{}` loaded successfully", name);
        Ok(font)
    }
}


/// Error that may occur while loading a font.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font file couldn't be read.
    #[error("cannot read font `{name}`: {source}")]
    Io { name: String, #[source] source: io::Error },
    /// The file doesn't contain a usable font.
    #[error("`{0}` is not a valid TrueType/OpenType font")]
    Invalid(String),
}
