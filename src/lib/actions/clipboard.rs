//! Module for copying stamps and share links to the clipboard.

use crate::model::Config;
use crate::render::RenderOutput;
use crate::share;
use super::{ActionError, ActionResult};


/// A clipboard that stamps and links can be copied to.
pub trait Clipboard {
    /// Whether the clipboard can hold text.
    fn supports_text(&self) -> bool { true }
    /// Whether the clipboard can hold images.
    fn supports_images(&self) -> bool { false }

    fn write_text(&mut self, text: &str) -> ActionResult<()>;
    fn write_image(&mut self, output: &RenderOutput) -> ActionResult<()>;
}


/// Copy text to the primary clipboard,
/// falling back to the legacy one if the primary fails or can't hold text.
pub fn copy_text(primary: &mut dyn Clipboard, fallback: &mut dyn Clipboard,
                 text: &str) -> ActionResult<()> {
    if primary.supports_text() {
        match primary.write_text(text) {
            Ok(()) => return Ok(()),
            Err(e) => debug!("Primary clipboard failed ({}), trying the fallback", e),
        }
    }
    fallback.write_text(text).map_err(|e| {
        warn!("Failed to copy text to clipboard: {}", e);
        e
    })
}

/// Copy the share link of a config.
/// Returns the link that has been copied.
pub fn copy_link(primary: &mut dyn Clipboard, fallback: &mut dyn Clipboard,
                 config: &Config, base_url: Option<&str>) -> ActionResult<String> {
    let link = share::encode(config, base_url)?;
    copy_text(primary, fallback, &link)?;
    info!("Link copied to clipboard");
    Ok(link)
}

/// Copy a rendered image.
pub fn copy_image(clipboard: &mut dyn Clipboard, output: &RenderOutput) -> ActionResult<()> {
    if !clipboard.supports_images() {
        return Err(ActionError::Unsupported("copying images"));
    }
    clipboard.write_image(output)
}


/// Clipboard that lives in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryClipboard {
    images: bool,
    text: Option<String>,
    image: Option<RenderOutput>,
}

impl MemoryClipboard {
    /// Create a clipboard that only holds text.
    #[inline]
    pub fn new() -> Self {
        MemoryClipboard::default()
    }

    /// Create a clipboard that holds both text and images.
    #[inline]
    pub fn with_images() -> Self {
        MemoryClipboard{images: true, ..MemoryClipboard::default()}
    }

    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_ref().map(|t| t.as_str())
    }

    #[inline]
    pub fn image(&self) -> Option<&RenderOutput> {
        self.image.as_ref()
    }
}

impl Clipboard for MemoryClipboard {
    fn supports_images(&self) -> bool {
        self.images
    }

    fn write_text(&mut self, text: &str) -> ActionResult<()> {
        self.text = Some(text.to_owned());
        self.image = None;
        Ok(())
    }

    fn write_image(&mut self, output: &RenderOutput) -> ActionResult<()> {
        if !self.images {
            return Err(ActionError::Unsupported("copying images"));
        }
        self.image = Some(output.clone());
        self.text = None;
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;
    use crate::actions::{ActionError, ActionResult};
    use crate::model::Config;
    use crate::render::{Engine, RenderOptions, RenderOutput};
    use super::{copy_image, copy_link, copy_text, Clipboard, MemoryClipboard};

    /// Clipboard that refuses every write.
    struct Denied;

    impl Clipboard for Denied {
        fn write_text(&mut self, _: &str) -> ActionResult<()> {
            Err(ActionError::Failed("permission denied".into()))
        }
        fn write_image(&mut self, _: &RenderOutput) -> ActionResult<()> {
            Err(ActionError::Failed("permission denied".into()))
        }
    }

    #[test]
    fn primary_clipboard() {
        let mut primary = MemoryClipboard::new();
        let mut fallback = MemoryClipboard::new();
        copy_text(&mut primary, &mut fallback, "hello").unwrap();
        assert_that!(primary.text()).is_equal_to(Some("hello"));
        assert_that!(fallback.text()).is_none();
    }

    #[test]
    fn fallback_clipboard() {
        let mut fallback = MemoryClipboard::new();
        copy_text(&mut Denied, &mut fallback, "hello").unwrap();
        assert_that!(fallback.text()).is_equal_to(Some("hello"));

        assert_that!(copy_text(&mut Denied, &mut Denied, "hello")).is_err();
    }

    #[test]
    fn link() {
        let mut primary = MemoryClipboard::new();
        let link = copy_link(&mut primary, &mut Denied, &Config::default(), None).unwrap();
        assert_that!(primary.text()).is_equal_to(Some(link.as_str()));
        assert_that!(link.contains("tpl=classic")).is_true();
    }

    #[test]
    fn images() {
        let output = Engine::new().unwrap()
            .render(&Config::default(), &RenderOptions::new().size(16, 16).scale(1.0))
            .unwrap();

        let mut text_only = MemoryClipboard::new();
        match copy_image(&mut text_only, &output) {
            Err(ActionError::Unsupported(_)) => {}
            r => panic!("expected unsupported error, got {:?}", r),
        }

        let mut clipboard = MemoryClipboard::with_images();
        clipboard.write_text("stale").unwrap();
        copy_image(&mut clipboard, &output).unwrap();
        assert_that!(clipboard.image()).is_equal_to(Some(&output));
        assert_that!(clipboard.text()).is_none();
    }
}
