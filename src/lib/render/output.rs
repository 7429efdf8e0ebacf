//! Defines the output of a rendering.

use std::ops::Deref;

use base64::prelude::*;
use mime::Mime;

use super::options::OutputFormat;


/// Output of the rendering process: the encoded image.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "unused render output which must be used"]
pub struct RenderOutput {
    format: OutputFormat,
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl RenderOutput {
    #[inline]
    pub(super) fn new(format: OutputFormat, (width, height): (u32, u32), bytes: Vec<u8>) -> Self {
        RenderOutput{format, width, height, bytes}
    }
}

impl RenderOutput {
    /// Image format of the output.
    #[inline]
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Dimensions of the image, in device pixels.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw bytes of the output.
    ///
    /// See `RenderOutput::format` for how to interpret it.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    /// Convert the output into a vector of bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The MIME type that matches output's format.
    #[inline]
    pub fn mime_type(&self) -> Mime {
        self.format.mime_type()
    }

    /// The image as a `data:` URI with base64-encoded content.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), BASE64_STANDARD.encode(&self.bytes))
    }
}

impl Deref for RenderOutput {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.bytes()
    }
}

impl From<RenderOutput> for Vec<u8> {
    fn from(output: RenderOutput) -> Self {
        output.into_bytes()
    }
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;
    use crate::render::OutputFormat;
    use super::RenderOutput;

    #[test]
    fn data_uri() {
        let output = RenderOutput::new(OutputFormat::Jpeg, (1, 1), b"hi!".to_vec());
        assert_that!(output.data_uri()).is_equal_to("data:image/jpeg;base64,aGkh".to_owned());
        assert_that!(output.len()).is_equal_to(3);
    }
}
