//! Module for saving rendered stamps as files.

use std::fs;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;

use crate::render::{OutputFormat, RenderOutput};
use super::{ActionError, ActionResult};


/// Maximum length of the part of a file name that comes from the stamp text.
const MAX_SLUG_LENGTH: usize = 20;


/// Destination of downloaded stamps.
pub trait Downloader {
    /// Save the image under given file name.
    /// Returns the full path of the saved file.
    fn download(&self, output: &RenderOutput, filename: &str) -> ActionResult<PathBuf>;
}


/// Downloader which writes the files into a directory.
#[derive(Clone, Debug)]
pub struct FileDownloader {
    directory: PathBuf,
}

impl FileDownloader {
    #[inline]
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        FileDownloader{directory: directory.as_ref().to_owned()}
    }

    #[inline]
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl Downloader for FileDownloader {
    fn download(&self, output: &RenderOutput, filename: &str) -> ActionResult<PathBuf> {
        if filename.is_empty() || filename.contains(|c: char| c == '/' || c == '\\')
            || filename == "." || filename == ".." {
            return Err(ActionError::Filename(filename.to_owned()));
        }

        let path = self.directory.join(filename);
        debug!("Saving {} bytes of {} to {}", output.len(), output.format(), path.display());
        fs::write(&path, output.bytes())
            .map_err(|e| ActionError::Io{path: path.clone(), source: e})?;
        info!("Downloaded: {}", path.display());
        Ok(path)
    }
}


/// Generate the name of a downloaded file:
/// `lgtm_<text>_YYYYMMDD_HHMMSS.<ext>`.
///
/// The text part is reduced to lowercase letters, digits and underscores,
/// and left out if nothing remains.
pub fn generate_filename(text: &str, now: OffsetDateTime, format: OutputFormat) -> String {
    let timestamp = format!("{:04}{:02}{:02}_{:02}{:02}{:02}",
        now.year(), u8::from(now.month()), now.day(),
        now.hour(), now.minute(), now.second());
    let slug = slugify(text);
    if slug.is_empty() {
        format!("lgtm_{}.{}", timestamp, format.extension())
    } else {
        format!("lgtm_{}_{}.{}", slug, timestamp, format.extension())
    }
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug: String = slug.trim_start_matches('_').chars().take(MAX_SLUG_LENGTH).collect();
    slug.trim_end_matches('_').to_owned()
}
