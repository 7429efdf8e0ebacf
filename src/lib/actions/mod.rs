//! Module with the actions that can be taken on a rendered stamp.
//!
//! The actual destinations (file system, clipboard, share sheet)
//! are provided by the caller through the traits defined here.

mod clipboard;
mod download;
mod share;


pub use self::clipboard::{copy_image, copy_link, copy_text, Clipboard, MemoryClipboard};
pub use self::download::{generate_filename, Downloader, FileDownloader};
pub use self::share::{share_image, share_link, SharedFile, SharePayload, ShareOutcome, ShareTarget};


use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::share::ShareError;


/// Result of an action.
pub type ActionResult<T> = Result<T, ActionError>;

/// Error that may occur while performing an action.
#[derive(Debug, Error)]
pub enum ActionError {
    /// File couldn't be written.
    #[error("cannot write {}: {source}", .path.display())]
    Io { path: PathBuf, #[source] source: io::Error },
    /// The file name isn't a plain name of a file.
    #[error("invalid file name `{0}`")]
    Filename(String),
    /// The destination doesn't support this action.
    #[error("{0} is not supported")]
    Unsupported(&'static str),
    /// The destination failed to perform the action.
    #[error("{0}")]
    Failed(String),
    /// The user dismissed the action.
    #[error("cancelled")]
    Cancelled,
    /// The share link couldn't be created.
    #[error(transparent)]
    Link(#[from] ShareError),
}
