//! Module defining and implementing file-based resource loaders.

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use super::Loader;


/// Loader for file paths from given directory.
///
/// The resources here are just file *paths* (std::path::PathBuf)
/// of files named after the resource and having one of the allowed extensions.
/// No substantial "loading" is performed.
pub struct PathLoader {
    directory: PathBuf,
    extensions: Vec<String>,
}

impl PathLoader {
    /// Create a loader which only gives out paths to files
    /// that have one of the extensions given.
    pub fn for_extensions<D: AsRef<Path>, I, S>(directory: D, extensions: I) -> Self
        where I: IntoIterator<Item=S>, S: ToString
    {
        PathLoader{
            directory: directory.as_ref().to_owned(),
            extensions: extensions.into_iter()
                .map(|e| e.to_string()).map(|e| e.trim().to_lowercase())
                .collect(),
        }
    }

    #[inline]
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl Loader for PathLoader {
    type Item = PathBuf;
    type Err = io::Error;

    /// "Load" a path "resource" from the loader's directory.
    fn load<'n>(&self, name: &'n str) -> Result<Self::Item, Self::Err> {
        if name.is_empty() || name.contains(|c: char| c == '/' || c == '\\') {
            return Err(io::Error::new(io::ErrorKind::InvalidInput,
                format!("invalid resource name `{}`", name)));
        }

        for ext in &self.extensions {
            let path = self.directory.join(format!("{}.{}", name, ext));
            trace!("Looking for resource `{}` at {}", name, path.display());
            if path.is_file() {
                return Ok(path);
            }
        }
        Err(io::Error::new(io::ErrorKind::NotFound,
            format!("resource `{}` not found in {}", name, self.directory.display())))
    }
}

impl fmt::Debug for PathLoader {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("PathLoader")
            .field("directory", &self.directory)
            .field("extensions", &self.extensions)
            .finish()
    }
}


/// Wrapper around PathLoader that loads the entire content of the files.
#[derive(Debug)]
pub struct BytesLoader {
    inner: PathLoader,
}

impl BytesLoader {
    #[inline]
    pub fn new(inner: PathLoader) -> Self {
        BytesLoader{inner}
    }

    #[inline]
    pub fn directory(&self) -> &Path {
        self.inner.directory()
    }
}

impl Loader for BytesLoader {
    type Item = Vec<u8>;
    type Err = io::Error;

    /// Load a file resource as its byte content.
    fn load<'n>(&self, name: &'n str) -> Result<Self::Item, Self::Err> {
        let path = self.inner.load(name)?;
        let file = File::open(&path)?;

        let mut bytes = match file.metadata() {
            Ok(stat) => Vec::with_capacity(stat.len() as usize),
            Err(e) => {
                warn!("Failed to stat file of resource `{}` to obtain its size: {}",
                    name, e);
                Vec::new()
            },
        };

        let mut reader = BufReader::new(file);
        reader.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}
