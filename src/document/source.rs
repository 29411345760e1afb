//! Document sources.
//!
//! The loader never fetches anything itself. A `DocumentSource` hands it the
//! text of an already retrieved and unwrapped document, or reports that the
//! document does not exist.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use crate::error::{LoadError, Result};

/// Provider of document text.
pub trait DocumentSource {
    /// Read a document. `Ok(None)` means it does not exist.
    fn read(&self, path: &Path) -> Result<Option<String>>;
}

impl<S: DocumentSource + ?Sized> DocumentSource for &S {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        (**self).read(path)
    }
}

/// Reads documents from the local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsSource;

impl DocumentSource for FsSource {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// In-memory documents keyed by path.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    documents: FxHashMap<PathBuf, String>,
}

impl MemorySource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document (builder pattern).
    #[must_use]
    pub fn with_document(mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Add or replace a document.
    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.documents.insert(path.into(), text.into());
    }

    /// Remove a document.
    pub fn remove(&mut self, path: &Path) -> Option<String> {
        self.documents.remove(path)
    }
}

impl DocumentSource for MemorySource {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.documents.get(path).cloned())
    }
}
