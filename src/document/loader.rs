//! Document traversal and page-count discovery.
//!
//! A document is parsed into a generic JSON tree and the element collection
//! is located:
//! - a configured data identifier names the child holding the elements
//! - otherwise an array root is the collection
//! - otherwise the values of an object root are the elements
//!
//! Each element is passed to a callback with the canonical default set code.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::source::DocumentSource;
use crate::cards::Set;
use crate::error::{LoadError, Result};

/// Page-count discovery for paged card feeds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Root field holding the total count. Empty disables discovery.
    pub count_identifier: String,
    /// The discovered count is divided by this, rounding up. 0 disables.
    pub divisor: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            count_identifier: String::new(),
            divisor: 1,
        }
    }
}

impl Pagination {
    /// Page count advertised by a document root, if any.
    #[must_use]
    pub fn page_count(&self, root: &Value) -> Option<u32> {
        if self.count_identifier.is_empty() {
            return None;
        }
        let raw = match root.get(&self.count_identifier)? {
            Value::Number(n) => n.as_u64()?,
            Value::String(s) => s.trim().parse::<u64>().ok()?,
            _ => return None,
        };
        let pages = if self.divisor > 0 {
            raw.div_ceil(u64::from(self.divisor))
        } else {
            raw
        };
        Some(u32::try_from(pages).unwrap_or(u32::MAX))
    }
}

/// Outcome of loading one document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Elements handed to the callback.
    pub elements: usize,
    /// Page count discovered in the root.
    pub page_count: Option<u32>,
}

/// Parses documents and feeds their elements to a callback.
#[derive(Clone, Debug, Default)]
pub struct DocumentLoader {
    pagination: Pagination,
}

impl DocumentLoader {
    /// Create a loader with page-count discovery disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable page-count discovery.
    #[must_use]
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    /// Load a document from text.
    ///
    /// `path` only labels errors. A parse failure or a missing data
    /// collection is an error; nothing is passed to the callback then.
    pub fn load_text<F>(
        &self,
        text: &str,
        path: &Path,
        data_identifier: &str,
        mut on_element: F,
    ) -> Result<LoadSummary>
    where
        F: FnMut(&Value, &str),
    {
        let root: Value = serde_json::from_str(text).map_err(|e| LoadError::json(path, e))?;
        let elements = elements(&root, data_identifier, path)?;

        for element in &elements {
            on_element(element, Set::DEFAULT_CODE);
        }

        Ok(LoadSummary {
            elements: elements.len(),
            page_count: self.pagination.page_count(&root),
        })
    }

    /// Load a document from a source.
    ///
    /// An absent document is not an error: returns `Ok(None)` without
    /// calling the callback.
    pub fn load_path<S, F>(
        &self,
        source: &S,
        path: &Path,
        data_identifier: &str,
        on_element: F,
    ) -> Result<Option<LoadSummary>>
    where
        S: DocumentSource + ?Sized,
        F: FnMut(&Value, &str),
    {
        let Some(text) = source.read(path)? else {
            tracing::debug!(path = %path.display(), "document absent; skipping");
            return Ok(None);
        };
        self.load_text(&text, path, data_identifier, on_element)
            .map(Some)
    }
}

fn elements<'v>(root: &'v Value, data_identifier: &str, path: &Path) -> Result<Vec<&'v Value>> {
    let collection = if data_identifier.is_empty() {
        root
    } else {
        root.get(data_identifier).ok_or_else(|| missing(data_identifier, path))?
    };

    match collection {
        Value::Array(items) => Ok(items.iter().collect()),
        Value::Object(map) => Ok(map.values().collect()),
        _ if data_identifier.is_empty() => Err(LoadError::InvalidRoot {
            path: path.to_path_buf(),
        }),
        _ => Err(missing(data_identifier, path)),
    }
}

fn missing(data_identifier: &str, path: &Path) -> LoadError {
    LoadError::MissingData {
        path: path.to_path_buf(),
        identifier: data_identifier.to_string(),
    }
}
