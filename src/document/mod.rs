//! Document loading.
//!
//! - `DocumentSource`: Where document text comes from (`FsSource`,
//!   `MemorySource`)
//! - `DocumentLoader`: Locates the element collection in a document and
//!   discovers feed page counts
//!
//! Transport, archive extraction and unwrapping happen before text reaches
//! this module.

pub mod loader;
pub mod source;

pub use loader::{DocumentLoader, LoadSummary, Pagination};
pub use source::{DocumentSource, FsSource, MemorySource};
