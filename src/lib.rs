//! # ccg-catalog
//!
//! A schema-driven card catalog for card games: loads arbitrary card and set
//! JSON into a typed registry according to a per-game definition, then
//! answers filter queries over it.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded card shape. Property kinds, field
//!    names, enums and data locations all come from the game definition.
//!
//! 2. **Tolerant Ingestion**: Third-party JSON is messy. A bad property
//!    becomes an empty value, a card without an id is skipped, a missing
//!    feed file is ignored. Only whole-document failures are errors.
//!
//! 3. **String Storage**: Every property value is stored as a string and
//!    parsed on demand (integers, booleans, enum bitmasks).
//!
//! ## Architecture
//!
//! - **Explicit Session State**: Registry, seen names and enum lookups are
//!   owned by one session and passed by reference, never global.
//!
//! - **Persistent Data Structures**: The registry uses `im-rs` maps so
//!   snapshots for concurrent queries are O(1).
//!
//! ## Modules
//!
//! - `schema`: Property kinds and defs, enums, game definitions
//! - `cards`: Cards, sets, registry
//! - `ingest`: Property extraction and card/set ingestion
//! - `document`: Document sources, element traversal, page counts
//! - `query`: Card filters
//! - `session`: Load sessions, snapshots, image reference tracking
//! - `error`: Document-level errors

pub mod cards;
pub mod document;
pub mod error;
pub mod ingest;
pub mod query;
pub mod schema;
pub mod session;

// Re-export commonly used types
pub use crate::error::{LoadError, Result};

pub use crate::schema::{
    EnumDef, EnumRegistry, GameDef, GamePaths, PropertyDef, PropertyKind, PropertySchema,
    DELIMITER,
};

pub use crate::cards::{Card, CardRegistry, Properties, PropertyValue, Set};

pub use crate::ingest::{extract, IngestConfig, Ingestor};

pub use crate::document::{
    DocumentLoader, DocumentSource, FsSource, LoadSummary, MemorySource, Pagination,
};

pub use crate::query::CardFilter;

pub use crate::session::{CatalogSnapshot, GameSession, ImageRequest, ImageTracker};
