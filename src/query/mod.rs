//! Filter queries over a loaded catalog.
//!
//! Queries are read-only and may run concurrently with each other. They
//! must not overlap with ingestion on the same registry; take a snapshot
//! for that (see `session::CatalogSnapshot`).

pub mod filter;

pub use filter::CardFilter;
