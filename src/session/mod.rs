//! Load sessions and host-facing hooks.
//!
//! - `GameSession`: Sequential load of one game into a fresh registry
//! - `CatalogSnapshot`: Immutable, thread-safe view for queries
//! - `ImageTracker`: Per-card image reference counting

pub mod game_session;
pub mod images;

pub use game_session::{CatalogSnapshot, GameSession};
pub use images::{ImageRequest, ImageTracker};
