//! Card catalog: cards, sets, and the registry that owns them.
//!
//! ## Key Types
//!
//! - `PropertyValue`: Definition plus canonical string value
//! - `Card`: One card record, keyed by id (per set when reprinted)
//! - `Set`: Set code and display name
//! - `CardRegistry`: Cards by id, sets by code, seen names

pub mod attributes;
pub mod definition;
pub mod registry;
pub mod set;

pub use attributes::{Properties, PropertyValue};
pub use definition::Card;
pub use registry::CardRegistry;
pub use set::Set;
