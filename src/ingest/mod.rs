//! Schema-driven ingestion of card and set JSON.
//!
//! ## Key Types
//!
//! - `IngestConfig`: Field names that carry card and set identity
//! - `Ingestor`: Applies card and set nodes to a `CardRegistry`
//! - `extract`: Converts one raw field to its canonical string value
//!
//! Ingestion is single-writer and order dependent: implicit set creation and
//! reprint detection both read state left by earlier nodes.
//!
//! ## Failure Policy
//!
//! Nothing here returns an error. A node without an id is skipped, a field
//! with the wrong shape becomes an empty value.

pub mod card;
pub mod extract;
pub mod set;

use serde::{Deserialize, Serialize};

use crate::cards::CardRegistry;
use crate::schema::PropertySchema;

pub use extract::extract;

/// Field names used to read identity from card and set nodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    pub card_id: String,
    pub card_name: String,
    /// Set code field on cards, or the set object list in reprint mode.
    pub card_set: String,
    pub set_code: String,
    pub set_name: String,
    /// Embedded card list on set nodes.
    pub set_cards: String,
    /// Cards list their sets as objects, one record is created per set.
    pub reprints_in_card_object_list: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            card_id: "id".to_string(),
            card_name: "name".to_string(),
            card_set: "set".to_string(),
            set_code: "code".to_string(),
            set_name: "name".to_string(),
            set_cards: "cards".to_string(),
            reprints_in_card_object_list: false,
        }
    }
}

impl IngestConfig {
    /// Read sets from a list of set objects on each card.
    #[must_use]
    pub fn with_reprints_in_card_object_list(mut self) -> Self {
        self.reprints_in_card_object_list = true;
        self
    }
}

/// Applies raw nodes to a registry.
///
/// Borrows the registry mutably for the duration of a load step; the
/// schema and identifiers are read-only.
pub struct Ingestor<'a> {
    config: &'a IngestConfig,
    schema: &'a PropertySchema,
    registry: &'a mut CardRegistry,
}

impl<'a> Ingestor<'a> {
    /// Create an ingestor over a registry.
    pub fn new(
        config: &'a IngestConfig,
        schema: &'a PropertySchema,
        registry: &'a mut CardRegistry,
    ) -> Self {
        Self {
            config,
            schema,
            registry,
        }
    }

    /// Registry being written.
    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        self.registry
    }
}
