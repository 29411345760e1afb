//! Card records.
//!
//! A `Card` is one entry of the catalog: a card as it appears in one set.
//! When the same printed card belongs to several sets at once, each set gets
//! its own record and the records share their property map.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::attributes::{Properties, PropertyValue};
use crate::schema::{PropertyDef, PropertySchema};

/// Catalog card.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use ccg_catalog::cards::Card;
/// use ccg_catalog::schema::{PropertyDef, PropertyKind};
///
/// let power = Arc::new(PropertyDef::new("power", PropertyKind::Integer));
/// let card = Card::new("A1", "Goblin Raider", "CORE").with_property(power, "2");
///
/// assert_eq!(card.property_int("power"), 2);
/// assert_eq!(card.property_str("toughness"), "");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Registry key. Suffixed with `_<set>` when the card maps to several sets.
    pub id: String,

    /// Card name.
    pub name: String,

    /// Set this record belongs to.
    pub set_code: String,

    /// Extracted properties, shared between per-set records of one card.
    pub properties: Arc<Properties>,

    /// A card with the same name was registered earlier in the session.
    pub is_reprint: bool,
}

impl Card {
    /// Create a card with no properties.
    pub fn new(id: impl Into<String>, name: impl Into<String>, set_code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            set_code: set_code.into(),
            properties: Arc::new(Properties::default()),
            is_reprint: false,
        }
    }

    /// Add a property value (builder pattern).
    #[must_use]
    pub fn with_property(mut self, def: Arc<PropertyDef>, value: impl Into<String>) -> Self {
        let name = def.name.clone();
        Arc::make_mut(&mut self.properties).insert(name, PropertyValue::new(def, value));
        self
    }

    /// Property entry by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Raw string value; empty when the card has no such property.
    #[must_use]
    pub fn property_str(&self, name: &str) -> &str {
        self.property(name).map_or("", PropertyValue::as_str)
    }

    /// Integer value; 0 when absent or unparseable.
    #[must_use]
    pub fn property_int(&self, name: &str) -> i64 {
        self.property(name).and_then(PropertyValue::as_int).unwrap_or(0)
    }

    /// Boolean value; false when absent.
    #[must_use]
    pub fn property_bool(&self, name: &str) -> bool {
        self.property(name).is_some_and(PropertyValue::as_bool)
    }

    /// Enum bitmask of a property; 0 when no enum governs it or the value is
    /// empty. Ids with no flag are ignored.
    #[must_use]
    pub fn property_enum(&self, name: &str, schema: &PropertySchema) -> u64 {
        match (schema.enum_def(name), self.property(name)) {
            (Some(def), Some(value)) => def.mask_for_value(&value.value),
            _ => 0,
        }
    }

    /// Value for display: enum ids are replaced by their display strings.
    #[must_use]
    pub fn property_display(&self, name: &str, schema: &PropertySchema) -> String {
        let raw = self.property_str(name);
        match schema.enum_def(name) {
            Some(def) => def.display_for_value(raw),
            None => raw.to_string(),
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) [{}]", self.name, self.id, self.set_code)
    }
}
