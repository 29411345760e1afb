//! Game schema: property definitions, enum dictionaries, game configuration.
//!
//! ## Key Types
//!
//! - `PropertyKind`: Closed set of source JSON shapes
//! - `PropertyDef`: One named, typed card property
//! - `EnumDef`: Ordered value dictionary with derived bit flags
//! - `EnumRegistry`: Enum lookup by governed property
//! - `PropertySchema`: Read-only schema shared by ingestion and queries
//! - `GameDef`: Per-game configuration document
//!
//! The schema is built once per load session and is read-only afterwards.

pub mod enums;
pub mod game;
pub mod property;

use std::sync::Arc;

use rustc_hash::FxHashMap;

pub use enums::{split_values, EnumDef, EnumRegistry};
pub use game::{DeckUrl, GameBoardUrl, GameDef, GamePaths};
pub use property::{PropertyDef, PropertyKind};

/// Delimiter joining the parts of multi-value properties.
pub const DELIMITER: &str = ", ";

/// Property definitions and enums for one game.
///
/// Cheap to share: definitions are reference counted so extracted values can
/// point at the def they came from.
#[derive(Clone, Debug, Default)]
pub struct PropertySchema {
    properties: Vec<Arc<PropertyDef>>,
    by_name: FxHashMap<String, usize>,
    enums: EnumRegistry,
}

impl PropertySchema {
    /// Build a schema from ordered property and enum definitions.
    pub fn new(properties: Vec<PropertyDef>, enums: Vec<EnumDef>) -> Self {
        let properties: Vec<Arc<PropertyDef>> = properties.into_iter().map(Arc::new).collect();
        let mut by_name = FxHashMap::default();
        for (index, def) in properties.iter().enumerate() {
            by_name.entry(def.name.clone()).or_insert(index);
        }

        Self {
            properties,
            by_name,
            enums: EnumRegistry::new(enums),
        }
    }

    /// Property definitions in schema order.
    #[must_use]
    pub fn properties(&self) -> &[Arc<PropertyDef>] {
        &self.properties
    }

    /// Property definition by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Arc<PropertyDef>> {
        self.by_name.get(name).map(|&index| &self.properties[index])
    }

    /// Enum governing a property.
    #[must_use]
    pub fn enum_def(&self, property: &str) -> Option<&EnumDef> {
        self.enums.get(property)
    }

    /// All enums.
    #[must_use]
    pub fn enums(&self) -> &EnumRegistry {
        &self.enums
    }
}
