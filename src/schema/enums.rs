//! Enum dictionaries and bit-flag encoding.
//!
//! Each `EnumDef` governs one property. Its values are an ordered mapping of
//! raw value id to display string; the position of a value fixes its bit
//! flag (`1 << index`). One extra flag, `1 << values.len()`, is the "empty"
//! sentinel used by filters to select cards with no value.
//!
//! The lookup table is derived from the values and rebuilt every time they
//! change, so a stale lookup cannot be observed.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::DELIMITER;

/// Highest number of values that can carry a flag in a `u64` mask.
pub const MAX_FLAGGED_VALUES: usize = u64::BITS as usize;

/// Serialized form of an enum definition.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct EnumDefData {
    property: String,
    values: IndexMap<String, String>,
}

/// Enumeration governing one property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EnumDefData", into = "EnumDefData")]
pub struct EnumDef {
    property: String,
    values: IndexMap<String, String>,
    lookup: FxHashMap<String, u64>,
}

impl From<EnumDefData> for EnumDef {
    fn from(data: EnumDefData) -> Self {
        let mut def = Self {
            property: data.property,
            values: data.values,
            lookup: FxHashMap::default(),
        };
        def.rebuild_lookup();
        def
    }
}

impl From<EnumDef> for EnumDefData {
    fn from(def: EnumDef) -> Self {
        Self {
            property: def.property,
            values: def.values,
        }
    }
}

impl EnumDef {
    /// Create an empty enum for a property.
    pub fn new(property: impl Into<String>) -> Self {
        EnumDefData {
            property: property.into(),
            values: IndexMap::new(),
        }
        .into()
    }

    /// Add a value (builder pattern).
    #[must_use]
    pub fn with_value(mut self, id: impl Into<String>, display: impl Into<String>) -> Self {
        self.insert_value(id, display);
        self
    }

    /// Add or replace a value. A new id takes the next bit position.
    pub fn insert_value(&mut self, id: impl Into<String>, display: impl Into<String>) {
        self.values.insert(id.into(), display.into());
        self.rebuild_lookup();
    }

    fn rebuild_lookup(&mut self) {
        self.lookup.clear();
        for (index, id) in self.values.keys().enumerate() {
            match 1u64.checked_shl(index as u32) {
                Some(flag) => {
                    self.lookup.insert(id.clone(), flag);
                }
                None => {
                    tracing::warn!(
                        property = %self.property,
                        value = %id,
                        "enum has more values than mask bits; value gets no flag"
                    );
                }
            }
        }
    }

    /// Property this enum governs.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Ordered value id to display mapping.
    #[must_use]
    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the enum has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flag for a value id.
    #[must_use]
    pub fn flag(&self, id: &str) -> Option<u64> {
        self.lookup.get(id).copied()
    }

    /// Sentinel flag matching cards whose value equals the property's empty
    /// string. `None` when the enum fills every mask bit.
    #[must_use]
    pub fn empty_flag(&self) -> Option<u64> {
        u32::try_from(self.values.len())
            .ok()
            .and_then(|count| 1u64.checked_shl(count))
    }

    /// Combine the flags of the given ids. Unknown ids are ignored.
    pub fn encode<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> u64 {
        ids.into_iter()
            .filter_map(|id| self.flag(id))
            .fold(0, |mask, flag| mask | flag)
    }

    /// Value ids selected by a mask, in value order.
    #[must_use]
    pub fn decode(&self, mask: u64) -> Vec<&str> {
        self.values
            .keys()
            .filter(|id| self.flag(id).is_some_and(|flag| mask & flag != 0))
            .map(String::as_str)
            .collect()
    }

    /// Mask for a stored property value (delimited ids).
    #[must_use]
    pub fn mask_for_value(&self, raw: &str) -> u64 {
        self.encode(split_values(raw))
    }

    /// Display strings selected by a mask, joined with the delimiter.
    #[must_use]
    pub fn display_for_mask(&self, mask: u64) -> String {
        self.decode(mask)
            .into_iter()
            .filter_map(|id| self.values.get(id).map(String::as_str))
            .collect::<Vec<_>>()
            .join(DELIMITER)
    }

    /// Map each delimited id of a stored value to its display string.
    ///
    /// Ids with no entry are kept verbatim.
    #[must_use]
    pub fn display_for_value(&self, raw: &str) -> String {
        split_values(raw)
            .map(|id| self.values.get(id).map_or(id, String::as_str))
            .collect::<Vec<_>>()
            .join(DELIMITER)
    }
}

/// Split a stored multi-value string into its non-empty parts.
pub fn split_values(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(DELIMITER).filter(|part| !part.is_empty())
}

/// All enum definitions of a game, indexed by property name.
#[derive(Clone, Debug, Default)]
pub struct EnumRegistry {
    defs: Vec<EnumDef>,
    by_property: FxHashMap<String, usize>,
}

impl EnumRegistry {
    /// Create a registry. When two defs govern the same property the first
    /// one wins.
    pub fn new(defs: Vec<EnumDef>) -> Self {
        let mut by_property = FxHashMap::default();
        for (index, def) in defs.iter().enumerate() {
            by_property.entry(def.property.clone()).or_insert(index);
        }
        Self { defs, by_property }
    }

    /// Enum governing a property.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&EnumDef> {
        self.by_property.get(property).map(|&index| &self.defs[index])
    }

    /// Number of enum definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Check if there are no enum definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Iterate over all enum definitions in schema order.
    pub fn iter(&self) -> impl Iterator<Item = &EnumDef> {
        self.defs.iter()
    }
}
