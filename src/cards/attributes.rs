//! Extracted card property values.
//!
//! Every property is stored as a string, whatever its declared kind. Lists
//! are joined with the schema delimiter and nested objects keep their JSON
//! text. Typed readers (`as_int`, `as_bool`, enum masks) parse on demand.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::{split_values, PropertyDef};

/// A property definition paired with the value extracted for one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyValue {
    /// Definition the value was extracted with.
    pub def: Arc<PropertyDef>,
    /// Canonical string value. Never absent; empty when the card has none.
    pub value: String,
}

impl PropertyValue {
    /// Pair a definition with a value.
    pub fn new(def: Arc<PropertyDef>, value: impl Into<String>) -> Self {
        Self {
            def,
            value: value.into(),
        }
    }

    /// Raw string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Integer value, if the string parses as one.
    ///
    /// Integral floats such as `"3.0"` are accepted since some feeds emit
    /// every number as a float.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        let trimmed = self.value.trim();
        trimmed.parse::<i64>().ok().or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        })
    }

    /// Boolean value: `true` or `1`, case-insensitive.
    #[must_use]
    pub fn as_bool(&self) -> bool {
        let trimmed = self.value.trim();
        trimmed.eq_ignore_ascii_case("true") || trimmed == "1"
    }

    /// Parts of a multi-value string.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        split_values(&self.value)
    }

    /// Whether the value equals the def's empty sentinel.
    #[must_use]
    pub fn is_empty_sentinel(&self) -> bool {
        self.value == self.def.empty
    }
}

/// Property name to value, in schema order.
pub type Properties = IndexMap<String, PropertyValue>;
