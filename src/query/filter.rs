//! Card filter queries.
//!
//! A `CardFilter` is a conjunction of optional predicates. Unset predicates
//! match everything, so `CardFilter::default()` returns the whole registry.
//!
//! Text predicates are case-insensitive substring checks. The name predicate
//! splits its query on whitespace and requires every token to occur in the
//! card name.
//!
//! ## Enum Predicates
//!
//! A card matches `(property, mask)` when its decoded enum bitmask shares a
//! bit with `mask`, or when `mask` is exactly the enum's empty flag and the
//! card's raw value equals the property's empty sentinel. A property with no
//! enum definition matches nothing.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardRegistry};
use crate::schema::PropertySchema;

/// Composite card predicate.
///
/// ## Example
///
/// ```
/// use ccg_catalog::query::CardFilter;
///
/// let filter = CardFilter::new()
///     .with_name("goblin war")
///     .with_int_min("power", 3);
///
/// assert!(!filter.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFilter {
    /// Substring of the card id.
    pub id: String,
    /// Whitespace-separated tokens, all required in the name.
    pub name: String,
    /// Substring of the set code.
    pub set_code: String,
    /// Property name to required substring.
    pub strings: FxHashMap<String, String>,
    /// Property name to inclusive lower bound.
    pub int_min: FxHashMap<String, i64>,
    /// Property name to inclusive upper bound.
    pub int_max: FxHashMap<String, i64>,
    /// Property name to enum flag mask.
    pub enums: FxHashMap<String, u64>,
}

impl CardFilter {
    /// Create a filter matching every card.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Require an id substring.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Require every whitespace-separated token in the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Require a set code substring.
    #[must_use]
    pub fn with_set_code(mut self, set_code: impl Into<String>) -> Self {
        self.set_code = set_code.into();
        self
    }

    /// Require a substring in a property value.
    #[must_use]
    pub fn with_string(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(property.into(), value.into());
        self
    }

    /// Require a property's integer value to be at least `min`.
    #[must_use]
    pub fn with_int_min(mut self, property: impl Into<String>, min: i64) -> Self {
        self.int_min.insert(property.into(), min);
        self
    }

    /// Require a property's integer value to be at most `max`.
    #[must_use]
    pub fn with_int_max(mut self, property: impl Into<String>, max: i64) -> Self {
        self.int_max.insert(property.into(), max);
        self
    }

    /// Require an enum property to match a flag mask.
    #[must_use]
    pub fn with_enum(mut self, property: impl Into<String>, mask: u64) -> Self {
        self.enums.insert(property.into(), mask);
        self
    }

    /// Whether the filter has no predicates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
            && self.name.trim().is_empty()
            && self.set_code.is_empty()
            && self.strings.is_empty()
            && self.int_min.is_empty()
            && self.int_max.is_empty()
            && self.enums.is_empty()
    }

    /// Lowercase the text predicates once per scan.
    fn prepare(&self) -> PreparedFilter<'_> {
        PreparedFilter {
            filter: self,
            id: self.id.to_lowercase(),
            name_tokens: self.name.split_whitespace().map(str::to_lowercase).collect(),
            set_code: self.set_code.to_lowercase(),
            strings: self
                .strings
                .iter()
                .map(|(property, value)| (property.as_str(), value.to_lowercase()))
                .collect(),
        }
    }

    /// Check a single card.
    #[must_use]
    pub fn matches(&self, card: &Card, schema: &PropertySchema) -> bool {
        self.prepare().matches(card, schema)
    }

    /// Lazily yield matching cards in registry order.
    ///
    /// Each call starts a fresh scan over the registry's current contents.
    pub fn filter<'a>(
        &'a self,
        registry: &'a CardRegistry,
        schema: &'a PropertySchema,
    ) -> impl Iterator<Item = &'a Card> + 'a {
        let prepared = self.prepare();
        registry
            .cards()
            .filter(move |card| prepared.matches(card, schema))
    }
}

struct PreparedFilter<'a> {
    filter: &'a CardFilter,
    id: String,
    name_tokens: Vec<String>,
    set_code: String,
    strings: Vec<(&'a str, String)>,
}

impl PreparedFilter<'_> {
    fn matches(&self, card: &Card, schema: &PropertySchema) -> bool {
        contains_ci(&card.id, &self.id)
            && self.matches_name(&card.name)
            && contains_ci(&card.set_code, &self.set_code)
            && self
                .strings
                .iter()
                .all(|(property, value)| contains_ci(card.property_str(property), value))
            && self
                .filter
                .int_min
                .iter()
                .all(|(property, &min)| card.property_int(property) >= min)
            && self
                .filter
                .int_max
                .iter()
                .all(|(property, &max)| card.property_int(property) <= max)
            && self
                .filter
                .enums
                .iter()
                .all(|(property, &mask)| matches_enum(card, property, mask, schema))
    }

    fn matches_name(&self, name: &str) -> bool {
        if self.name_tokens.is_empty() {
            return true;
        }
        let name = name.to_lowercase();
        self.name_tokens.iter().all(|token| name.contains(token.as_str()))
    }
}

/// `needle` must already be lowercase.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}

fn matches_enum(card: &Card, property: &str, mask: u64, schema: &PropertySchema) -> bool {
    let Some(def) = schema.enum_def(property) else {
        return false;
    };
    if card.property_enum(property, schema) & mask != 0 {
        return true;
    }
    def.empty_flag() == Some(mask)
        && schema
            .property(property)
            .is_some_and(|prop| prop.empty == card.property_str(property))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EnumDef, PropertyDef, PropertyKind};

    fn schema() -> PropertySchema {
        PropertySchema::new(
            vec![
                PropertyDef::new("power", PropertyKind::Integer),
                PropertyDef::new("text", PropertyKind::String),
                PropertyDef::new("color", PropertyKind::StringEnumList).with_empty("none"),
            ],
            vec![EnumDef::new("color")
                .with_value("R", "Red")
                .with_value("G", "Green")],
        )
    }

    fn card(schema: &PropertySchema, id: &str, name: &str, power: &str, color: &str) -> Card {
        Card::new(id, name, "CORE")
            .with_property(schema.property("power").unwrap().clone(), power)
            .with_property(schema.property("text").unwrap().clone(), "Deal Damage")
            .with_property(schema.property("color").unwrap().clone(), color)
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let schema = schema();
        let filter = CardFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&card(&schema, "A1", "Bolt", "1", "R"), &schema));
        assert!(filter.matches(&Card::new("", "", ""), &schema));
    }

    #[test]
    fn test_id_and_set_substring() {
        let schema = schema();
        let c = card(&schema, "XY-101", "Bolt", "1", "R");

        assert!(CardFilter::new().with_id("y-1").matches(&c, &schema));
        assert!(!CardFilter::new().with_id("z").matches(&c, &schema));
        assert!(CardFilter::new().with_set_code("or").matches(&c, &schema));
        assert!(!CardFilter::new().with_set_code("EXP").matches(&c, &schema));
    }

    #[test]
    fn test_name_tokens() {
        let schema = schema();
        let c = card(&schema, "A1", "Goblin War Chief", "1", "R");

        assert!(CardFilter::new().with_name("chief GOBLIN").matches(&c, &schema));
        assert!(CardFilter::new().with_name("  war  ").matches(&c, &schema));
        assert!(!CardFilter::new().with_name("goblin king").matches(&c, &schema));
    }

    #[test]
    fn test_string_property() {
        let schema = schema();
        let c = card(&schema, "A1", "Bolt", "1", "R");

        assert!(CardFilter::new().with_string("text", "damage").matches(&c, &schema));
        assert!(!CardFilter::new().with_string("text", "heal").matches(&c, &schema));
        // Missing property reads as empty.
        assert!(!CardFilter::new().with_string("flavor", "x").matches(&c, &schema));
        assert!(CardFilter::new().with_string("flavor", "").matches(&c, &schema));
    }

    #[test]
    fn test_int_bounds() {
        let schema = schema();
        let c = card(&schema, "A1", "Bolt", "3", "R");

        assert!(CardFilter::new().with_int_min("power", 3).matches(&c, &schema));
        assert!(!CardFilter::new().with_int_min("power", 4).matches(&c, &schema));
        assert!(CardFilter::new().with_int_max("power", 3).matches(&c, &schema));
        assert!(!CardFilter::new().with_int_max("power", 2).matches(&c, &schema));

        // Unparseable values count as 0.
        let x = card(&schema, "A2", "X", "X", "R");
        assert!(CardFilter::new().with_int_max("power", 0).matches(&x, &schema));
    }

    #[test]
    fn test_enum_mask() {
        let schema = schema();
        let red_green = card(&schema, "A1", "Bolt", "1", "R, G");
        let green = card(&schema, "A2", "Growth", "1", "G");

        let red = CardFilter::new().with_enum("color", 0b01);
        assert!(red.matches(&red_green, &schema));
        assert!(!red.matches(&green, &schema));

        let either = CardFilter::new().with_enum("color", 0b11);
        assert!(either.matches(&green, &schema));
    }

    #[test]
    fn test_enum_empty_sentinel() {
        let schema = schema();
        let colorless = card(&schema, "A1", "Golem", "1", "none");
        let red = card(&schema, "A2", "Bolt", "1", "R");
        let empty_flag = schema.enum_def("color").unwrap().empty_flag().unwrap();
        assert_eq!(empty_flag, 0b100);

        assert_eq!(colorless.property_enum("color", &schema), 0);
        assert!(CardFilter::new().with_enum("color", empty_flag).matches(&colorless, &schema));
        assert!(!CardFilter::new().with_enum("color", empty_flag).matches(&red, &schema));

        // The sentinel only applies to the exact empty flag.
        assert!(!CardFilter::new().with_enum("color", empty_flag | 0b10).matches(&colorless, &schema));
    }

    #[test]
    fn test_unknown_enum_property_matches_nothing() {
        let schema = schema();
        let c = card(&schema, "A1", "Bolt", "1", "R");
        assert!(!CardFilter::new().with_enum("power", u64::MAX).matches(&c, &schema));
    }

    #[test]
    fn test_filter_is_restartable() {
        let schema = schema();
        let mut registry = CardRegistry::new();
        registry.upsert_card(card(&schema, "A1", "Bolt", "2", "R"));
        registry.upsert_card(card(&schema, "A2", "Shock", "3", "R"));
        registry.upsert_card(card(&schema, "A3", "Blast", "5", "G"));

        let filter = CardFilter::new().with_int_min("power", 3);
        let first: Vec<_> = filter.filter(&registry, &schema).map(|c| c.id.clone()).collect();
        let second: Vec<_> = filter.filter(&registry, &schema).map(|c| c.id.clone()).collect();

        assert_eq!(first, vec!["A2", "A3"]);
        assert_eq!(first, second);
    }
}
