//! Card and set registry.
//!
//! The `CardRegistry` owns every card (by id) and set (by code) loaded in a
//! session, plus the names seen so far for reprint detection. It is mutated
//! only by the ingestors and read by queries.
//!
//! Backed by `im` persistent maps: cloning is O(1), so a snapshot can be
//! handed to readers while ingestion continues on the original.

use im::{HashSet as ImHashSet, OrdMap};
use serde::{Deserialize, Serialize};

use super::definition::Card;
use super::set::Set;

/// Registry of cards and sets.
///
/// Iteration is ordered by card id and set code.
///
/// ## Example
///
/// ```
/// use ccg_catalog::cards::CardRegistry;
/// use ccg_catalog::ingest::{IngestConfig, Ingestor};
/// use ccg_catalog::schema::PropertySchema;
///
/// let config = IngestConfig::default();
/// let schema = PropertySchema::default();
/// let mut registry = CardRegistry::new();
///
/// let node = serde_json::json!({"id": "A1", "name": "Lightning Bolt", "set": "CORE"});
/// Ingestor::new(&config, &schema, &mut registry).ingest_card(&node, "_DEFAULT_");
///
/// let found = registry.card("A1").unwrap();
/// assert_eq!(found.name, "Lightning Bolt");
/// assert_eq!(registry.set("CORE").unwrap().name, "CORE");
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardRegistry {
    cards: OrdMap<String, Card>,
    sets: OrdMap<String, Set>,
    card_names: ImHashSet<String>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a card.
    pub(crate) fn upsert_card(&mut self, card: Card) {
        self.cards.insert(card.id.clone(), card);
    }

    /// Insert or replace a set. Explicit set data always wins.
    pub(crate) fn upsert_set(&mut self, set: Set) {
        self.sets.insert(set.code.clone(), set);
    }

    /// Create an implicit set if the code is unknown.
    pub(crate) fn ensure_set(&mut self, code: &str) {
        if !self.sets.contains_key(code) {
            self.sets.insert(code.to_string(), Set::new(code));
        }
    }

    /// Record a card name. Returns `true` if the name was already seen.
    pub(crate) fn mark_name_seen(&mut self, name: &str) -> bool {
        if self.card_names.contains(name) {
            true
        } else {
            self.card_names.insert(name.to_string());
            false
        }
    }

    /// Get a card by id.
    #[must_use]
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.get(id)
    }

    /// Get a set by code.
    #[must_use]
    pub fn set(&self, code: &str) -> Option<&Set> {
        self.sets.get(code)
    }

    /// Check if a card id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.cards.contains_key(id)
    }

    /// Check if a card name has been seen this session.
    #[must_use]
    pub fn has_seen_name(&self, name: &str) -> bool {
        self.card_names.contains(name)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get the number of registered sets.
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.sets.len()
    }

    /// Iterate over all cards.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Iterate over all sets.
    pub fn sets(&self) -> impl Iterator<Item = &Set> {
        self.sets.values()
    }

    /// Cards belonging to a set.
    pub fn cards_in_set<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Card> + 'a {
        self.cards.values().filter(move |c| c.set_code == code)
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }

    /// O(1) copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Drop all cards, sets and seen names.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
