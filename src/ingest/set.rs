//! Set node ingestion.

use serde_json::Value;

use super::extract::scalar_field;
use super::Ingestor;
use crate::cards::Set;

impl Ingestor<'_> {
    /// Ingest one set node and any cards embedded in it.
    ///
    /// Missing code and name both fall back to `default_set_code`. The set
    /// record overwrites whatever was registered for its code, including
    /// implicit sets created from card data. Embedded cards default to this
    /// set's code. Returns the number of card records written.
    pub fn ingest_set(&mut self, node: &Value, default_set_code: &str) -> usize {
        let code = non_empty_or(scalar_field(node, &self.config.set_code), default_set_code);
        let name = non_empty_or(scalar_field(node, &self.config.set_name), default_set_code);

        if !code.is_empty() && !name.is_empty() {
            self.registry.upsert_set(Set::named(code.clone(), name));
        }

        let Some(Value::Array(cards)) = node.get(&self.config.set_cards) else {
            return 0;
        };
        cards.iter().map(|card| self.ingest_card(card, &code)).sum()
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::cards::CardRegistry;
    use crate::ingest::{IngestConfig, Ingestor};
    use crate::schema::PropertySchema;

    #[test]
    fn test_ingest_set() {
        let config = IngestConfig::default();
        let schema = PropertySchema::default();
        let mut registry = CardRegistry::new();

        let written = Ingestor::new(&config, &schema, &mut registry)
            .ingest_set(&json!({"code": "CORE", "name": "Core Set"}), "_DEFAULT_");

        assert_eq!(written, 0);
        assert_eq!(registry.set("CORE").unwrap().name, "Core Set");
    }

    #[test]
    fn test_explicit_set_overwrites_implicit() {
        let config = IngestConfig::default();
        let schema = PropertySchema::default();
        let mut registry = CardRegistry::new();
        let mut ingestor = Ingestor::new(&config, &schema, &mut registry);

        ingestor.ingest_card(&json!({"id": "A1", "name": "Bolt", "set": "CORE"}), "_DEFAULT_");
        ingestor.ingest_set(&json!({"code": "CORE", "name": "Core Set"}), "_DEFAULT_");

        assert_eq!(registry.set("CORE").unwrap().name, "Core Set");
        assert_eq!(registry.set_count(), 1);
    }

    #[test]
    fn test_embedded_cards_default_to_set() {
        let config = IngestConfig::default();
        let schema = PropertySchema::default();
        let mut registry = CardRegistry::new();

        let written = Ingestor::new(&config, &schema, &mut registry).ingest_set(
            &json!({
                "code": "EXP",
                "name": "Expansion",
                "cards": [
                    {"id": "E1", "name": "Shock"},
                    {"id": "E2", "name": "Spark", "set": "PROMO"},
                    {"name": "No Id"}
                ]
            }),
            "_DEFAULT_",
        );

        assert_eq!(written, 2);
        assert_eq!(registry.card("E1").unwrap().set_code, "EXP");
        assert_eq!(registry.card("E2").unwrap().set_code, "PROMO");
        assert_eq!(registry.set("EXP").unwrap().name, "Expansion");
        assert_eq!(registry.set("PROMO").unwrap().name, "PROMO");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = IngestConfig::default();
        let schema = PropertySchema::default();
        let mut registry = CardRegistry::new();
        let mut ingestor = Ingestor::new(&config, &schema, &mut registry);

        ingestor.ingest_set(&json!({"code": "NONAME"}), "_DEFAULT_");
        ingestor.ingest_set(&json!({"name": "Orphan"}), "FALLBACK");
        ingestor.ingest_set(&json!({"code": "BLANK", "name": ""}), "PAGE");

        assert_eq!(registry.set("NONAME").unwrap().name, "_DEFAULT_");
        assert_eq!(registry.set("FALLBACK").unwrap().name, "Orphan");
        assert_eq!(registry.set("BLANK").unwrap().name, "PAGE");
    }

    #[test]
    fn test_unnamed_set_overwrites_implicit_name() {
        let config = IngestConfig::default();
        let schema = PropertySchema::default();
        let mut registry = CardRegistry::new();
        let mut ingestor = Ingestor::new(&config, &schema, &mut registry);

        ingestor.ingest_card(&json!({"id": "A1", "name": "Bolt", "set": "CORE"}), "_DEFAULT_");
        assert_eq!(ingestor.registry().set("CORE").unwrap().name, "CORE");

        ingestor.ingest_set(&json!({"code": "CORE"}), "_DEFAULT_");
        assert_eq!(registry.set("CORE").unwrap().name, "_DEFAULT_");
    }

    #[test]
    fn test_cards_field_not_a_list() {
        let config = IngestConfig::default();
        let schema = PropertySchema::default();
        let mut registry = CardRegistry::new();

        let written = Ingestor::new(&config, &schema, &mut registry)
            .ingest_set(&json!({"code": "CORE", "cards": {"id": "A1"}}), "_DEFAULT_");

        assert_eq!(written, 0);
        assert!(registry.is_empty());
        assert!(registry.set("CORE").is_some());
    }
}
