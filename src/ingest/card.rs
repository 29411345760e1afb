//! Card node ingestion.

use std::sync::Arc;

use serde_json::Value;
use smallvec::SmallVec;

use super::extract::{extract, scalar_field};
use super::Ingestor;
use crate::cards::{Card, Properties, PropertyValue, Set};

/// Set codes a card resolves to. Almost always exactly one.
type SetCodes = SmallVec<[String; 1]>;

impl Ingestor<'_> {
    /// Ingest one card node.
    ///
    /// Creates one record per resolved set code and returns how many were
    /// written. A node without an id is skipped and yields 0.
    pub fn ingest_card(&mut self, node: &Value, default_set_code: &str) -> usize {
        let id = scalar_field(node, &self.config.card_id);
        if id.is_empty() {
            tracing::debug!(field = %self.config.card_id, "skipping card node without id");
            return 0;
        }
        let name = scalar_field(node, &self.config.card_name);

        let properties: Properties = self
            .schema
            .properties()
            .iter()
            .map(|def| {
                let value = extract(node, def);
                (def.name.clone(), PropertyValue::new(Arc::clone(def), value))
            })
            .collect();
        let properties = Arc::new(properties);

        let set_codes = self.resolve_set_codes(node, default_set_code);
        let per_set_ids = set_codes.len() > 1;

        for set_code in &set_codes {
            let key = if per_set_ids {
                format!("{id}_{set_code}")
            } else {
                id.clone()
            };
            let is_reprint = self.registry.mark_name_seen(&name);

            self.registry.upsert_card(Card {
                id: key,
                name: name.clone(),
                set_code: set_code.clone(),
                properties: Arc::clone(&properties),
                is_reprint,
            });
            self.registry.ensure_set(set_code);
        }

        set_codes.len()
    }

    fn resolve_set_codes(&self, node: &Value, default_set_code: &str) -> SetCodes {
        let mut codes = SetCodes::new();

        if self.config.reprints_in_card_object_list {
            if let Some(Value::Array(sets)) = node.get(&self.config.card_set) {
                for set in sets {
                    let code = scalar_field(set, &self.config.set_code);
                    let code = if code.is_empty() {
                        Set::DEFAULT_CODE.to_string()
                    } else {
                        code
                    };
                    if !codes.contains(&code) {
                        codes.push(code);
                    }
                }
            }
        } else {
            let code = scalar_field(node, &self.config.card_set);
            if !code.is_empty() {
                codes.push(code);
            }
        }

        if codes.is_empty() {
            codes.push(default_set_code.to_string());
        }
        codes
    }
}
