//! Game definition documents.
//!
//! A `GameDef` is the persisted configuration of one game: where its feeds
//! live, which JSON fields carry card and set identity, and the property
//! schema. Every field has a default so a partial document is valid.
//!
//! The engine never hardcodes the shape of card data beyond the identifiers
//! configured here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{EnumDef, PropertyDef, PropertySchema};
use crate::cards::{Card, Set};
use crate::document::Pagination;
use crate::error::{LoadError, Result};
use crate::ingest::IngestConfig;

const CARDS_FILE: &str = "AllCards.json";
const SETS_FILE: &str = "AllSets.json";
const BACKGROUND_FILE: &str = "Background";
const CARD_BACK_FILE: &str = "CardBack";

/// Downloadable deck shipped with a game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckUrl {
    pub name: String,
    pub url: String,
}

/// Downloadable game board image.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameBoardUrl {
    pub id: String,
    pub url: String,
}

/// Per-game configuration document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameDef {
    pub name: String,

    // === Card feed ===
    pub all_cards_url: String,
    pub all_cards_url_page_count: u32,
    pub all_cards_url_page_count_identifier: String,
    pub all_cards_url_page_count_divisor: u32,
    pub all_cards_url_page_identifier: String,
    /// Handled by the retrieval collaborator before text reaches the loader.
    pub all_cards_url_wrapped: bool,
    pub all_cards_url_zipped: bool,

    // === Set feed ===
    pub all_sets_url: String,
    pub all_sets_url_wrapped: bool,
    pub all_sets_url_zipped: bool,

    pub auto_update: bool,
    pub auto_update_url: String,

    // === Images ===
    pub background_image_file_type: String,
    pub background_image_url: String,
    pub card_back_image_file_type: String,
    pub card_back_image_url: String,
    pub card_image_file_type: String,
    pub card_image_property: String,
    pub card_image_url: String,

    // === Identifiers ===
    pub card_data_identifier: String,
    pub card_id_identifier: String,
    pub card_name_identifier: String,
    pub card_set_identifier: String,
    pub card_primary_property: String,
    pub set_data_identifier: String,
    pub set_code_identifier: String,
    pub set_name_identifier: String,
    pub set_cards_identifier: String,
    pub reprints_in_card_object_list: bool,

    // === Schema ===
    pub card_properties: Vec<PropertyDef>,
    pub enums: Vec<EnumDef>,

    // === Extras ===
    pub deck_max_count: u32,
    pub deck_urls: Vec<DeckUrl>,
    pub game_board_urls: Vec<GameBoardUrl>,
    pub rules_url: String,
}

impl Default for GameDef {
    fn default() -> Self {
        Self {
            name: Set::DEFAULT_CODE.to_string(),
            all_cards_url: String::new(),
            all_cards_url_page_count: 1,
            all_cards_url_page_count_identifier: String::new(),
            all_cards_url_page_count_divisor: 1,
            all_cards_url_page_identifier: "?page=".to_string(),
            all_cards_url_wrapped: false,
            all_cards_url_zipped: false,
            all_sets_url: String::new(),
            all_sets_url_wrapped: false,
            all_sets_url_zipped: false,
            auto_update: false,
            auto_update_url: String::new(),
            background_image_file_type: "png".to_string(),
            background_image_url: String::new(),
            card_back_image_file_type: "png".to_string(),
            card_back_image_url: String::new(),
            card_image_file_type: "png".to_string(),
            card_image_property: String::new(),
            card_image_url: String::new(),
            card_data_identifier: String::new(),
            card_id_identifier: "id".to_string(),
            card_name_identifier: "name".to_string(),
            card_set_identifier: "set".to_string(),
            card_primary_property: String::new(),
            set_data_identifier: String::new(),
            set_code_identifier: "code".to_string(),
            set_name_identifier: "name".to_string(),
            set_cards_identifier: "cards".to_string(),
            reprints_in_card_object_list: false,
            card_properties: Vec::new(),
            enums: Vec::new(),
            deck_max_count: 75,
            deck_urls: Vec::new(),
            game_board_urls: Vec::new(),
            rules_url: String::new(),
        }
    }
}

/// File layout of one game under a games directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GamePaths {
    pub base: PathBuf,
    pub config: PathBuf,
    pub cards: PathBuf,
    pub sets: PathBuf,
    pub background_image: PathBuf,
    pub card_back_image: PathBuf,
    pub decks: PathBuf,
    pub boards: PathBuf,
}

impl GamePaths {
    /// File holding a given page of the card feed. Page 1 is the main file.
    #[must_use]
    pub fn card_page(&self, page: u32) -> PathBuf {
        if page <= 1 {
            self.cards.clone()
        } else {
            self.base.join(format!("{CARDS_FILE}{page}"))
        }
    }
}

impl GameDef {
    /// Create a definition with default identifiers.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a game definition document.
    pub fn from_json(text: &str) -> Result<Self> {
        let game: Self =
            serde_json::from_str(text).map_err(|e| LoadError::json("<game definition>", e))?;
        game.validate()?;
        Ok(game)
    }

    /// Check fields the loader relies on.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(LoadError::config("game name is empty"));
        }
        if self.name.contains(['/', '\\']) || self.name == ".." {
            return Err(LoadError::config(format!(
                "game name '{}' is not a valid directory name",
                self.name
            )));
        }
        Ok(())
    }

    /// Add a card property (builder pattern).
    #[must_use]
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.card_properties.push(property);
        self
    }

    /// Add an enum (builder pattern).
    #[must_use]
    pub fn with_enum(mut self, def: EnumDef) -> Self {
        self.enums.push(def);
        self
    }

    /// Locate card elements under a named child of the cards document.
    #[must_use]
    pub fn with_card_data_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.card_data_identifier = identifier.into();
        self
    }

    /// Locate set elements under a named child of the sets document.
    #[must_use]
    pub fn with_set_data_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.set_data_identifier = identifier.into();
        self
    }

    /// Read the card's sets from a list of set objects.
    #[must_use]
    pub fn with_reprints_in_card_object_list(mut self) -> Self {
        self.reprints_in_card_object_list = true;
        self
    }

    /// Configure page-count discovery for the card feed.
    #[must_use]
    pub fn with_page_count_identifier(mut self, identifier: impl Into<String>, divisor: u32) -> Self {
        self.all_cards_url_page_count_identifier = identifier.into();
        self.all_cards_url_page_count_divisor = divisor;
        self
    }

    /// Build the property schema.
    #[must_use]
    pub fn schema(&self) -> PropertySchema {
        PropertySchema::new(self.card_properties.clone(), self.enums.clone())
    }

    /// Identifiers used by the card and set ingestors.
    #[must_use]
    pub fn ingest_config(&self) -> IngestConfig {
        IngestConfig {
            card_id: self.card_id_identifier.clone(),
            card_name: self.card_name_identifier.clone(),
            card_set: self.card_set_identifier.clone(),
            set_code: self.set_code_identifier.clone(),
            set_name: self.set_name_identifier.clone(),
            set_cards: self.set_cards_identifier.clone(),
            reprints_in_card_object_list: self.reprints_in_card_object_list,
        }
    }

    /// Page-count discovery settings for the card feed.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination {
            count_identifier: self.all_cards_url_page_count_identifier.clone(),
            divisor: self.all_cards_url_page_count_divisor,
        }
    }

    /// File layout of this game under `games_dir`.
    #[must_use]
    pub fn paths(&self, games_dir: &Path) -> GamePaths {
        let base = games_dir.join(&self.name);
        GamePaths {
            config: base.join(format!("{}.json", self.name)),
            cards: base.join(CARDS_FILE),
            sets: base.join(SETS_FILE),
            background_image: base.join(format!(
                "{BACKGROUND_FILE}.{}",
                self.background_image_file_type
            )),
            card_back_image: base.join(format!(
                "{CARD_BACK_FILE}.{}",
                self.card_back_image_file_type
            )),
            decks: base.join("decks"),
            boards: base.join("boards"),
            base,
        }
    }

    /// Feed URLs for every card page, in fetch order.
    #[must_use]
    pub fn card_page_urls(&self) -> Vec<String> {
        if self.all_cards_url.is_empty() {
            return Vec::new();
        }
        if self.all_cards_url_page_count <= 1 {
            return vec![self.all_cards_url.clone()];
        }
        (1..=self.all_cards_url_page_count)
            .map(|page| {
                format!(
                    "{}{}{}",
                    self.all_cards_url, self.all_cards_url_page_identifier, page
                )
            })
            .collect()
    }

    /// Image URL for a card.
    ///
    /// A non-empty value of the configured image property wins; otherwise the
    /// image URL template is filled in.
    #[must_use]
    pub fn card_image_url(&self, card: &Card) -> String {
        if !self.card_image_property.is_empty() {
            let value = card.property_str(&self.card_image_property);
            if !value.is_empty() {
                return value.to_string();
            }
        }
        self.card_image_url
            .replace("{cardId}", &card.id)
            .replace("{cardName}", &card.name)
            .replace("{cardSet}", &card.set_code)
            .replace("{cardImageFileType}", &self.card_image_file_type)
    }

    /// Local cache path for a card's image.
    #[must_use]
    pub fn card_image_path(&self, card: &Card, games_dir: &Path) -> PathBuf {
        games_dir
            .join(&self.name)
            .join("sets")
            .join(&card.set_code)
            .join(format!("{}.{}", card.id, self.card_image_file_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PropertyKind;

    #[test]
    fn test_defaults() {
        let game = GameDef::default();
        assert_eq!(game.card_id_identifier, "id");
        assert_eq!(game.card_name_identifier, "name");
        assert_eq!(game.card_set_identifier, "set");
        assert_eq!(game.set_cards_identifier, "cards");
        assert_eq!(game.all_cards_url_page_count, 1);
        assert_eq!(game.deck_max_count, 75);
    }

    #[test]
    fn test_from_json_partial() {
        let game = GameDef::from_json(
            r#"{
                "name": "Standard",
                "cardIdIdentifier": "uuid",
                "cardDataIdentifier": "data",
                "cardProperties": [
                    {"name": "cost", "type": "Integer"},
                    {"name": "colors", "type": "StringEnumList", "empty": "none"}
                ],
                "enums": [
                    {"property": "colors", "values": {"R": "Red", "G": "Green"}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(game.name, "Standard");
        assert_eq!(game.card_id_identifier, "uuid");
        assert_eq!(game.card_name_identifier, "name");
        assert_eq!(game.card_properties.len(), 2);
        assert_eq!(game.card_properties[1].kind, PropertyKind::StringEnumList);

        let schema = game.schema();
        assert_eq!(schema.enum_def("colors").unwrap().flag("G"), Some(2));
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            GameDef::from_json("{not json"),
            Err(LoadError::Json { .. })
        ));
        assert!(matches!(
            GameDef::from_json(r#"{"name": "../escape"}"#),
            Err(LoadError::Config(_))
        ));
    }

    #[test]
    fn test_paths() {
        let game = GameDef::new("Arcmage");
        let paths = game.paths(Path::new("/games"));

        assert_eq!(paths.config, Path::new("/games/Arcmage/Arcmage.json"));
        assert_eq!(paths.cards, Path::new("/games/Arcmage/AllCards.json"));
        assert_eq!(paths.card_page(1), paths.cards);
        assert_eq!(paths.card_page(3), Path::new("/games/Arcmage/AllCards.json3"));
        assert_eq!(paths.sets, Path::new("/games/Arcmage/AllSets.json"));
        assert_eq!(paths.card_back_image, Path::new("/games/Arcmage/CardBack.png"));
    }

    #[test]
    fn test_card_page_urls() {
        let mut game = GameDef::new("Paged");
        assert!(game.card_page_urls().is_empty());

        game.all_cards_url = "https://cards.example/api".to_string();
        assert_eq!(game.card_page_urls(), vec!["https://cards.example/api"]);

        game.all_cards_url_page_count = 3;
        assert_eq!(
            game.card_page_urls(),
            vec![
                "https://cards.example/api?page=1",
                "https://cards.example/api?page=2",
                "https://cards.example/api?page=3",
            ]
        );
    }

    #[test]
    fn test_card_image_url() {
        let mut game = GameDef::new("Images");
        game.card_image_url = "https://img.example/{cardSet}/{cardId}.{cardImageFileType}".into();
        let card = Card::new("A1", "Bolt", "CORE");

        assert_eq!(game.card_image_url(&card), "https://img.example/CORE/A1.png");
        assert_eq!(
            game.card_image_path(&card, Path::new("/games")),
            Path::new("/games/Images/sets/CORE/A1.png")
        );
    }

    #[test]
    fn test_card_image_property_wins() {
        let mut game = GameDef::new("Images")
            .with_property(PropertyDef::new("image", PropertyKind::String));
        game.card_image_url = "https://img.example/{cardId}".into();
        game.card_image_property = "image".into();
        let schema = game.schema();

        let plain = Card::new("A1", "Bolt", "CORE");
        assert_eq!(game.card_image_url(&plain), "https://img.example/A1");

        let with_image = Card::new("A2", "Shock", "CORE")
            .with_property(schema.property("image").unwrap().clone(), "https://cdn.example/a2.jpg");
        assert_eq!(game.card_image_url(&with_image), "https://cdn.example/a2.jpg");
    }
}
