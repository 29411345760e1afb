//! Load sessions.
//!
//! A `GameSession` owns everything one game load produces: the definition,
//! the schema built from it, and the registry. Loading is sequential:
//!
//! 1. game definition (unless supplied up front)
//! 2. card feed pages in ascending order
//! 3. set feed
//!
//! Later steps depend on registry state left by earlier ones. A failing
//! document is recorded and skipped; whatever was already ingested stays.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cards::{Card, CardRegistry};
use crate::document::{DocumentLoader, DocumentSource, LoadSummary};
use crate::error::{LoadError, Result};
use crate::ingest::Ingestor;
use crate::query::CardFilter;
use crate::schema::{GameDef, GamePaths, PropertySchema};

/// One game's load session.
#[derive(Debug)]
pub struct GameSession<S> {
    source: S,
    games_dir: PathBuf,
    game: GameDef,
    read_definition: bool,
    schema: Arc<PropertySchema>,
    registry: CardRegistry,
    errors: Vec<String>,
    loaded: bool,
}

impl<S: DocumentSource> GameSession<S> {
    /// Session that reads `<games_dir>/<name>/<name>.json` on load.
    pub fn new(source: S, games_dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self::build(source, games_dir.into(), GameDef::new(name), true)
    }

    /// Session for a definition that is already in memory.
    pub fn with_game(source: S, games_dir: impl Into<PathBuf>, game: GameDef) -> Self {
        Self::build(source, games_dir.into(), game, false)
    }

    fn build(source: S, games_dir: PathBuf, game: GameDef, read_definition: bool) -> Self {
        Self {
            source,
            games_dir,
            schema: Arc::new(game.schema()),
            game,
            read_definition,
            registry: CardRegistry::new(),
            errors: Vec::new(),
            loaded: false,
        }
    }

    /// Load the game from scratch.
    ///
    /// A definition failure stops the load at once. A failing card page
    /// stops the remaining pages but the set feed is still loaded. Every
    /// failure is recorded in `errors()` and leaves `is_loaded()` false; the
    /// first one is returned once all steps have run, and cards ingested
    /// before it stay available.
    pub fn load(&mut self) -> Result<()> {
        self.loaded = false;
        self.registry.clear();

        if self.read_definition {
            if let Err(e) = self.read_game_definition() {
                self.record(&e);
                return Err(e);
            }
        }
        if let Err(e) = self.game.validate() {
            self.record(&e);
            return Err(e);
        }
        self.schema = Arc::new(self.game.schema());

        let cards = self.load_card_pages();
        let sets = self.load_sets();
        self.loaded = cards.is_ok() && sets.is_ok();

        tracing::info!(
            game = %self.game.name,
            cards = self.registry.len(),
            sets = self.registry.set_count(),
            loaded = self.loaded,
            "game load finished"
        );
        cards.and(sets)
    }

    fn read_game_definition(&mut self) -> Result<()> {
        let path = self.paths().config;
        let text = self
            .source
            .read(&path)?
            .ok_or_else(|| LoadError::config(format!("game definition {} not found", path.display())))?;
        let mut game: GameDef =
            serde_json::from_str(&text).map_err(|e| LoadError::json(&path, e))?;

        if game.name != self.game.name {
            tracing::warn!(
                directory = %self.game.name,
                declared = %game.name,
                "game definition declares a different name; keeping the directory name"
            );
            game.name = self.game.name.clone();
        }
        self.game = game;
        Ok(())
    }

    fn load_card_pages(&mut self) -> Result<()> {
        let paths = self.paths();
        let loader = DocumentLoader::new().with_pagination(self.game.pagination());

        let mut page = Some(1);
        while let Some(current) = page {
            match self.load_document(&loader, &paths.card_page(current), DocumentKind::Cards) {
                Ok(Some(summary)) => {
                    if let Some(count) = summary.page_count {
                        self.game.all_cards_url_page_count = count;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    self.record(&e);
                    return Err(e);
                }
            }
            page = next_page(current, self.game.all_cards_url_page_count);
        }
        Ok(())
    }

    fn load_sets(&mut self) -> Result<()> {
        let path = self.paths().sets;
        match self.load_document(&DocumentLoader::new(), &path, DocumentKind::Sets) {
            Ok(_) => Ok(()),
            Err(e) => {
                self.record(&e);
                Err(e)
            }
        }
    }

    fn load_document(
        &mut self,
        loader: &DocumentLoader,
        path: &Path,
        kind: DocumentKind,
    ) -> Result<Option<LoadSummary>> {
        let config = self.game.ingest_config();
        let mut ingestor = Ingestor::new(&config, &self.schema, &mut self.registry);

        let summary = match kind {
            DocumentKind::Cards => loader.load_path(
                &self.source,
                path,
                &self.game.card_data_identifier,
                |node, default_set| {
                    ingestor.ingest_card(node, default_set);
                },
            )?,
            DocumentKind::Sets => loader.load_path(
                &self.source,
                path,
                &self.game.set_data_identifier,
                |node, default_set| {
                    ingestor.ingest_set(node, default_set);
                },
            )?,
        };

        if let Some(summary) = &summary {
            tracing::debug!(
                path = %path.display(),
                elements = summary.elements,
                "document loaded"
            );
        }
        Ok(summary)
    }

    fn record(&mut self, error: &LoadError) {
        tracing::warn!(game = %self.game.name, %error, "load error");
        self.errors.push(error.to_string());
    }

    /// File layout of this game.
    #[must_use]
    pub fn paths(&self) -> GamePaths {
        self.game.paths(&self.games_dir)
    }

    /// Game definition.
    #[must_use]
    pub fn game(&self) -> &GameDef {
        &self.game
    }

    /// Property schema.
    #[must_use]
    pub fn schema(&self) -> &PropertySchema {
        &self.schema
    }

    /// Loaded cards and sets.
    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Whether the last `load` finished without errors.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Errors recorded so far, oldest first.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Recorded errors as one message, one line per error.
    #[must_use]
    pub fn error_text(&self) -> String {
        self.errors.join("\n")
    }

    /// Run a filter over the loaded cards.
    pub fn filter<'a>(&'a self, filter: &'a CardFilter) -> impl Iterator<Item = &'a Card> + 'a {
        filter.filter(&self.registry, &self.schema)
    }

    /// Image URL for a card.
    #[must_use]
    pub fn card_image_url(&self, card: &Card) -> String {
        self.game.card_image_url(card)
    }

    /// Image cache path for a card.
    #[must_use]
    pub fn card_image_path(&self, card: &Card) -> PathBuf {
        self.game.card_image_path(card, &self.games_dir)
    }

    /// Read-only copy of the current catalog, cheap to take and safe to
    /// query from other threads while this session keeps loading.
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            registry: self.registry.snapshot(),
            schema: Arc::clone(&self.schema),
        }
    }
}

/// Page after `page`, if the feed has one. Page 1 is always loaded.
fn next_page(page: u32, page_count: u32) -> Option<u32> {
    page.checked_add(1).filter(|&next| next <= page_count)
}

#[derive(Clone, Copy, Debug)]
enum DocumentKind {
    Cards,
    Sets,
}

/// Frozen registry plus the schema needed to query it.
#[derive(Clone, Debug)]
pub struct CatalogSnapshot {
    registry: CardRegistry,
    schema: Arc<PropertySchema>,
}

impl CatalogSnapshot {
    /// Cards and sets at snapshot time.
    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    /// Property schema.
    #[must_use]
    pub fn schema(&self) -> &PropertySchema {
        &self.schema
    }

    /// Run a filter over the snapshot.
    pub fn filter<'a>(&'a self, filter: &'a CardFilter) -> impl Iterator<Item = &'a Card> + 'a {
        filter.filter(&self.registry, &self.schema)
    }
}
