//! Read-through content service over the document store.
//!
//! Every read goes through [`DocumentCache`]; a miss or expired entry reloads
//! the whole document from the store. Unreadable or unparsable documents never
//! fail the caller: the compiled-in default is returned as [`Loaded::Defaulted`]
//! and nothing is cached, so the next call retries. Member-level mismatches are
//! repaired by [`super::decode`] instead of discarding the document.

use std::sync::Arc;

use metrics::counter;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cache::{CacheConfig, DocumentCache},
    domain::{
        ads::Ad,
        content::{FooterContent, HomepageContent},
        documents::Document,
        games::{Category, FeaturedGame, Game, LightweightGame},
        seo::SeoSettingsDocument,
    },
    infra::store::{DocumentStore, StoreError},
};

use super::decode;

const SOURCE: &str = "application::content::ContentService";

/// Why a read fell back to its default.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("`{document}` does not match the expected shape: {source}")]
    Shape {
        document: Document,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of a document read.
#[derive(Debug)]
pub enum Loaded<T> {
    Fresh(T),
    Defaulted { data: T, cause: LoadError },
}

impl<T> Loaded<T> {
    pub fn into_inner(self) -> T {
        match self {
            Loaded::Fresh(data) | Loaded::Defaulted { data, .. } => data,
        }
    }

    pub fn data(&self) -> &T {
        match self {
            Loaded::Fresh(data) | Loaded::Defaulted { data, .. } => data,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, Loaded::Defaulted { .. })
    }

    pub fn cause(&self) -> Option<&LoadError> {
        match self {
            Loaded::Fresh(_) => None,
            Loaded::Defaulted { cause, .. } => Some(cause),
        }
    }
}

/// Log and count a fallback, then hand back the default.
pub(crate) fn defaulted<T>(
    source: &'static str,
    document: Document,
    default: T,
    cause: LoadError,
) -> Loaded<T> {
    warn!(
        target_module = source,
        document = %document,
        error = %cause,
        "Serving default content"
    );
    counter!("arcadia_document_default_total", "document" => document.file_name()).increment(1);
    Loaded::Defaulted {
        data: default,
        cause,
    }
}

pub(crate) fn encode<T: Serialize + ?Sized>(
    document: Document,
    data: &T,
) -> Result<Value, StoreError> {
    serde_json::to_value(data).map_err(|source| StoreError::Encode { document, source })
}

pub struct ContentService {
    store: Arc<dyn DocumentStore>,
    cache: DocumentCache,
}

impl ContentService {
    pub fn new(store: Arc<dyn DocumentStore>, config: &CacheConfig) -> Self {
        Self {
            store,
            cache: DocumentCache::new(config),
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Read a single-record document through the cache, substituting `default`
    /// when it cannot be read at all.
    pub async fn load<T>(&self, document: Document, default: T) -> Loaded<T>
    where
        T: Serialize + DeserializeOwned,
    {
        self.load_with(document, default, |value, default| {
            decode::record(document, value, default)
        })
        .await
    }

    /// Read a list document through the cache. Malformed records are dropped
    /// individually; only an unreadable file or a non-array falls back to empty.
    pub async fn load_list<T>(&self, document: Document) -> Loaded<Vec<T>>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        self.load_with(document, Vec::new(), |value, _| {
            decode::records(document, value)
        })
        .await
    }

    async fn load_with<T, F>(&self, document: Document, default: T, parse: F) -> Loaded<T>
    where
        T: Serialize,
        F: Fn(&Value, &T) -> Result<T, LoadError>,
    {
        if let Some(cached) = self.cache.get(document) {
            return match parse(&*cached, &default) {
                Ok(data) => Loaded::Fresh(data),
                Err(cause) => defaulted(SOURCE, document, default, cause),
            };
        }

        let value = match self.store.read(document).await {
            Ok(value) => value,
            Err(err) => return defaulted(SOURCE, document, default, err.into()),
        };

        match parse(&value, &default) {
            Ok(data) => {
                // Cache the repaired form so hits decode cleanly.
                let normalized = serde_json::to_value(&data).unwrap_or(value);
                debug!(document = %document, "Document loaded into cache");
                self.cache.insert(document, Arc::new(normalized));
                Loaded::Fresh(data)
            }
            Err(cause) => defaulted(SOURCE, document, default, cause),
        }
    }

    /// Replace a document on disk, then evict its cache entry.
    pub async fn save<T: Serialize + ?Sized>(
        &self,
        document: Document,
        data: &T,
    ) -> Result<(), StoreError> {
        let value = encode(document, data)?;
        self.store.write(document, &value).await?;

        self.cache.evict(document);
        if document == Document::Games {
            self.cache.reset_lightweight_games();
        }
        debug!(document = %document, "Document saved and evicted");
        Ok(())
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
        debug!("Document cache cleared");
    }

    pub async fn homepage_content(&self) -> Loaded<HomepageContent> {
        self.load(Document::HomepageContent, HomepageContent::default())
            .await
    }

    pub async fn ads(&self) -> Loaded<Vec<Ad>> {
        self.load_list(Document::Ads).await
    }

    pub async fn games(&self) -> Loaded<Vec<Game>> {
        self.load_list(Document::Games).await
    }

    /// Reduced-field view of every game, cached separately from `games.json`.
    ///
    /// The projection is only cached when it was built from a successfully
    /// loaded document.
    pub async fn lightweight_games(&self) -> Arc<Vec<LightweightGame>> {
        if let Some(projection) = self.cache.lightweight_games() {
            return projection;
        }

        let loaded = self.games().await;
        let projection: Arc<Vec<LightweightGame>> =
            Arc::new(loaded.data().iter().map(LightweightGame::from).collect());
        counter!("arcadia_projection_rebuild_total").increment(1);

        if !loaded.is_defaulted() {
            self.cache.set_lightweight_games(Arc::clone(&projection));
        }
        projection
    }

    pub async fn game_by_id(&self, id: &str) -> Option<Game> {
        self.games()
            .await
            .into_inner()
            .into_iter()
            .find(|game| game.id == id)
    }

    pub async fn categories(&self) -> Loaded<Vec<Category>> {
        self.load_list(Document::Categories).await
    }

    pub async fn featured_games(&self) -> Loaded<Vec<FeaturedGame>> {
        self.load_list(Document::FeaturedGames).await
    }

    pub async fn seo_settings(&self) -> Loaded<SeoSettingsDocument> {
        self.load(Document::SeoSettings, SeoSettingsDocument::default())
            .await
    }

    pub async fn footer_content(&self) -> Loaded<FooterContent> {
        self.load(Document::FooterContent, FooterContent::default())
            .await
    }

    pub async fn save_homepage_content(&self, content: &HomepageContent) -> Result<(), StoreError> {
        self.save(Document::HomepageContent, content).await
    }

    pub async fn save_ads(&self, ads: &[Ad]) -> Result<(), StoreError> {
        self.save(Document::Ads, ads).await
    }

    pub async fn save_seo_settings(&self, settings: &SeoSettingsDocument) -> Result<(), StoreError> {
        self.save(Document::SeoSettings, settings).await
    }

    pub async fn save_footer_content(&self, content: &FooterContent) -> Result<(), StoreError> {
        self.save(Document::FooterContent, content).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::infra::store::FileStore;

    fn service(dir: &std::path::Path) -> ContentService {
        ContentService::new(Arc::new(FileStore::new(dir)), &CacheConfig::default())
    }

    #[tokio::test]
    async fn missing_document_yields_default_with_cause() {
        let dir = tempfile::tempdir().expect("tempdir");
        let content = service(dir.path());

        let loaded = content.ads().await;

        assert!(loaded.is_defaulted());
        assert!(matches!(
            loaded.cause(),
            Some(LoadError::Store(StoreError::Read { .. }))
        ));
        assert!(loaded.into_inner().is_empty());
    }

    #[tokio::test]
    async fn wrong_shape_is_reported_as_shape_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("games.json"), r#"{"not":"a list"}"#).expect("seed");
        let content = service(dir.path());

        let loaded = content.games().await;

        assert!(matches!(loaded.cause(), Some(LoadError::Shape { .. })));
        assert!(loaded.data().is_empty());
    }

    #[tokio::test]
    async fn game_by_id_finds_inactive_records_too() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("games.json"),
            json!([
                { "id": "a", "name": "A", "isActive": true },
                { "id": "b", "name": "B", "isActive": false }
            ])
            .to_string(),
        )
        .expect("seed");
        let content = service(dir.path());

        let game = content.game_by_id("b").await.expect("present");
        assert!(!game.is_active);
        assert!(content.game_by_id("zzz").await.is_none());
    }

    #[tokio::test]
    async fn saving_games_resets_the_projection() {
        let dir = tempfile::tempdir().expect("tempdir");
        let content = service(dir.path());
        content
            .save(Document::Games, &json!([{ "id": "a", "name": "A" }]))
            .await
            .expect("save");
        assert_eq!(content.lightweight_games().await.len(), 1);

        content
            .save(
                Document::Games,
                &json!([{ "id": "a", "name": "A" }, { "id": "b", "name": "B" }]),
            )
            .await
            .expect("save");

        assert_eq!(content.lightweight_games().await.len(), 2);
    }
}
