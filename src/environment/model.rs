use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use url::Url;

/// Provider-assigned identifier of a content item. Never reassigned.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Default, Serialize, Deserialize)]
pub struct ContentId(pub String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        ContentId(id.into())
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("ContentID:{}", self.0))
    }
}

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    News,
    Movie,
    Social,
}

/// One piece of aggregated content, as the provider hands it out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ContentId,
    pub kind: ContentKind,
    pub title: String,
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub external_url: Option<Url>,
    /// Free-form classification, matched against the subscribed categories.
    pub category: String,
    pub published_at: DateTime<Utc>,
    /// The only field that changes after creation, and only by the user.
    #[serde(default)]
    pub is_favorite: bool,
}

impl PartialEq for ContentItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.is_favorite == other.is_favorite
    }
}

impl Eq for ContentItem {}

/// One page of the primary feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<ContentItem>,
    pub has_more: bool,
}

/// Transport/availability failure reported by a provider.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ProviderError(String);

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        ProviderError(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Provider Error: {}", self.0)
    }
}

impl std::error::Error for ProviderError {}

impl From<&str> for ProviderError {
    fn from(value: &str) -> Self {
        ProviderError(value.to_string())
    }
}

impl From<String> for ProviderError {
    fn from(value: String) -> Self {
        ProviderError(value)
    }
}

/// The capability the content core depends on. Pages are 1-based; an empty
/// category set means "everything". Callers never submit an empty search
/// query.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn fetch_page(&self, page: u32, categories: Vec<String>) -> Result<Page, ProviderError>;

    async fn fetch_trending(&self) -> Result<Vec<ContentItem>, ProviderError>;

    async fn search(&self, query: String) -> Result<Vec<ContentItem>, ProviderError>;
}

/// Cloneable handle the reducers move into their effect futures.
#[derive(Clone)]
pub struct Provider {
    inner: Arc<dyn ContentProvider>,
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider").finish()
    }
}

impl Provider {
    pub fn new(provider: impl ContentProvider + 'static) -> Self {
        Self {
            inner: Arc::new(provider),
        }
    }

    pub async fn fetch_page(
        &self,
        page: u32,
        categories: Vec<String>,
    ) -> Result<Page, ProviderError> {
        log::trace!("Fetch Page {page}");
        self.inner
            .fetch_page(page, categories)
            .await
            .log_error("fetch_page")
    }

    pub async fn fetch_trending(&self) -> Result<Vec<ContentItem>, ProviderError> {
        log::trace!("Fetch Trending");
        self.inner.fetch_trending().await.log_error("fetch_trending")
    }

    pub async fn search(&self, query: String) -> Result<Vec<ContentItem>, ProviderError> {
        log::trace!("Search {query:?}");
        self.inner.search(query).await.log_error("search")
    }
}

trait ResultExt {
    type Output;
    fn log_error(self, call: &'static str) -> Result<Self::Output, ProviderError>;
}

impl<T> ResultExt for Result<T, ProviderError> {
    type Output = T;
    fn log_error(self, call: &'static str) -> Result<T, ProviderError> {
        self.map_err(|e| {
            log::error!("API Error: {call} {e}");
            e
        })
    }
}
