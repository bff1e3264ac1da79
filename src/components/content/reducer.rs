use im::{HashMap, Vector};
use itertools::Itertools;

use crate::environment::model::{ContentId, ContentItem, Page, ProviderError};
use crate::environment::Environment;
use crate::store::{Debouncer, Effect};

/// Content partition of the session state.
///
/// Items live once in an id-keyed catalog; `feed`, `trending`, `favorites`
/// and `search_results` are orderings over catalog ids. Every list a given
/// id appears in therefore shows the same record, favorite flag included.
#[derive(Clone)]
pub struct ContentState {
    catalog: HashMap<ContentId, ContentItem>,
    /// The user-reorderable primary feed.
    feed: Vector<ContentId>,
    trending: Vector<ContentId>,
    /// Ordered by time of favoriting.
    favorites: Vector<ContentId>,
    search_results: Vector<ContentId>,

    pub search_query: String,
    pub is_searching: bool,
    pub page: u32,
    pub has_more: bool,
    pub loading: bool,
    /// Page-fetch failure, surfaced to the UI.
    pub error: Option<String>,
    pub trending_error: Option<String>,
    pub search_error: Option<String>,

    /// Monotonic tag for issued search requests. Responses carrying an
    /// older tag are dropped, so the last issued request always wins.
    search_seq: u64,
    last_search_debounce: Option<Debouncer>,
}

impl Default for ContentState {
    fn default() -> Self {
        Self {
            catalog: HashMap::new(),
            feed: Vector::new(),
            trending: Vector::new(),
            favorites: Vector::new(),
            search_results: Vector::new(),
            search_query: String::new(),
            is_searching: false,
            page: 1,
            has_more: true,
            loading: false,
            error: None,
            trending_error: None,
            search_error: None,
            search_seq: 0,
            last_search_debounce: None,
        }
    }
}

impl std::fmt::Debug for ContentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentState")
            .field("catalog", &self.catalog.len())
            .field("feed", &self.feed.len())
            .field("trending", &self.trending.len())
            .field("favorites", &self.favorites.len())
            .field("search_results", &self.search_results.len())
            .field("search_query", &self.search_query)
            .field("page", &self.page)
            .field("has_more", &self.has_more)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish()
    }
}

impl ContentState {
    pub fn items(&self) -> Vec<ContentItem> {
        self.resolve(&self.feed)
    }

    pub fn trending(&self) -> Vec<ContentItem> {
        self.resolve(&self.trending)
    }

    pub fn favorites(&self) -> Vec<ContentItem> {
        self.resolve(&self.favorites)
    }

    pub fn search_results(&self) -> Vec<ContentItem> {
        self.resolve(&self.search_results)
    }

    pub fn item(&self, id: &ContentId) -> Option<&ContentItem> {
        self.catalog.get(id)
    }

    pub fn is_favorite(&self, id: &ContentId) -> bool {
        self.catalog
            .get(id)
            .map(|item| item.is_favorite)
            .unwrap_or_default()
    }

    fn resolve(&self, ids: &Vector<ContentId>) -> Vec<ContentItem> {
        ids.iter()
            .filter_map(|id| self.catalog.get(id).cloned())
            .collect()
    }

    /// Refresh the catalog from a provider batch and return the batch ids
    /// in order, de-duplicated. A known id keeps its local favorite flag;
    /// the user is the only writer of that field.
    fn absorb(&mut self, items: &[ContentItem]) -> Vec<ContentId> {
        items
            .iter()
            .unique_by(|item| item.id.clone())
            .map(|item| {
                let mut entry = item.clone();
                if let Some(known) = self.catalog.get(&item.id) {
                    entry.is_favorite = known.is_favorite;
                }
                let id = entry.id.clone();
                self.catalog.insert(id.clone(), entry);
                id
            })
            .collect()
    }

    fn append_to_feed(&mut self, ids: Vec<ContentId>) {
        for id in ids {
            if !self.feed.contains(&id) {
                self.feed.push_back(id);
            }
        }
    }
}

#[derive(Clone)]
pub enum ContentAction {
    LoadPage { page: u32, categories: Vec<String> },
    LoadedPage(u32, Result<Page, ProviderError>),
    LoadTrending,
    LoadedTrending(Result<Vec<ContentItem>, ProviderError>),
    ToggleFavorite(ContentId),
    Reorder { from: usize, to: usize },
    /// Raw search input from the UI. Empty input clears the search,
    /// anything else stores the query and schedules a debounced request.
    QueryChanged(String),
    SetSearchQuery(String),
    ClearSearch,
    LoadedSearch(u64, Option<Result<Vec<ContentItem>, ProviderError>>),
}

impl std::fmt::Debug for ContentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoadPage { page, .. } => f.debug_tuple("LoadPage").field(page).finish(),
            Self::LoadedPage(page, _) => f.debug_tuple("LoadedPage").field(page).finish(),
            Self::LoadTrending => write!(f, "LoadTrending"),
            Self::LoadedTrending(_) => f.debug_tuple("LoadedTrending").finish(),
            Self::ToggleFavorite(id) => f.debug_tuple("ToggleFavorite").field(id).finish(),
            Self::Reorder { from, to } => {
                f.debug_tuple("Reorder").field(from).field(to).finish()
            }
            Self::QueryChanged(term) => f.debug_tuple("QueryChanged").field(term).finish(),
            Self::SetSearchQuery(term) => f.debug_tuple("SetSearchQuery").field(term).finish(),
            Self::ClearSearch => write!(f, "ClearSearch"),
            Self::LoadedSearch(seq, result) => f
                .debug_tuple("LoadedSearch")
                .field(seq)
                .field(&result.is_some())
                .finish(),
        }
    }
}

pub fn reduce(
    action: ContentAction,
    state: &mut ContentState,
    environment: &Environment,
) -> Effect<'static, ContentAction> {
    log::trace!("{action:?}");
    let provider = environment.provider.clone();

    match action {
        ContentAction::LoadPage { page, categories } => {
            state.loading = true;
            state.error = None;
            Effect::future(
                async move { provider.fetch_page(page, categories).await },
                move |result| ContentAction::LoadedPage(page, result),
            )
        }
        ContentAction::LoadedPage(page, result) => {
            state.loading = false;
            match result {
                Ok(batch) => {
                    let ids = state.absorb(&batch.items);
                    if page <= 1 {
                        state.feed = ids.into_iter().collect();
                    } else {
                        state.append_to_feed(ids);
                    }
                    state.page = page;
                    state.has_more = batch.has_more;
                }
                Err(e) => {
                    // A failed later page leaves the loaded ones alone.
                    state.error = Some(e.to_string());
                }
            }
            Effect::NONE
        }
        ContentAction::LoadTrending => Effect::future(
            async move { provider.fetch_trending().await },
            ContentAction::LoadedTrending,
        ),
        ContentAction::LoadedTrending(result) => {
            match result {
                Ok(items) => {
                    let ids = state.absorb(&items);
                    state.trending = ids.into_iter().collect();
                    state.trending_error = None;
                }
                Err(e) => state.trending_error = Some(e.to_string()),
            }
            Effect::NONE
        }
        ContentAction::ToggleFavorite(id) => {
            let Some(item) = state.catalog.get_mut(&id) else {
                // Unknown ids are ignored, not an error.
                return Effect::NONE;
            };
            item.is_favorite = !item.is_favorite;
            let favorite = item.is_favorite;
            if favorite {
                if !state.favorites.contains(&id) {
                    state.favorites.push_back(id);
                }
            } else {
                state.favorites.retain(|entry| entry != &id);
            }
            Effect::NONE
        }
        ContentAction::Reorder { from, to } => {
            if from >= state.feed.len() || to >= state.feed.len() {
                log::warn!("Dropping reorder with out-of-range indices {from} -> {to}");
                return Effect::NONE;
            }
            let id = state.feed.remove(from);
            state.feed.insert(to, id);
            Effect::NONE
        }
        ContentAction::QueryChanged(term) => {
            if term.is_empty() {
                return Effect::action(ContentAction::ClearSearch);
            }
            if let Some(debounce) = state.last_search_debounce.as_ref() {
                debounce.cancel();
            }
            let debounce = Debouncer::default();
            state.last_search_debounce = Some(debounce.clone());
            state.is_searching = true;
            state.search_seq += 1;
            let seq = state.search_seq;
            let query = term.clone();
            Effect::merge2(
                Effect::action(ContentAction::SetSearchQuery(term)),
                Effect::debounce(
                    async move { provider.search(query).await },
                    move |result| ContentAction::LoadedSearch(seq, result),
                    environment.config.search_debounce,
                    debounce,
                ),
            )
        }
        ContentAction::SetSearchQuery(term) => {
            state.search_query = term;
            Effect::NONE
        }
        ContentAction::ClearSearch => {
            if let Some(debounce) = state.last_search_debounce.take() {
                debounce.cancel();
            }
            // Invalidate whatever is still in flight.
            state.search_seq += 1;
            state.search_query = String::new();
            state.search_results = Vector::new();
            state.is_searching = false;
            state.search_error = None;
            Effect::NONE
        }
        ContentAction::LoadedSearch(seq, result) => {
            if seq != state.search_seq {
                log::trace!("Dropping stale search response {seq}");
                return Effect::NONE;
            }
            match result {
                Some(Ok(items)) => {
                    state.is_searching = false;
                    state.search_error = None;
                    let ids = state.absorb(&items);
                    state.search_results = ids.into_iter().collect();
                }
                Some(Err(e)) => {
                    state.is_searching = false;
                    state.search_error = Some(e.to_string());
                }
                None => {
                    // Superseded before the quiet period elapsed.
                }
            }
            Effect::NONE
        }
    }
}
