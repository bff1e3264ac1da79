use itertools::Itertools;

use crate::components::content::{self, ContentAction, ContentState};
use crate::components::preferences::{self, PreferencesAction, PreferencesState};
use crate::components::ui::{self, Tab, UiAction, UiState};
use crate::environment::model::ContentItem;
use crate::environment::Environment;
use crate::store::Effect;
use crate::view_model::ContentCardViewModel;

/// The whole session state: one partition per concern.
#[derive(Clone, Debug, Default)]
pub struct State {
    pub content: ContentState,
    pub ui: UiState,
    pub user: PreferencesState,
}

impl State {
    /// The list the UI currently displays. An active search always shows
    /// its results, even when there are none; otherwise the active tab
    /// decides. Computed on every read, never stored.
    pub fn visible_items(&self) -> Vec<ContentItem> {
        if !self.content.search_query.is_empty() {
            return self.content.search_results();
        }
        match self.ui.active_tab {
            Tab::Feed => self.content.items(),
            Tab::Trending => self.content.trending(),
            Tab::Favorites => self.content.favorites(),
        }
    }

    pub fn visible_cards(&self) -> Vec<ContentCardViewModel> {
        self.visible_items()
            .iter()
            .map(ContentCardViewModel::new)
            .collect()
    }

    pub fn headline(&self) -> String {
        if !self.content.search_query.is_empty() {
            return format!("Search Results for \"{}\"", self.content.search_query);
        }
        match self.ui.active_tab {
            Tab::Feed => "Your Personalized Feed".to_string(),
            Tab::Trending => "Trending Content".to_string(),
            Tab::Favorites => "Your Favorites".to_string(),
        }
    }

    /// Drag reordering only applies to the feed itself.
    pub fn can_reorder(&self) -> bool {
        self.ui.active_tab.is_feed() && self.content.search_query.is_empty()
    }

    pub fn is_initial_loading(&self) -> bool {
        self.content.loading && self.visible_items().is_empty()
    }
}

#[derive(Clone)]
pub enum Action {
    Start,
    /// Re-load feed page 1 and trending for the currently subscribed
    /// categories. Dispatched by the caller, e.g. after changing them.
    Refresh,
    Content(ContentAction),
    Ui(UiAction),
    Preferences(PreferencesAction),
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "Start"),
            Self::Refresh => write!(f, "Refresh"),
            Self::Content(action) => f.debug_tuple("Content").field(action).finish(),
            Self::Ui(action) => f.debug_tuple("Ui").field(action).finish(),
            Self::Preferences(action) => f.debug_tuple("Preferences").field(action).finish(),
        }
    }
}

pub fn reduce(
    action: Action,
    state: &mut State,
    environment: &Environment,
) -> Effect<'static, Action> {
    log::trace!("{action:?}");
    match action {
        Action::Start => Effect::action(Action::Refresh),
        Action::Refresh => {
            let categories: Vec<String> = state
                .user
                .preferences
                .categories
                .iter()
                .cloned()
                .sorted()
                .collect();
            Effect::merge2(
                Effect::action(Action::Content(ContentAction::LoadPage {
                    page: 1,
                    categories,
                })),
                Effect::action(Action::Content(ContentAction::LoadTrending)),
            )
        }
        Action::Content(action) => {
            content::reduce(action, &mut state.content, environment).map(Action::Content)
        }
        Action::Ui(action) => ui::reduce(action, &mut state.ui, environment).map(Action::Ui),
        Action::Preferences(action) => {
            preferences::reduce(action, &mut state.user, environment).map(Action::Preferences)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::dashboard::DashboardReducer;
    use crate::components::preferences::PreferencesUpdate;
    use crate::environment::mock::MockContentProvider;
    use crate::environment::model::{
        ContentId, ContentProvider, Page, Provider, ProviderError,
    };
    use crate::store::Store;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn store() -> Store<DashboardReducer> {
        let environment = Environment::new(Provider::new(MockContentProvider::instant()));
        Store::new(State::default(), environment)
    }

    /// Delegates to the mock but counts search calls.
    struct CountingProvider {
        inner: MockContentProvider,
        searches: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ContentProvider for CountingProvider {
        async fn fetch_page(
            &self,
            page: u32,
            categories: Vec<String>,
        ) -> Result<Page, ProviderError> {
            self.inner.fetch_page(page, categories).await
        }

        async fn fetch_trending(&self) -> Result<Vec<crate::ContentItem>, ProviderError> {
            self.inner.fetch_trending().await
        }

        async fn search(&self, query: String) -> Result<Vec<crate::ContentItem>, ProviderError> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            self.inner.search(query).await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_loads_feed_and_trending() {
        let store = store();
        store.run_until_settled().await;
        store.with_state(|state| {
            assert!(!state.content.items().is_empty());
            assert!(!state.content.trending().is_empty());
            assert!(!state.content.loading);
            assert!(state.content.error.is_none());
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_view_derivation_follows_tab_and_search() {
        let store = store();
        store.run_until_settled().await;
        store.dispatch(Action::Content(ContentAction::ToggleFavorite(
            ContentId::new("t1"),
        )));

        store.dispatch(Action::Ui(UiAction::SetActiveTab(Tab::Favorites)));
        store.with_state(|state| {
            assert_eq!(state.visible_items(), state.content.favorites());
            assert_eq!(state.headline(), "Your Favorites");
            assert!(!state.can_reorder());
        });

        store.dispatch(Action::Content(ContentAction::QueryChanged(
            "plasma".to_string(),
        )));
        store.run_until_settled().await;
        store.with_state(|state| {
            // An active search wins regardless of the tab.
            assert_eq!(state.visible_items(), state.content.search_results());
            assert!(state
                .visible_items()
                .iter()
                .any(|item| item.id.0 == "n5"));
            assert_eq!(state.headline(), "Search Results for \"plasma\"");
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_result_search_shows_an_empty_state() {
        let store = store();
        store.run_until_settled().await;
        store.dispatch(Action::Content(ContentAction::QueryChanged(
            "no such thing anywhere".to_string(),
        )));
        store.run_until_settled().await;
        store.with_state(|state| {
            assert!(!state.content.search_query.is_empty());
            // The tab's list does not leak through an empty result set.
            assert!(state.visible_items().is_empty());
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_inputs_coalesce_into_one_search() {
        let searches = Arc::new(AtomicUsize::new(0));
        let provider = CountingProvider {
            inner: MockContentProvider::instant(),
            searches: searches.clone(),
        };
        let environment = Environment::new(Provider::new(provider));
        let store = Store::<DashboardReducer>::new(State::default(), environment);
        store.run_until_settled().await;

        for input in ["c", "cl", "cli", "clim", "climate"] {
            store.dispatch(Action::Content(ContentAction::QueryChanged(
                input.to_string(),
            )));
        }
        store.run_until_settled().await;

        assert_eq!(searches.load(Ordering::SeqCst), 1);
        store.with_state(|state| {
            assert_eq!(state.content.search_query, "climate");
            assert!(state
                .content
                .search_results()
                .iter()
                .any(|item| item.id.0 == "t1"));
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_while_a_search_is_in_flight_keeps_results_empty() {
        let store = store();
        store.run_until_settled().await;
        store.dispatch(Action::Content(ContentAction::QueryChanged(
            "climate".to_string(),
        )));
        store.dispatch(Action::Content(ContentAction::QueryChanged(String::new())));
        store.run_until_settled().await;

        store.with_state(|state| {
            assert_eq!(state.content.search_query, "");
            assert!(state.content.search_results().is_empty());
            assert_eq!(state.visible_items(), state.content.items());
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_preference_update_does_not_refetch_by_itself() {
        let store = store();
        store.run_until_settled().await;
        let before = store.with_state(|state| state.content.items());

        store.dispatch(Action::Preferences(PreferencesAction::Update(
            PreferencesUpdate {
                categories: Some(["environment"].into_iter().map(String::from).collect()),
                ..Default::default()
            },
        )));
        store.run_until_settled().await;
        let after = store.with_state(|state| state.content.items());
        assert_eq!(before, after);

        // The caller opts into the refetch.
        store.dispatch(Action::Refresh);
        store.run_until_settled().await;
        store.with_state(|state| {
            assert!(state
                .content
                .items()
                .iter()
                .all(|item| item.category == "environment"));
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_reorder_gate_reflects_tab_and_search() {
        let store = store();
        store.run_until_settled().await;
        store.with_state(|state| assert!(state.can_reorder()));

        store.dispatch(Action::Ui(UiAction::SetActiveTab(Tab::Trending)));
        store.with_state(|state| assert!(!state.can_reorder()));

        store.dispatch(Action::Ui(UiAction::SetActiveTab(Tab::Feed)));
        store.dispatch(Action::Content(ContentAction::QueryChanged(
            "plasma".to_string(),
        )));
        store.with_state(|state| assert!(!state.can_reorder()));
    }
}
