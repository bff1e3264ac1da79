mod app;
mod components;
mod environment;
mod store;
mod view_model;

pub use app::run;

pub use components::content::{ContentAction, ContentState};
pub use components::dashboard::{Action, DashboardReducer, State};
pub use components::preferences::{
    Preferences, PreferencesAction, PreferencesState, PreferencesUpdate, Profile,
};
pub use components::ui::{Tab, UiAction, UiState};
pub use environment::mock::MockContentProvider;
pub use environment::model::{
    ContentId, ContentItem, ContentKind, ContentProvider, Page, Provider, ProviderError,
};
pub use environment::types::SessionConfig;
pub use environment::Environment;
pub use store::{Debouncer, Effect, Publisher, Reducer, Store};
pub use view_model::ContentCardViewModel;
