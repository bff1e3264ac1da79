use strum_macros::{Display, EnumIter, EnumString};

use crate::environment::Environment;
use crate::store::Effect;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Tab {
    #[default]
    Feed,
    Trending,
    Favorites,
}

impl Tab {
    pub fn is_feed(&self) -> bool {
        matches!(self, Tab::Feed)
    }

    pub fn is_trending(&self) -> bool {
        matches!(self, Tab::Trending)
    }

    pub fn is_favorites(&self) -> bool {
        matches!(self, Tab::Favorites)
    }
}

/// View-mode flags. Pure preference, nothing here reaches other partitions.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct UiState {
    pub dark_mode: bool,
    pub sidebar_open: bool,
    pub active_tab: Tab,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            dark_mode: false,
            sidebar_open: true,
            active_tab: Tab::default(),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum UiAction {
    ToggleDarkMode,
    ToggleSidebar,
    SetActiveTab(Tab),
}

pub fn reduce(
    action: UiAction,
    state: &mut UiState,
    _environment: &Environment,
) -> Effect<'static, UiAction> {
    log::trace!("{action:?}");
    match action {
        UiAction::ToggleDarkMode => state.dark_mode = !state.dark_mode,
        UiAction::ToggleSidebar => state.sidebar_open = !state.sidebar_open,
        UiAction::SetActiveTab(tab) => state.active_tab = tab,
    }
    Effect::NONE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::mock::MockContentProvider;
    use crate::environment::model::Provider;

    fn apply(state: &mut UiState, action: UiAction) {
        let environment = Environment::new(Provider::new(MockContentProvider::instant()));
        drop(reduce(action, state, &environment));
    }

    #[test]
    fn test_defaults() {
        let state = UiState::default();
        assert!(!state.dark_mode);
        assert!(state.sidebar_open);
        assert!(state.active_tab.is_feed());
    }

    #[test]
    fn test_toggles_flip_back_and_forth() {
        let mut state = UiState::default();
        apply(&mut state, UiAction::ToggleDarkMode);
        assert!(state.dark_mode);
        apply(&mut state, UiAction::ToggleDarkMode);
        assert!(!state.dark_mode);

        apply(&mut state, UiAction::ToggleSidebar);
        assert!(!state.sidebar_open);
    }

    #[test]
    fn test_set_active_tab() {
        let mut state = UiState::default();
        apply(&mut state, UiAction::SetActiveTab(Tab::Favorites));
        assert!(state.active_tab.is_favorites());
        assert_eq!(state.active_tab.to_string(), "favorites");
        assert_eq!("trending".parse::<Tab>().unwrap(), Tab::Trending);
    }

    #[test]
    fn test_every_tab_is_settable() {
        use strum::IntoEnumIterator;
        let mut state = UiState::default();
        for tab in Tab::iter() {
            apply(&mut state, UiAction::SetActiveTab(tab));
            assert_eq!(state.active_tab, tab);
        }
    }
}
