use im::HashSet;
use serde::{Deserialize, Serialize};

use crate::environment::Environment;
use crate::store::Effect;

/// What the user subscribed to and how the session should behave for them.
/// Read-only input to the content fetches; never mutated by them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub categories: HashSet<String>,
    pub language: String,
    pub notifications_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            categories: ["technology", "entertainment", "sports"]
                .into_iter()
                .map(String::from)
                .collect(),
            language: "en".to_string(),
            notifications_enabled: true,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub avatar: String,
}

/// Partial update, shallow-merged into the current preferences.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PreferencesUpdate {
    pub categories: Option<HashSet<String>>,
    pub language: Option<String>,
    pub notifications_enabled: Option<bool>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PreferencesState {
    pub preferences: Preferences,
    pub is_authenticated: bool,
    pub profile: Option<Profile>,
}

#[derive(Clone, Debug)]
pub enum PreferencesAction {
    Update(PreferencesUpdate),
    SetAuthenticated(bool),
    SetProfile(Option<Profile>),
}

pub fn reduce(
    action: PreferencesAction,
    state: &mut PreferencesState,
    _environment: &Environment,
) -> Effect<'static, PreferencesAction> {
    log::trace!("{action:?}");
    match action {
        PreferencesAction::Update(update) => {
            // A changed category set does not re-trigger a fetch on its own;
            // callers dispatch a refresh when they want one.
            if let Some(categories) = update.categories {
                state.preferences.categories = categories;
            }
            if let Some(language) = update.language {
                state.preferences.language = language;
            }
            if let Some(notifications) = update.notifications_enabled {
                state.preferences.notifications_enabled = notifications;
            }
        }
        PreferencesAction::SetAuthenticated(on) => state.is_authenticated = on,
        PreferencesAction::SetProfile(profile) => state.profile = profile,
    }
    Effect::NONE
}
