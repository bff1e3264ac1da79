mod reducer;

pub use reducer::{
    reduce, Preferences, PreferencesAction, PreferencesState, PreferencesUpdate, Profile,
};
