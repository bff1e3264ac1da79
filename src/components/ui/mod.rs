mod reducer;

pub use reducer::{reduce, Tab, UiAction, UiState};
