mod reducer;

pub use reducer::{reduce, ContentAction, ContentState};
