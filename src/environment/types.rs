use std::time::Duration;

/// Session-wide tunables handed to the reducers through the environment.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SessionConfig {
    /// Quiet period before a changed search input is sent to the provider.
    /// Rapid keystrokes within this window coalesce into a single request.
    pub search_debounce: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(300),
        }
    }
}
