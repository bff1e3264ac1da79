pub mod mock;
pub mod model;
pub mod types;

pub use model::Provider;

use self::types::SessionConfig;

/// Everything the reducers need besides their own state: the content
/// provider capability and the session configuration.
#[derive(Clone)]
pub struct Environment {
    pub provider: Provider,
    pub config: SessionConfig,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment").finish()
    }
}

impl Environment {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            config: SessionConfig::default(),
        }
    }

    pub fn with_config(provider: Provider, config: SessionConfig) -> Self {
        Self { provider, config }
    }
}
