use crate::config::Config;
use crate::error::Result;
use crate::gateway::Gateway;
use crate::provider::{ImageProvider, OpenAiProvider};
use crate::session::{ConfiguredSessions, SessionProvider};
use std::sync::Arc;

pub struct AppState {
    pub gateway: Gateway,
    pub sessions: Arc<dyn SessionProvider>,
}

impl AppState {
    pub fn new(gateway: Gateway, sessions: Arc<dyn SessionProvider>) -> Arc<Self> {
        Arc::new(Self { gateway, sessions })
    }

    pub fn from_config(config: &Config) -> Result<Arc<Self>> {
        let provider: Arc<dyn ImageProvider> = Arc::new(OpenAiProvider::from_config(config)?);
        let sessions = Arc::new(ConfiguredSessions::new(config.sessions.clone()));
        Ok(Self::new(Gateway::new(provider, config.require_session), sessions))
    }
}
