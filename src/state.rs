use std::sync::Arc;

use crate::config::Config;
use crate::store::{EventStore, MySqlEventStore};

/// Built once at startup and cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn EventStore>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn EventStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Production wiring: a MySQL store driven by the configured database settings.
    pub fn from_config(config: Config) -> Self {
        let store = MySqlEventStore::new(config.database.clone());
        Self::new(config, Arc::new(store))
    }
}
