use std::time::Instant;

use mind_rs::RecordStore;

use crate::config::ServerConfig;

/// Main server state shared across all handlers
pub struct ServerState {
    pub config: ServerConfig,
    pub store: RecordStore,
    pub start_time: Instant,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        let store = RecordStore::new(config.store_config());
        Self {
            config,
            store,
            start_time: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
