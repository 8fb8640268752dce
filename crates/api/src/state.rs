use std::sync::Arc;

use scriptsync_voices::VoiceCatalog;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Voice catalog client.
    pub voices: Arc<VoiceCatalog>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let voices = VoiceCatalog::new(config.voices.clone());
        Self {
            config: Arc::new(config),
            voices: Arc::new(voices),
        }
    }
}
