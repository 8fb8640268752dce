/// Default ElevenLabs API root.
pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io/v1";

/// Voice catalog connection settings.
///
/// Built by the server from its environment and passed in explicitly.
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// API key sent as `xi-api-key`. `None` disables the catalog.
    pub api_key: Option<String>,
    /// API root without a trailing slash, e.g. `https://api.elevenlabs.io/v1`.
    pub base_url: String,
}

impl VoiceConfig {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self::new(None, DEFAULT_BASE_URL)
    }
}
