use std::path::PathBuf;

use scriptsync_voices::config::DEFAULT_BASE_URL;
use scriptsync_voices::VoiceConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `600`). Covers video
    /// transcodes, which run inside the request.
    pub request_timeout_secs: u64,
    /// Directory holding preview videos (default: `uploads`).
    pub upload_dir: PathBuf,
    /// Maximum accepted request body in bytes (default: 1 GiB).
    pub max_upload_bytes: usize,
    /// Voice catalog credentials.
    pub voices: VoiceConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                         |
    /// |------------------------|---------------------------------|
    /// | `HOST`                 | `0.0.0.0`                       |
    /// | `PORT`                 | `8080`                          |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`         |
    /// | `REQUEST_TIMEOUT_SECS` | `600`                           |
    /// | `UPLOAD_DIR`           | `uploads`                       |
    /// | `MAX_UPLOAD_BYTES`     | `1073741824`                    |
    /// | `ELEVENLABS_API_KEY`   | unset (voice catalog disabled)  |
    /// | `ELEVENLABS_BASE_URL`  | `https://api.elevenlabs.io/v1`  |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "600".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
        );

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (1024 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let voices = VoiceConfig::new(
            std::env::var("ELEVENLABS_API_KEY").ok(),
            std::env::var("ELEVENLABS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            max_upload_bytes,
            voices,
        }
    }
}
