pub mod exports;
pub mod health;
pub mod transcripts;
pub mod videos;
pub mod voices;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /transcripts                 upload CSV (POST)
///
/// /videos                      upload video (POST)
/// /videos/{filename}           stream preview (GET)
///
/// /voices                      voice catalog (GET)
///
/// /exports/csv                 export timeline (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/transcripts", transcripts::router())
        .nest("/videos", videos::router())
        .nest("/voices", voices::router())
        .nest("/exports", exports::router())
}
