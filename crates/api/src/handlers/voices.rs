//! Handler for the voice catalog.

use axum::extract::State;
use axum::Json;
use scriptsync_voices::Voice;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<Voice>,
    pub api_key_configured: bool,
}

/// GET /api/v1/voices
///
/// Lists the voices available to the configured account. A catalog failure
/// is logged and reported as an empty list so the editor keeps working
/// without voice assignment.
pub async fn list_voices(State(state): State<AppState>) -> Json<VoicesResponse> {
    let voices = match state.voices.list_voices().await {
        Ok(voices) => voices,
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch voice catalog");
            Vec::new()
        }
    };

    Json(VoicesResponse {
        voices,
        api_key_configured: state.voices.is_configured(),
    })
}
