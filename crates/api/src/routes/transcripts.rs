//! Route definitions for transcript uploads.
//!
//! Mounted at `/transcripts`.
//!
//! ```text
//! POST /        upload_transcript
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::transcript;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(transcript::upload_transcript))
}
