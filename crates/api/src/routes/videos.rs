//! Route definitions for video upload and preview streaming.
//!
//! Mounted at `/videos`.
//!
//! ```text
//! POST /              upload_video
//! GET  /{filename}    stream_video
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::video;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(video::upload_video))
        .route("/{filename}", get(video::stream_video))
}
