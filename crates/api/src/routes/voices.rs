//! Route definitions for the voice catalog.
//!
//! Mounted at `/voices`.

use axum::routing::get;
use axum::Router;

use crate::handlers::voices;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(voices::list_voices))
}
