//! Route definitions for timeline exports.
//!
//! Mounted at `/exports`.
//!
//! ```text
//! POST /csv     export_csv
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::export;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/csv", post(export::export_csv))
}
