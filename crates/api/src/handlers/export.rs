//! Handler for exporting an edited timeline as CSV.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use scriptsync_core::csv_io::{self, EXPORT_FILENAME};
use scriptsync_core::segments::Segment;
use serde::Deserialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Request body for `POST /exports/csv`.
#[derive(Debug, Deserialize)]
pub struct ExportCsvRequest {
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub include_voices: bool,
}

/// POST /api/v1/exports/csv
///
/// Returns the segments as a `text/csv` attachment named
/// `script_timeline.csv`. Times are re-formatted from the numeric seconds,
/// so any formatted strings sent by the client are ignored.
pub async fn export_csv(
    State(_state): State<AppState>,
    Json(input): Json<ExportCsvRequest>,
) -> AppResult<Response> {
    let csv = csv_io::export_segments_csv(&input.segments, input.include_voices)?;

    tracing::info!(
        segments = input.segments.len(),
        include_voices = input.include_voices,
        "Exported timeline CSV",
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        csv,
    )
        .into_response())
}
