//! Handler for transcript uploads.

use axum::extract::{Multipart, State};
use axum::Json;
use scriptsync_core::csv_io;
use scriptsync_core::segments::SegmentBatch;
use scriptsync_core::timecode::FrameRate;
use scriptsync_core::upload;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/transcripts
///
/// Accepts a multipart form with a `csv_file` part and an optional
/// `frame_rate` part, and returns the ordered segments, the speaker list
/// and the total duration. Rows that cannot be read are logged and dropped.
pub async fn upload_transcript(
    State(_state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<SegmentBatch>> {
    let mut file_data: Option<(String, Vec<u8>)> = None;
    let mut frame_rate = FrameRate::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "csv_file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file_data = Some((filename, data.to_vec()));
            }
            "frame_rate" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !text.trim().is_empty() {
                    frame_rate = FrameRate::parse(&text)?;
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("No CSV file provided".into()))?;

    if filename.is_empty() {
        return Err(AppError::BadRequest("No file selected".into()));
    }
    if !upload::is_transcript_file(&filename) {
        return Err(AppError::BadRequest(
            "Please upload a CSV file. Only .csv files are allowed.".into(),
        ));
    }

    let batch = csv_io::ingest_csv(&data, frame_rate)?;

    for diagnostic in &batch.diagnostics {
        tracing::warn!(
            row_index = diagnostic.row_index,
            raw = ?diagnostic.raw,
            reason = %diagnostic.reason,
            "Dropped unreadable transcript row",
        );
    }

    tracing::info!(
        filename = %filename,
        fps = frame_rate.fps(),
        segments = batch.segments.len(),
        speakers = batch.speakers.len(),
        dropped = batch.diagnostics.len(),
        "Transcript processed",
    );

    Ok(Json(batch))
}
