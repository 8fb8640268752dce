//! Handlers for the `/videos` resource.
//!
//! Uploads are transcoded to a browser-friendly H.264 preview via ffmpeg;
//! previews are streamed back with HTTP range request support.

use std::path::Path as FsPath;

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::header::{self, HeaderMap};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use scriptsync_core::error::CoreError;
use scriptsync_core::{ffmpeg, upload};
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio_util::io::ReaderStream;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Maximum read chunk size for open-ended range requests (1 MiB).
const MAX_CHUNK_SIZE: u64 = 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct VideoUploadResponse {
    /// Stored preview name, usable with `GET /videos/{filename}`.
    pub filename: String,
    /// URL path the browser should load the preview from.
    pub filepath: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Guess a Content-Type from a file extension.
fn content_type_for_extension(path: &str) -> &'static str {
    match upload::file_extension(path).as_deref() {
        Some("mp4" | "m4v") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        Some("flv") => "video/x-flv",
        _ => "application/octet-stream",
    }
}

/// Parse a `Range: bytes=START-END` header value.
/// Returns `(start, optional_end)`.
fn parse_range_header(range: &str) -> Option<(u64, Option<u64>)> {
    let range = range.strip_prefix("bytes=")?;
    let (start, end) = range.split_once('-')?;
    let start = start.trim().parse::<u64>().ok()?;
    let end = match end.trim() {
        "" => None,
        end => Some(end.parse::<u64>().ok()?),
    };
    Some((start, end))
}

fn io_error(e: std::io::Error) -> AppError {
    AppError::InternalError(e.to_string())
}

fn build_error(e: axum::http::Error) -> AppError {
    AppError::InternalError(e.to_string())
}

/// Remove the untouched upload, logging rather than failing if it is
/// already gone.
async fn remove_original(path: &FsPath) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove original upload");
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/videos
///
/// Accepts a multipart `video_file`, stores it temporarily, transcodes it
/// to `preview_<stem>.mp4` and deletes the original whether or not the
/// transcode succeeded.
pub async fn upload_video(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<VideoUploadResponse>> {
    let upload_dir = &state.config.upload_dir;
    tokio::fs::create_dir_all(upload_dir).await.map_err(io_error)?;

    let mut stored: Option<(String, std::path::PathBuf)> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("video_file") {
            continue; // ignore unknown fields
        }

        let client_name = field.file_name().unwrap_or("").to_string();
        if client_name.is_empty() {
            return Err(AppError::BadRequest("No file selected".into()));
        }
        if !upload::is_allowed_video_file(&client_name) {
            return Err(AppError::BadRequest("Invalid video file format".into()));
        }
        let sanitized = upload::sanitize_filename(&client_name)
            .filter(|name| upload::is_allowed_video_file(name))
            .ok_or_else(|| AppError::BadRequest("Invalid video filename".into()))?;

        // Temp name is unique per request.
        let original_path = upload_dir.join(upload::original_filename(&format!(
            "{}_{sanitized}",
            uuid::Uuid::new_v4().simple()
        )));

        let mut file = tokio::fs::File::create(&original_path)
            .await
            .map_err(io_error)?;
        let mut written: u64 = 0;
        loop {
            let chunk = match field.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    drop(file);
                    remove_original(&original_path).await;
                    return Err(AppError::BadRequest(e.to_string()));
                }
            };
            if let Err(e) = file.write_all(&chunk).await {
                drop(file);
                remove_original(&original_path).await;
                return Err(io_error(e));
            }
            written += chunk.len() as u64;
        }
        if let Err(e) = file.flush().await {
            drop(file);
            remove_original(&original_path).await;
            return Err(io_error(e));
        }

        tracing::debug!(path = %original_path.display(), bytes = written, "Stored original upload");
        stored = Some((sanitized, original_path));
        break;
    }

    let (sanitized, original_path) =
        stored.ok_or_else(|| AppError::BadRequest("No video file provided".into()))?;

    let preview_name = upload::preview_filename(&sanitized);
    let preview_path = upload_dir.join(&preview_name);

    let result = ffmpeg::transcode_preview(&original_path, &preview_path).await;
    remove_original(&original_path).await;

    let info = result.map_err(|e| {
        tracing::warn!(file = %sanitized, error = %e, "Preview transcode failed");
        AppError::BadRequest(format!("Video conversion failed: {e}"))
    })?;

    tracing::info!(
        preview = %preview_name,
        width = info.width,
        height = info.height,
        duration_seconds = info.duration_seconds,
        "Video preview ready",
    );

    Ok(Json(VideoUploadResponse {
        filepath: format!("/api/v1/videos/{preview_name}"),
        filename: preview_name,
    }))
}

/// GET /api/v1/videos/{filename}
///
/// Streams a stored preview with HTTP range request support. Names that
/// are not already safe basenames are rejected.
pub async fn stream_video(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    headers: HeaderMap,
) -> AppResult<Response> {
    if upload::sanitize_filename(&filename).as_deref() != Some(filename.as_str()) {
        return Err(AppError::BadRequest(format!("Invalid filename '{filename}'")));
    }

    let path = state.config.upload_dir.join(&filename);
    let metadata = match tokio::fs::metadata(&path).await {
        Ok(m) if m.is_file() => m,
        _ => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Video",
                name: filename,
            }))
        }
    };
    let file_size = metadata.len();
    let content_type = content_type_for_extension(&filename);

    // Check for Range header.
    if let Some(range_value) = headers.get(header::RANGE) {
        let range_str = range_value
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid Range header".into()))?;

        if let Some((start, end)) = parse_range_header(range_str) {
            if start >= file_size || end.is_some_and(|e| e < start) {
                return Response::builder()
                    .status(StatusCode::RANGE_NOT_SATISFIABLE)
                    .header(header::CONTENT_RANGE, format!("bytes */{file_size}"))
                    .body(Body::empty())
                    .map_err(build_error);
            }

            let last = file_size - 1;
            let end = end
                .map(|e| e.min(last))
                .unwrap_or_else(|| start.saturating_add(MAX_CHUNK_SIZE - 1).min(last));
            let length = end - start + 1;

            let mut file = tokio::fs::File::open(&path).await.map_err(io_error)?;
            file.seek(std::io::SeekFrom::Start(start))
                .await
                .map_err(io_error)?;

            let stream = ReaderStream::new(file.take(length));

            return Response::builder()
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_LENGTH, length.to_string())
                .header(
                    header::CONTENT_RANGE,
                    format!("bytes {start}-{end}/{file_size}"),
                )
                .header(header::ACCEPT_RANGES, "bytes")
                .body(Body::from_stream(stream))
                .map_err(build_error);
        }
    }

    // No usable Range header: serve the full file.
    let file = tokio::fs::File::open(&path).await.map_err(io_error)?;
    let stream = ReaderStream::new(file);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, file_size.to_string())
        .header(header::ACCEPT_RANGES, "bytes")
        .body(Body::from_stream(stream))
        .map_err(build_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_range_headers() {
        assert_eq!(parse_range_header("bytes=0-99"), Some((0, Some(99))));
        assert_eq!(parse_range_header("bytes=100-"), Some((100, None)));
        assert_eq!(parse_range_header("bytes=-500"), None);
        assert_eq!(parse_range_header("items=0-1"), None);
        assert_eq!(parse_range_header("bytes=a-b"), None);
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for_extension("preview_clip.mp4"), "video/mp4");
        assert_eq!(content_type_for_extension("x.WEBM"), "video/webm");
        assert_eq!(content_type_for_extension("notes"), "application/octet-stream");
    }
}
