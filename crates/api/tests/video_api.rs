//! Integration tests for video upload and preview streaming.
//!
//! Uploads never produce a real preview here: they are either rejected
//! before transcoding or fail in ffprobe on junk bytes. Streaming is
//! exercised against files written directly to the upload directory.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, get, get_with_range, post_multipart};

const UPLOAD_URI: &str = "/api/v1/videos";

fn write_preview(dir: &std::path::Path, name: &str) -> Vec<u8> {
    let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    std::fs::write(dir.join(name), &data).unwrap();
    data
}

#[tokio::test]
async fn upload_rejects_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_multipart(app, UPLOAD_URI, &[("video_file", Some("clip.gif"), "GIF89a".as_bytes())]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid video file format");
}

#[tokio::test]
async fn upload_without_file_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_multipart(app, UPLOAD_URI, &[("notes", None, "hello".as_bytes())]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No video file provided");
}

#[tokio::test]
async fn upload_with_empty_filename_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_multipart(app, UPLOAD_URI, &[("video_file", Some(""), "".as_bytes())]).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No file selected");
}

#[tokio::test]
async fn failed_conversion_returns_400_and_removes_original() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = post_multipart(
        app,
        UPLOAD_URI,
        &[("video_file", Some("clip.mp4"), "definitely not a video".as_bytes())],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Video conversion failed: "));

    let left: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert!(left.is_empty(), "upload dir not cleaned: {left:?}");
}

#[tokio::test]
async fn stream_missing_file_returns_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = get(app, "/api/v1/videos/preview_missing.mp4").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn stream_rejects_path_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(dir.path());

    let response = get(app, "/api/v1/videos/..%2Fsecret.mp4").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stream_serves_full_file() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_preview(dir.path(), "preview_clip.mp4");
    let app = common::build_test_app(dir.path());

    let response = get(app, "/api/v1/videos/preview_clip.mp4").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "video/mp4");
    assert_eq!(response.headers()["accept-ranges"], "bytes");
    assert_eq!(response.headers()["content-length"], "4096");
    assert_eq!(body_bytes(response).await, data);
}

#[tokio::test]
async fn stream_serves_byte_range() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_preview(dir.path(), "preview_clip.mp4");
    let app = common::build_test_app(dir.path());

    let response = get_with_range(app, "/api/v1/videos/preview_clip.mp4", "bytes=100-199").await;
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.headers()["content-range"], "bytes 100-199/4096");
    assert_eq!(response.headers()["content-length"], "100");
    assert_eq!(body_bytes(response).await, &data[100..200]);
}

#[tokio::test]
async fn open_ended_range_runs_to_end_of_file() {
    let dir = tempfile::tempdir().unwrap();
    let data = write_preview(dir.path(), "preview_clip.mp4");
    let app = common::build_test_app(dir.path());

    let response = get_with_range(app, "/api/v1/videos/preview_clip.mp4", "bytes=4000-").await;
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.headers()["content-range"], "bytes 4000-4095/4096");
    assert_eq!(body_bytes(response).await, &data[4000..]);
}

#[tokio::test]
async fn unsatisfiable_range_returns_416() {
    let dir = tempfile::tempdir().unwrap();
    write_preview(dir.path(), "preview_clip.mp4");
    let app = common::build_test_app(dir.path());

    let response = get_with_range(app, "/api/v1/videos/preview_clip.mp4", "bytes=5000-").await;
    assert_eq!(response.status(), StatusCode::RANGE_NOT_SATISFIABLE);
    assert_eq!(response.headers()["content-range"], "bytes */4096");
}
