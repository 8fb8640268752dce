//! FFmpeg/FFprobe helpers for building browser previews of uploaded videos.
//!
//! Previews are H.264/AAC MP4 files capped at 720p with `+faststart` so the
//! browser can begin playback before the download completes.

use std::path::Path;

use serde::Deserialize;

/// Maximum preview height in pixels. Taller sources are scaled down.
pub const PREVIEW_MAX_HEIGHT: i32 = 720;

/// Target video bitrate for previews.
pub const PREVIEW_VIDEO_BITRATE: &str = "1600k";

/// Dimensions assumed when ffprobe does not report them.
pub const FALLBACK_WIDTH: i32 = 1920;
pub const FALLBACK_HEIGHT: i32 = 1080;

/// Error type for FFmpeg/FFprobe operations.
#[derive(Debug, thiserror::Error)]
pub enum FfmpegError {
    #[error("ffprobe/ffmpeg binary not found: {0}")]
    NotFound(std::io::Error),

    #[error("ffprobe/ffmpeg execution failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("failed to parse ffprobe output: {0}")]
    ParseError(String),

    #[error("no video stream found")]
    NoVideoStream,

    #[error("video file not found: {0}")]
    VideoNotFound(String),
}

/// Result of a successful preview transcode.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewInfo {
    pub width: i32,
    pub height: i32,
    /// Source duration in seconds, `0.0` when ffprobe does not report one.
    pub duration_seconds: f64,
}

// ---------------------------------------------------------------------------
// ffprobe JSON output structures
// ---------------------------------------------------------------------------

/// Top-level ffprobe JSON output (`-print_format json -show_format -show_streams`).
#[derive(Debug, Deserialize)]
pub struct FfprobeOutput {
    #[serde(default)]
    pub streams: Vec<FfprobeStream>,
    #[serde(default)]
    pub format: Option<FfprobeFormat>,
}

/// A single stream from ffprobe output.
#[derive(Debug, Deserialize)]
pub struct FfprobeStream {
    pub index: i32,
    pub codec_name: Option<String>,
    pub codec_type: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration: Option<String>,
}

/// Format-level metadata from ffprobe.
#[derive(Debug, Deserialize)]
pub struct FfprobeFormat {
    pub duration: Option<String>,
    pub format_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run `ffprobe` on a video file and return the parsed JSON output.
pub async fn probe_video(path: &Path) -> Result<FfprobeOutput, FfmpegError> {
    if !path.exists() {
        return Err(FfmpegError::VideoNotFound(
            path.to_string_lossy().to_string(),
        ));
    }

    let output = tokio::process::Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .await
        .map_err(FfmpegError::NotFound)?;

    if !output.status.success() {
        return Err(FfmpegError::ExecutionFailed {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str::<FfprobeOutput>(&stdout)
        .map_err(|e| FfmpegError::ParseError(format!("{e}: {stdout}")))
}

/// Transcode `input` into a web-playable MP4 at `output`.
///
/// Overwrites `output` if it exists. The input is left in place; callers
/// decide when to remove it.
pub async fn transcode_preview(input: &Path, output: &Path) -> Result<PreviewInfo, FfmpegError> {
    let probe = probe_video(input).await?;
    let stream = first_video_stream(&probe).ok_or(FfmpegError::NoVideoStream)?;
    let (width, height) = preview_dimensions(stream.width, stream.height);

    let result = tokio::process::Command::new("ffmpeg")
        .arg("-i")
        .arg(input)
        .args([
            "-c:v",
            "libx264",
            "-c:a",
            "aac",
            "-b:v",
            PREVIEW_VIDEO_BITRATE,
            "-vf",
            &format!("scale={width}:{height}"),
            "-preset",
            "medium",
            "-movflags",
            "+faststart",
            "-y",
        ])
        .arg(output)
        .output()
        .await
        .map_err(FfmpegError::NotFound)?;

    if !result.status.success() {
        return Err(FfmpegError::ExecutionFailed {
            exit_code: result.status.code(),
            stderr: String::from_utf8_lossy(&result.stderr).to_string(),
        });
    }

    Ok(PreviewInfo {
        width,
        height,
        duration_seconds: parse_duration(&probe),
    })
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Find the first video stream in the ffprobe output.
pub fn first_video_stream(probe: &FfprobeOutput) -> Option<&FfprobeStream> {
    probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
}

/// Parse the video duration in seconds from ffprobe output.
pub fn parse_duration(probe: &FfprobeOutput) -> f64 {
    // Try format-level duration first.
    if let Some(secs) = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok())
    {
        return secs;
    }
    // Fall back to the first video stream's duration.
    first_video_stream(probe)
        .and_then(|s| s.duration.as_deref())
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Compute preview output dimensions.
///
/// Sources taller than [`PREVIEW_MAX_HEIGHT`] are scaled down keeping the
/// aspect ratio; smaller sources keep their size. Both sides are rounded
/// down to even numbers, which libx264 requires.
pub fn preview_dimensions(width: Option<i32>, height: Option<i32>) -> (i32, i32) {
    let width = width.filter(|w| *w > 0).unwrap_or(FALLBACK_WIDTH);
    let height = height.filter(|h| *h > 0).unwrap_or(FALLBACK_HEIGHT);

    let (width, height) = if height > PREVIEW_MAX_HEIGHT {
        let scale = PREVIEW_MAX_HEIGHT as f64 / height as f64;
        ((width as f64 * scale) as i32, PREVIEW_MAX_HEIGHT)
    } else {
        (width, height)
    };

    (even(width), even(height))
}

fn even(n: i32) -> i32 {
    (n - n % 2).max(2)
}
