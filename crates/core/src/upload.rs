//! Upload filename rules: accepted extensions, sanitization, and the names
//! under which originals and previews are stored.

/// Video container extensions accepted for upload (lowercase).
pub const ALLOWED_VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm", "flv"];

/// Extension required for transcript uploads.
pub const TRANSCRIPT_EXTENSION: &str = "csv";

const ORIGINAL_PREFIX: &str = "original_";
const PREVIEW_PREFIX: &str = "preview_";

/// Lowercased extension after the last `.`, if any.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

pub fn is_allowed_video_file(filename: &str) -> bool {
    file_extension(filename).is_some_and(|ext| ALLOWED_VIDEO_EXTENSIONS.contains(&ext.as_str()))
}

pub fn is_transcript_file(filename: &str) -> bool {
    file_extension(filename).is_some_and(|ext| ext == TRANSCRIPT_EXTENSION)
}

/// Reduce a client-supplied filename to a safe basename.
///
/// Path separators and whitespace become `_`, anything outside
/// `[A-Za-z0-9._-]` is dropped, and leading/trailing `.`/`_` are stripped.
/// Returns `None` if nothing usable remains.
pub fn sanitize_filename(filename: &str) -> Option<String> {
    let flattened: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Stored name for the untouched upload, e.g. `original_clip.mov`.
pub fn original_filename(sanitized: &str) -> String {
    format!("{ORIGINAL_PREFIX}{sanitized}")
}

/// Stored name for the browser preview, e.g. `preview_clip.mp4`.
pub fn preview_filename(sanitized: &str) -> String {
    let stem = sanitized
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(sanitized);
    format!("{PREVIEW_PREFIX}{stem}.mp4")
}
