//! CSV decoding for transcript uploads and CSV encoding for exports.

use crate::columns::resolve_columns;
use crate::error::CoreError;
use crate::segments::{Segment, SegmentBatch, SegmentBuilder};
use crate::timecode::{format_timecode, FrameRate};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Download name offered for exported timelines.
pub const EXPORT_FILENAME: &str = "script_timeline.csv";

/// Export column order.
pub const EXPORT_HEADERS: [&str; 4] = ["speaker", "start_time", "end_time", "transcription"];

/// Extra export column written when voice assignments are included.
pub const VOICE_ID_HEADER: &str = "voice_id";

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// A decoded CSV file: trimmed headers plus raw data rows.
///
/// Rows may be shorter or longer than the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Decode CSV bytes into a [`Table`].
///
/// Invalid UTF-8 is replaced rather than rejected so a single bad cell
/// does not sink the whole upload.
pub fn read_table(data: &[u8]) -> Result<Table, CoreError> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(data);

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(csv_error)?
        .iter()
        .map(lossy)
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(CoreError::Validation(
            "CSV file is empty or has no header row".into(),
        ));
    }

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(csv_error)?;
        rows.push(record.iter().map(lossy).collect());
    }

    Ok(Table { headers, rows })
}

/// Decode, resolve columns, and build segments in one step.
pub fn ingest_csv(data: &[u8], frame_rate: FrameRate) -> Result<SegmentBatch, CoreError> {
    let table = read_table(data)?;
    let mapping = resolve_columns(&table.headers)?;
    Ok(SegmentBuilder::new(mapping)
        .with_frame_rate(frame_rate)
        .build(&table.rows))
}

fn lossy(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}

fn csv_error(err: csv::Error) -> CoreError {
    CoreError::Validation(format!("Malformed CSV: {err}"))
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Serialize segments as CSV with formatted timecodes.
///
/// A `voice_id` column is added only when `include_voices` is set and at
/// least one segment carries a voice; segments without one get an empty
/// cell.
pub fn export_segments_csv(segments: &[Segment], include_voices: bool) -> Result<String, CoreError> {
    if segments.is_empty() {
        return Err(CoreError::Validation("No segments to export".into()));
    }

    let with_voices = include_voices && segments.iter().any(|s| s.voice_id.is_some());

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = EXPORT_HEADERS.to_vec();
    if with_voices {
        header.push(VOICE_ID_HEADER);
    }
    writer.write_record(&header).map_err(write_error)?;

    for segment in segments {
        let start = format_timecode(segment.start_time);
        let end = format_timecode(segment.end_time);
        let mut record = vec![
            segment.speaker.as_str(),
            start.as_str(),
            end.as_str(),
            segment.text.as_str(),
        ];
        if with_voices {
            record.push(segment.voice_id.as_deref().unwrap_or(""));
        }
        writer.write_record(&record).map_err(write_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| CoreError::Internal(e.to_string()))
}

fn write_error(err: csv::Error) -> CoreError {
    CoreError::Internal(format!("CSV write failed: {err}"))
}
