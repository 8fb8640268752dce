//! Segment construction from resolved transcript rows.
//!
//! Each row becomes a [`RowOutcome`]: a segment, a silent skip (the time
//! range is unusable), or a failure carrying a diagnostic the caller may
//! log. [`SegmentBuilder::build`] collects the segments, sorts them by
//! start time, and derives the speaker set and total duration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::columns::{ColumnMapping, ColumnRole};
use crate::timecode::{format_timecode, try_parse_timecode, FrameRate, TimecodeError};

// ---------------------------------------------------------------------------
// Segment
// ---------------------------------------------------------------------------

/// One aligned (speaker, time range, text) unit.
///
/// `voice_id` is never set by the builder; the browser attaches it before
/// sending segments back for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub id: usize,
    pub speaker: String,
    pub start_time: f64,
    pub end_time: f64,
    #[serde(default)]
    pub start_time_formatted: String,
    #[serde(default)]
    pub end_time_formatted: String,
    pub text: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
}

impl Segment {
    /// Build a segment, enforcing `start_time >= 0` and `end_time > start_time`.
    pub fn new(
        id: usize,
        speaker: impl Into<String>,
        start_time: f64,
        end_time: f64,
        text: impl Into<String>,
    ) -> Result<Self, SkipReason> {
        if start_time.is_nan() || start_time < 0.0 {
            return Err(SkipReason::NegativeStart { start_time });
        }
        if end_time.is_nan() || end_time <= start_time {
            return Err(SkipReason::EmptyRange {
                start_time,
                end_time,
            });
        }

        Ok(Self {
            id,
            speaker: speaker.into(),
            start_time,
            end_time,
            start_time_formatted: format_timecode(start_time),
            end_time_formatted: format_timecode(end_time),
            text: text.into(),
            duration: end_time - start_time,
            voice_id: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Row outcomes
// ---------------------------------------------------------------------------

/// Why a well-formed row produced no segment.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NegativeStart { start_time: f64 },
    EmptyRange { start_time: f64, end_time: f64 },
    MissingSpeaker,
}

/// A row that could not be read at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDiagnostic {
    /// Zero-based data row index (header excluded).
    pub row_index: usize,
    /// The row's cells as read.
    pub raw: Vec<String>,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Segment(Segment),
    Skipped(SkipReason),
    Failed(RowDiagnostic),
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Ordered segments plus derived aggregates.
///
/// `diagnostics` stays server-side and is not serialized.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SegmentBatch {
    pub segments: Vec<Segment>,
    pub speakers: Vec<String>,
    pub total_duration: f64,
    #[serde(skip)]
    pub diagnostics: Vec<RowDiagnostic>,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

pub struct SegmentBuilder {
    mapping: ColumnMapping,
    frame_rate: FrameRate,
}

impl SegmentBuilder {
    pub fn new(mapping: ColumnMapping) -> Self {
        Self {
            mapping,
            frame_rate: FrameRate::default(),
        }
    }

    pub fn with_frame_rate(mut self, frame_rate: FrameRate) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Turn one row into a segment, a skip, or a failure.
    pub fn process_row<S: AsRef<str>>(&self, row_index: usize, row: &[S]) -> RowOutcome {
        let [speaker, start, end, text] = match self.extract(row) {
            Ok(cells) => cells,
            Err(reason) => {
                return RowOutcome::Failed(RowDiagnostic {
                    row_index,
                    raw: row.iter().map(|c| c.as_ref().to_string()).collect(),
                    reason,
                })
            }
        };

        if speaker.trim().is_empty() {
            return RowOutcome::Skipped(SkipReason::MissingSpeaker);
        }

        let start_time = self.read_time(start);
        let end_time = self.read_time(end);

        match Segment::new(row_index, speaker, start_time, end_time, text) {
            Ok(segment) => RowOutcome::Segment(segment),
            Err(reason) => RowOutcome::Skipped(reason),
        }
    }

    /// Signed seconds for a cell: negative timecodes keep their sign so
    /// [`Segment::new`] can reject them, anything unreadable counts as `0`.
    fn read_time(&self, cell: &str) -> f64 {
        match try_parse_timecode(cell, self.frame_rate) {
            Ok(seconds) => seconds,
            Err(TimecodeError::Negative(seconds)) => seconds,
            Err(_) => 0.0,
        }
    }

    /// Pull the mapped cells in [`ColumnRole::ALL`] order.
    fn extract<'r, S: AsRef<str>>(&self, row: &'r [S]) -> Result<[&'r str; 4], String> {
        let mut cells = [""; 4];
        for (slot, role) in cells.iter_mut().zip(ColumnRole::ALL) {
            let column = self.mapping.column(role);
            let cell = row.get(column.index).ok_or_else(|| {
                format!(
                    "row has {} cells, column '{}' is at position {}",
                    row.len(),
                    column.header,
                    column.index + 1
                )
            })?;
            *slot = cell.as_ref();
        }
        Ok(cells)
    }

    /// Process every row and aggregate the retained segments.
    ///
    /// Segments are sorted by `start_time`; the sort is stable so rows with
    /// equal start times keep their input order.
    pub fn build(&self, rows: &[Vec<String>]) -> SegmentBatch {
        let mut segments = Vec::new();
        let mut diagnostics = Vec::new();

        for (row_index, row) in rows.iter().enumerate() {
            match self.process_row(row_index, row) {
                RowOutcome::Segment(segment) => segments.push(segment),
                RowOutcome::Skipped(_) => {}
                RowOutcome::Failed(diagnostic) => diagnostics.push(diagnostic),
            }
        }

        segments.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

        let speakers: BTreeSet<&str> = segments.iter().map(|s| s.speaker.as_str()).collect();
        let speakers = speakers.into_iter().map(str::to_string).collect();
        let total_duration = segments.iter().map(|s| s.end_time).fold(0.0, f64::max);

        SegmentBatch {
            segments,
            speakers,
            total_duration,
            diagnostics,
        }
    }
}

/// Build segments from rows using the default 30 fps frame rate.
pub fn build_segments(mapping: &ColumnMapping, rows: &[Vec<String>]) -> SegmentBatch {
    SegmentBuilder::new(mapping.clone()).build(rows)
}
