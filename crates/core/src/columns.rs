//! Column inference for uploaded transcript tables.
//!
//! Headers are matched after trimming and lowercasing. Speaker and time
//! columns need an exact alias match; the source text column is the first
//! header that *contains* one of [`SOURCE_KEYWORDS`].

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const SPEAKER_ALIASES: &[&str] = &["speaker"];

pub const START_TIME_ALIASES: &[&str] = &["start_time", "starttime", "start time"];

pub const END_TIME_ALIASES: &[&str] = &["end_time", "endtime", "end time"];

/// Substrings that mark a header as the transcript text column.
pub const SOURCE_KEYWORDS: &[&str] = &["script", "line", "text", "transcription"];

// ---------------------------------------------------------------------------
// Column role
// ---------------------------------------------------------------------------

/// One of the four logical fields a transcript table must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Speaker,
    StartTime,
    EndTime,
    Source,
}

impl ColumnRole {
    /// All roles in reporting order.
    pub const ALL: [ColumnRole; 4] = [
        ColumnRole::Speaker,
        ColumnRole::StartTime,
        ColumnRole::EndTime,
        ColumnRole::Source,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Speaker => "speaker",
            Self::StartTime => "start_time",
            Self::EndTime => "end_time",
            Self::Source => "source",
        }
    }

    /// Human-readable label used in "missing columns" messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Source => "source (script/line/text/transcription)",
            other => other.as_str(),
        }
    }
}

impl std::fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Resolution result
// ---------------------------------------------------------------------------

/// A header located in the input, with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub index: usize,
    /// Header text exactly as it appeared in the input.
    pub header: String,
}

/// Per-role outcome of scanning the headers. A role is `None` when no
/// header matched it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnResolution {
    pub speaker: Option<ResolvedColumn>,
    pub start_time: Option<ResolvedColumn>,
    pub end_time: Option<ResolvedColumn>,
    pub source: Option<ResolvedColumn>,
}

impl ColumnResolution {
    pub fn get(&self, role: ColumnRole) -> Option<&ResolvedColumn> {
        match role {
            ColumnRole::Speaker => self.speaker.as_ref(),
            ColumnRole::StartTime => self.start_time.as_ref(),
            ColumnRole::EndTime => self.end_time.as_ref(),
            ColumnRole::Source => self.source.as_ref(),
        }
    }

    /// Roles no header matched, in [`ColumnRole::ALL`] order.
    pub fn missing_roles(&self) -> Vec<ColumnRole> {
        ColumnRole::ALL
            .into_iter()
            .filter(|role| self.get(*role).is_none())
            .collect()
    }

    /// Convert into a complete mapping, or report every unresolved role.
    pub fn require(self) -> Result<ColumnMapping, CoreError> {
        match self {
            Self {
                speaker: Some(speaker),
                start_time: Some(start_time),
                end_time: Some(end_time),
                source: Some(source),
            } => Ok(ColumnMapping {
                speaker,
                start_time,
                end_time,
                source,
            }),
            partial => Err(CoreError::MissingColumns(partial.missing_roles())),
        }
    }
}

/// A complete role → column assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub speaker: ResolvedColumn,
    pub start_time: ResolvedColumn,
    pub end_time: ResolvedColumn,
    pub source: ResolvedColumn,
}

impl ColumnMapping {
    pub fn column(&self, role: ColumnRole) -> &ResolvedColumn {
        match role {
            ColumnRole::Speaker => &self.speaker,
            ColumnRole::StartTime => &self.start_time,
            ColumnRole::EndTime => &self.end_time,
            ColumnRole::Source => &self.source,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Scan `headers` and locate each role.
///
/// When several headers exactly match the same role the last one wins.
/// The source column is chosen independently of the other roles, so a
/// header such as `speaker_line` can be picked as the source.
pub fn scan_columns<S: AsRef<str>>(headers: &[S]) -> ColumnResolution {
    let mut resolution = ColumnResolution::default();

    for (index, header) in headers.iter().enumerate() {
        let header = header.as_ref();
        let normalized = normalize_header(header);
        let slot = if SPEAKER_ALIASES.contains(&normalized.as_str()) {
            &mut resolution.speaker
        } else if START_TIME_ALIASES.contains(&normalized.as_str()) {
            &mut resolution.start_time
        } else if END_TIME_ALIASES.contains(&normalized.as_str()) {
            &mut resolution.end_time
        } else {
            continue;
        };
        *slot = Some(ResolvedColumn {
            index,
            header: header.to_string(),
        });
    }

    resolution.source = find_source_column(headers);
    resolution
}

/// First header, in declared order, containing a [`SOURCE_KEYWORDS`] entry.
pub fn find_source_column<S: AsRef<str>>(headers: &[S]) -> Option<ResolvedColumn> {
    headers.iter().enumerate().find_map(|(index, header)| {
        let normalized = normalize_header(header.as_ref());
        SOURCE_KEYWORDS
            .iter()
            .any(|keyword| normalized.contains(keyword))
            .then(|| ResolvedColumn {
                index,
                header: header.as_ref().to_string(),
            })
    })
}

/// Resolve all four roles, failing with [`CoreError::MissingColumns`] if any
/// role is absent.
pub fn resolve_columns<S: AsRef<str>>(headers: &[S]) -> Result<ColumnMapping, CoreError> {
    scan_columns(headers).require()
}
