//! Transcript timeline core: timecode parsing, CSV column inference,
//! segment construction, CSV export, and the ffmpeg helpers used to build
//! browser previews of uploaded videos.
//!
//! Everything except [`ffmpeg`] is pure and synchronous. Nothing in this
//! crate reads the environment; callers pass configuration explicitly.

pub mod columns;
pub mod csv_io;
pub mod error;
pub mod ffmpeg;
pub mod segments;
pub mod timecode;
pub mod upload;
