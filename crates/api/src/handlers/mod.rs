//! Request handlers.
//!
//! Each submodule serves one resource. Parsing and validation live in
//! `scriptsync_core`; handlers extract the request, delegate, and map
//! errors via [`AppError`](crate::error::AppError).

pub mod export;
pub mod transcript;
pub mod video;
pub mod voices;
