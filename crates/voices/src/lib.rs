//! Client for the remote text-to-speech voice catalog (ElevenLabs).
//!
//! Only the catalog listing is used: the browser picks a voice per speaker
//! and the chosen `voice_id` travels with each segment into the export.

pub mod api;
pub mod config;
pub mod models;

pub use api::{VoiceApiError, VoiceCatalog};
pub use config::VoiceConfig;
pub use models::Voice;
