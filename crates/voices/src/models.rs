use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A voice as exposed to the browser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Voice {
    pub voice_id: Option<String>,
    pub name: Option<String>,
    pub category: String,
    pub description: String,
    pub labels: BTreeMap<String, serde_json::Value>,
}

/// Body of `GET /voices`.
#[derive(Debug, Deserialize)]
pub struct VoicesResponse {
    #[serde(default)]
    pub voices: Vec<RawVoice>,
}

/// One catalog entry as the remote API returns it. Only the fields the
/// browser needs are kept; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct RawVoice {
    pub voice_id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub labels: Option<BTreeMap<String, serde_json::Value>>,
}

impl From<RawVoice> for Voice {
    fn from(raw: RawVoice) -> Self {
        Self {
            voice_id: raw.voice_id,
            name: raw.name,
            category: raw.category.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            labels: raw.labels.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_catalog_entries_with_defaults() {
        let body: VoicesResponse = serde_json::from_str(
            r#"{
                "voices": [
                    {
                        "voice_id": "21m00Tcm4TlvDq8ikWAM",
                        "name": "Rachel",
                        "category": "premade",
                        "description": null,
                        "labels": {"accent": "american", "gender": "female"},
                        "preview_url": "https://example.invalid/rachel.mp3"
                    },
                    {"voice_id": "abc", "name": "Custom"}
                ]
            }"#,
        )
        .unwrap();

        let voices: Vec<Voice> = body.voices.into_iter().map(Voice::from).collect();
        assert_eq!(voices.len(), 2);
        assert_eq!(voices[0].name.as_deref(), Some("Rachel"));
        assert_eq!(voices[0].category, "premade");
        assert_eq!(voices[0].description, "");
        assert_eq!(voices[0].labels["accent"], "american");
        assert_eq!(voices[1].category, "");
        assert!(voices[1].labels.is_empty());
    }

    #[test]
    fn missing_voices_key_is_empty() {
        let body: VoicesResponse = serde_json::from_str("{}").unwrap();
        assert!(body.voices.is_empty());
    }
}
