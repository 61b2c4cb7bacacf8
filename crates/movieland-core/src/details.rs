//! Lazily fetched per-movie details (runtime, certification, language).
//!
//! Details are requested the first time a card is hovered and cached for the
//! rest of the session, failures included.

use std::collections::HashMap;

use crate::models::NOT_AVAILABLE;

/// Extra fields shown in a card's hover overlay. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieDetails {
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// ISO 639-1 code of the original language.
    pub original_language: Option<String>,
    /// US certification, e.g. `"PG-13"`.
    pub certification: Option<String>,
    /// Top-billed cast, in billing order.
    pub cast: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Ready(MovieDetails),
    Unavailable,
}

/// Session cache of detail lookups keyed by catalog id.
#[derive(Debug, Default)]
pub struct DetailCache {
    entries: HashMap<u64, DetailState>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `id`. Returns `true` only on first access, when
    /// the caller should start the fetch.
    pub fn request(&mut self, id: u64) -> bool {
        if self.entries.contains_key(&id) {
            return false;
        }
        self.entries.insert(id, DetailState::Loading);
        true
    }

    pub fn resolve(&mut self, id: u64, result: Result<MovieDetails, String>) {
        let state = match result {
            Ok(details) => DetailState::Ready(details),
            Err(e) => {
                tracing::warn!(id, error = %e, "movie details unavailable");
                DetailState::Unavailable
            }
        };
        self.entries.insert(id, state);
    }

    pub fn get(&self, id: u64) -> Option<&DetailState> {
        self.entries.get(&id)
    }
}

/// Display strings for the hover overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLabels {
    pub duration: String,
    pub certification: String,
    pub language: String,
    pub cast: Option<String>,
}

const LOADING: &str = "...";
const UNAVAILABLE: &str = "Unavailable";

impl DetailLabels {
    pub fn from_state(state: Option<&DetailState>) -> Self {
        match state {
            Some(DetailState::Loading) => Self::uniform(LOADING),
            Some(DetailState::Unavailable) => Self::uniform(UNAVAILABLE),
            Some(DetailState::Ready(details)) => Self::from_details(details),
            None => Self::uniform(NOT_AVAILABLE),
        }
    }

    fn uniform(text: &str) -> Self {
        Self {
            duration: text.to_string(),
            certification: text.to_string(),
            language: text.to_string(),
            cast: None,
        }
    }

    fn from_details(details: &MovieDetails) -> Self {
        let duration = match details.runtime {
            Some(min) if min > 0 => format!("{min} min"),
            _ => NOT_AVAILABLE.to_string(),
        };
        let certification = details
            .certification
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(NOT_AVAILABLE)
            .to_string();
        let language = details
            .original_language
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(language_name)
            .unwrap_or(NOT_AVAILABLE)
            .to_string();
        let cast = (!details.cast.is_empty()).then(|| details.cast.join(", "));

        Self {
            duration,
            certification,
            language,
            cast,
        }
    }
}

/// English display name for an ISO 639-1 code. Unknown codes are returned
/// unchanged.
pub fn language_name(code: &str) -> &str {
    match code {
        "ar" => "Arabic",
        "bn" => "Bangla",
        "cn" => "Cantonese",
        "cs" => "Czech",
        "da" => "Danish",
        "de" => "German",
        "el" => "Greek",
        "en" => "English",
        "es" => "Spanish",
        "fa" => "Persian",
        "fi" => "Finnish",
        "fr" => "French",
        "he" => "Hebrew",
        "hi" => "Hindi",
        "hu" => "Hungarian",
        "id" => "Indonesian",
        "is" => "Icelandic",
        "it" => "Italian",
        "ja" => "Japanese",
        "kn" => "Kannada",
        "ko" => "Korean",
        "ml" => "Malayalam",
        "nl" => "Dutch",
        "no" => "Norwegian",
        "pl" => "Polish",
        "pt" => "Portuguese",
        "ro" => "Romanian",
        "ru" => "Russian",
        "sv" => "Swedish",
        "ta" => "Tamil",
        "te" => "Telugu",
        "th" => "Thai",
        "tl" => "Filipino",
        "tr" => "Turkish",
        "uk" => "Ukrainian",
        "vi" => "Vietnamese",
        "zh" => "Chinese",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_only_once() {
        let mut cache = DetailCache::new();
        assert!(cache.request(550));
        assert!(!cache.request(550));
        assert_eq!(cache.get(550), Some(&DetailState::Loading));

        cache.resolve(550, Err("timeout".into()));
        assert!(!cache.request(550));
        assert_eq!(cache.get(550), Some(&DetailState::Unavailable));
    }

    #[test]
    fn test_labels_for_each_state() {
        let idle = DetailLabels::from_state(None);
        assert_eq!(idle.duration, "N/A");

        let loading = DetailLabels::from_state(Some(&DetailState::Loading));
        assert_eq!(loading.certification, "...");

        let failed = DetailLabels::from_state(Some(&DetailState::Unavailable));
        assert_eq!(failed.language, "Unavailable");
    }

    #[test]
    fn test_labels_from_details() {
        let details = MovieDetails {
            runtime: Some(139),
            original_language: Some("en".into()),
            certification: Some("R".into()),
            cast: vec!["Edward Norton".into(), "Brad Pitt".into()],
        };
        let labels = DetailLabels::from_state(Some(&DetailState::Ready(details)));
        assert_eq!(labels.duration, "139 min");
        assert_eq!(labels.certification, "R");
        assert_eq!(labels.language, "English");
        assert_eq!(labels.cast.as_deref(), Some("Edward Norton, Brad Pitt"));
    }

    #[test]
    fn test_missing_fields_are_na() {
        let details = MovieDetails {
            runtime: Some(0),
            certification: Some(String::new()),
            ..Default::default()
        };
        let labels = DetailLabels::from_state(Some(&DetailState::Ready(details)));
        assert_eq!(labels.duration, "N/A");
        assert_eq!(labels.certification, "N/A");
        assert_eq!(labels.language, "N/A");
        assert_eq!(labels.cast, None);
    }

    #[test]
    fn test_language_name_passthrough() {
        assert_eq!(language_name("ja"), "Japanese");
        assert_eq!(language_name("xx"), "xx");
    }
}
