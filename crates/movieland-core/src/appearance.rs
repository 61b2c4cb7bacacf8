use serde::{Deserialize, Serialize};

use crate::storage::{SharedStore, THEME_KEY};

/// Dark or light appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Dark,
    Light,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Persisted theme preference.
pub struct Appearance {
    store: SharedStore,
    preference: ThemePreference,
}

impl Appearance {
    /// Load the persisted preference, falling back to the OS preference when
    /// nothing (or something unrecognized) is stored.
    pub fn load(store: SharedStore, os_prefers_dark: bool) -> Self {
        let stored = match store.get(THEME_KEY) {
            Ok(value) => value.as_deref().and_then(ThemePreference::parse),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read theme preference");
                None
            }
        };
        let preference = stored.unwrap_or(if os_prefers_dark {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        });
        Self { store, preference }
    }

    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    /// Flip between dark and light and persist the result.
    pub fn toggle(&mut self) -> ThemePreference {
        self.preference = self.preference.flipped();
        if let Err(e) = self.store.set(THEME_KEY, self.preference.as_str()) {
            tracing::warn!(error = %e, "failed to persist theme preference");
        }
        self.preference
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_os_fallback() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        assert_eq!(
            Appearance::load(store.clone(), true).preference(),
            ThemePreference::Dark
        );
        assert_eq!(
            Appearance::load(store, false).preference(),
            ThemePreference::Light
        );
    }

    #[test]
    fn test_stored_value_wins() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        store.set(THEME_KEY, "light").unwrap();
        assert_eq!(
            Appearance::load(store.clone(), true).preference(),
            ThemePreference::Light
        );

        store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(
            Appearance::load(store, false).preference(),
            ThemePreference::Light
        );
    }

    #[test]
    fn test_toggle_persists() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let mut appearance = Appearance::load(store.clone(), false);

        assert_eq!(appearance.toggle(), ThemePreference::Dark);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        assert_eq!(appearance.toggle(), ThemePreference::Light);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }
}
