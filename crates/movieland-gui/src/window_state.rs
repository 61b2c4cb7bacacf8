//! Persist and restore window size and position across sessions.
//!
//! Saves a small JSON file to `~/.local/share/movieland/window.json`
//! (or platform equivalent via `directories` crate).

use iced::{Point, Size};
use serde::{Deserialize, Serialize};

const FILE_NAME: &str = "window.json";

/// Persisted window geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            x: -1.0,
            y: -1.0,
        }
    }
}

impl WindowState {
    pub fn size(&self) -> Size {
        Size::new(self.width.max(480.0), self.height.max(360.0))
    }

    /// A saved position, if there is a valid one.
    pub fn position(&self) -> Option<Point> {
        if self.x >= 0.0 && self.y >= 0.0 {
            Some(Point::new(self.x, self.y))
        } else {
            None
        }
    }

    /// Load from disk, returning default if file doesn't exist or is invalid.
    pub fn load() -> Self {
        state_path()
            .and_then(|path| std::fs::read_to_string(&path).ok())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Save to disk. Errors are logged but not propagated.
    pub fn save(&self) {
        let Some(path) = state_path() else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::warn!("Failed to save window state: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize window state: {e}"),
        }
    }
}

fn state_path() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("", "", "movieland")
        .map(|dirs| dirs.data_dir().join(FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_position() {
        let ws = WindowState::default();
        assert_eq!(ws.position(), None);
        assert_eq!(ws.size(), Size::new(1280.0, 800.0));
    }

    #[test]
    fn test_size_is_clamped() {
        let ws = WindowState {
            width: 100.0,
            height: 50.0,
            x: 10.0,
            y: 20.0,
        };
        assert_eq!(ws.size(), Size::new(480.0, 360.0));
        assert_eq!(ws.position(), Some(Point::new(10.0, 20.0)));
    }

    #[test]
    fn test_json_roundtrip() {
        let ws = WindowState {
            width: 1024.0,
            height: 700.0,
            x: 5.0,
            y: 5.0,
        };
        let json = serde_json::to_string(&ws).unwrap();
        assert_eq!(serde_json::from_str::<WindowState>(&json).unwrap(), ws);
    }
}
