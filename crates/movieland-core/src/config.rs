use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::MovielandError;
use crate::models::HomeGenre;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Environment variable that overrides `tmdb.api_key`.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub tmdb: TmdbConfig,
    pub home: HomeConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
}

/// Genre carousels on the home view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeConfig {
    pub genres: Vec<HomeGenre>,
    pub release_from: NaiveDate,
    pub release_to: NaiveDate,
    pub min_vote_count: u32,
    /// Cards kept per carousel.
    pub per_genre: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub scroll_threshold: f32,
}

impl AppConfig {
    /// Load config: the given file, else the user file if it exists, else the
    /// built-in defaults. `TMDB_API_KEY` is applied on top.
    pub fn load(path: Option<&Path>) -> Result<Self, MovielandError> {
        let user_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path);

        let mut config = if user_path.exists() {
            let user_str = std::fs::read_to_string(&user_path)?;
            tracing::debug!(path = %user_path.display(), "loading config");
            Self::parse(&user_str)?
        } else if path.is_some() {
            return Err(MovielandError::Config(format!(
                "config file not found: {}",
                user_path.display()
            )));
        } else {
            Self::parse(DEFAULT_CONFIG)?
        };

        config.apply_env(std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self, MovielandError> {
        toml::from_str(content).map_err(|e| MovielandError::Config(e.to_string()))
    }

    fn apply_env(&mut self, api_key: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.tmdb.api_key = key.trim().to_string();
        }
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Path to the key-value database.
    pub fn db_path() -> PathBuf {
        Self::data_dir().join("movieland.db")
    }

    /// Ensure the data directory exists and return the DB path.
    pub fn ensure_db_path() -> Result<PathBuf, MovielandError> {
        let path = Self::db_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(path)
    }

    /// Directory holding downloaded posters.
    pub fn poster_cache_dir() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.cache_dir().join("posters"))
            .unwrap_or_else(|| PathBuf::from("posters"))
    }

    /// Directory for rolling log files.
    pub fn log_dir() -> PathBuf {
        Self::data_dir().join("logs")
    }

    fn data_dir() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "movieland")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.home.genres.len(), 6);
        assert_eq!(config.home.genres[3].name, "Sci-Fi");
        assert_eq!(config.home.genres[3].id, 878);
        assert_eq!(
            config.home.release_from,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
        assert_eq!(config.home.min_vote_count, 50);
        assert_eq!(config.home.per_genre, 20);
    }

    #[test]
    fn test_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.home.genres, config.home.genres);
        assert_eq!(deserialized.home.release_to, config.home.release_to);
    }

    #[test]
    fn test_env_overrides_api_key() {
        let mut config = AppConfig::default();
        config.apply_env(Some("  secret ".into()));
        assert_eq!(config.tmdb.api_key, "secret");

        config.apply_env(Some(String::new()));
        assert_eq!(config.tmdb.api_key, "secret");
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        let mut config = AppConfig::default();
        config.search.scroll_threshold = 42.0;
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.search.scroll_threshold, 42.0);

        let missing = AppConfig::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(missing, Err(MovielandError::Config(_))));
    }
}
