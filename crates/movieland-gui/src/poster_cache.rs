//! On-disk poster cache.
//!
//! Posters are downloaded once into the user cache directory and shown from
//! there on later runs. Cards render a placeholder until the file exists.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use movieland_core::models::{Movie, MovieId};
use movieland_core::normalize::PLACEHOLDER_POSTER;

/// Load state of one poster image.
#[derive(Debug, Clone, PartialEq)]
pub enum PosterState {
    Loading,
    Loaded(PathBuf),
    Failed,
}

/// A download the caller should start.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterFetch {
    pub id: MovieId,
    pub url: String,
    pub path: PathBuf,
}

#[derive(Debug)]
pub struct PosterCache {
    dir: PathBuf,
    states: HashMap<MovieId, PosterState>,
}

impl PosterCache {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            states: HashMap::new(),
        }
    }

    pub fn get(&self, id: &MovieId) -> Option<&PosterState> {
        self.states.get(id)
    }

    pub fn path_for(&self, id: &MovieId) -> PathBuf {
        poster_path(&self.dir, id)
    }

    /// Decide what to do for a movie's poster.
    ///
    /// Returns a fetch only the first time a poster is neither cached on disk
    /// nor already in flight. Movies without a real poster never download.
    pub fn request(&mut self, movie: &Movie) -> Option<PosterFetch> {
        if self.states.contains_key(&movie.id) {
            return None;
        }
        if movie.poster.is_empty() || movie.poster == PLACEHOLDER_POSTER {
            self.states.insert(movie.id.clone(), PosterState::Failed);
            return None;
        }

        let path = self.path_for(&movie.id);
        if path.exists() {
            self.states
                .insert(movie.id.clone(), PosterState::Loaded(path));
            return None;
        }

        self.states.insert(movie.id.clone(), PosterState::Loading);
        Some(PosterFetch {
            id: movie.id.clone(),
            url: movie.poster.clone(),
            path,
        })
    }

    /// Request every poster in `movies`, collecting the downloads to start.
    pub fn request_all<'a>(
        &mut self,
        movies: impl IntoIterator<Item = &'a Movie>,
    ) -> Vec<PosterFetch> {
        movies
            .into_iter()
            .filter_map(|movie| self.request(movie))
            .collect()
    }

    pub fn resolve(&mut self, id: MovieId, result: Result<PathBuf, String>) {
        let state = match result {
            Ok(path) => PosterState::Loaded(path),
            Err(e) => {
                tracing::debug!(%id, error = %e, "poster download failed");
                PosterState::Failed
            }
        };
        self.states.insert(id, state);
    }
}

/// Cache file for a movie id. Characters unsafe in file names become `_`.
pub fn poster_path(dir: &Path, id: &MovieId) -> PathBuf {
    let name: String = id
        .to_string()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    dir.join(format!("{name}.jpg"))
}

/// Download a poster to `path`, creating the cache directory as needed.
pub async fn fetch_poster(
    http: reqwest::Client,
    url: String,
    path: PathBuf,
) -> Result<PathBuf, String> {
    let resp = http.get(&url).send().await.map_err(|e| e.to_string())?;
    if !resp.status().is_success() {
        return Err(format!("HTTP {}", resp.status().as_u16()));
    }
    let bytes = resp.bytes().await.map_err(|e| e.to_string())?;

    store_poster(&path, &bytes)
        .await
        .map_err(|e| e.to_string())?;
    Ok(path)
}

/// Write through a `.part` file and rename it into place, so an
/// interrupted write never leaves a truncated poster at `path`.
async fn store_poster(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut part = path.as_os_str().to_owned();
    part.push(".part");
    let part = PathBuf::from(part);

    tokio::fs::write(&part, bytes).await?;
    tokio::fs::rename(&part, path).await
}
