use crate::error::MovielandError;
use crate::models::{Movie, MovieId};
use crate::normalize::{normalize_list, RawMovie};
use crate::storage::{SharedStore, WATCHLIST_KEY};

/// Result of a watchlist toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistChange {
    /// `true` if the movie was appended, `false` if it was removed.
    pub added: bool,
    /// Set when the last entry changed and the list is non-empty: the id to
    /// fetch recommendations for.
    pub recommend_for: Option<MovieId>,
}

/// The user's watchlist, mirrored to durable storage on every mutation.
pub struct WatchlistStore {
    store: SharedStore,
    movies: Vec<Movie>,
}

impl WatchlistStore {
    /// Load the persisted watchlist. A missing or unreadable value yields an
    /// empty list.
    pub fn load(store: SharedStore) -> Self {
        let movies = match read(&store) {
            Ok(movies) => movies,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable watchlist");
                Vec::new()
            }
        };
        tracing::debug!(count = movies.len(), "loaded watchlist");
        Self { store, movies }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn contains(&self, id: &MovieId) -> bool {
        self.movies.iter().any(|m| &m.id == id)
    }

    /// The most recently added entry.
    pub fn last(&self) -> Option<&Movie> {
        self.movies.last()
    }

    /// Remove the movie if present, otherwise append it.
    pub fn toggle(&mut self, movie: &Movie) -> WatchlistChange {
        let last_before = self.movies.last().map(|m| m.id.clone());

        let added = if let Some(pos) = self.movies.iter().position(|m| m.id == movie.id) {
            self.movies.remove(pos);
            false
        } else {
            self.movies.push(movie.clone());
            true
        };
        self.persist();

        let last_after = self.movies.last().map(|m| m.id.clone());
        let recommend_for = match last_after {
            Some(id) if last_before.as_ref() != Some(&id) => Some(id),
            _ => None,
        };

        tracing::debug!(id = %movie.id, added, count = self.movies.len(), "toggled watchlist entry");
        WatchlistChange {
            added,
            recommend_for,
        }
    }

    /// Empty the list and drop the persisted value entirely.
    pub fn clear(&mut self) {
        self.movies.clear();
        if let Err(e) = self.store.remove(WATCHLIST_KEY) {
            tracing::warn!(error = %e, "failed to remove persisted watchlist");
        }
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.movies)
            .map_err(MovielandError::from)
            .and_then(|json| self.store.set(WATCHLIST_KEY, &json));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to persist watchlist");
        }
    }
}

fn read(store: &SharedStore) -> Result<Vec<Movie>, MovielandError> {
    let Some(json) = store.get(WATCHLIST_KEY)? else {
        return Ok(Vec::new());
    };
    let raws: Vec<RawMovie> = serde_json::from_str(&json)?;
    Ok(normalize_list(&raws))
}
