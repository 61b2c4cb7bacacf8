//! Request URLs for the TMDB v3 API.

use url::Url;

use super::error::TmdbError;
use crate::traits::DiscoverFilter;

/// Builds endpoint URLs with the credential attached.
#[derive(Debug, Clone)]
pub struct Endpoint {
    base: Url,
    api_key: String,
    language: String,
}

impl Endpoint {
    pub fn new(base_url: &str, api_key: &str, language: &str) -> Result<Self, TmdbError> {
        let base = Url::parse(base_url).map_err(|e| TmdbError::BaseUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(TmdbError::BaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base,
            api_key: api_key.to_string(),
            language: language.to_string(),
        })
    }

    fn url(&self, segments: &[&str], params: &[(&str, String)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.api_key);
            if !self.language.is_empty() {
                query.append_pair("language", &self.language);
            }
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        url
    }

    pub fn genres(&self) -> Url {
        self.url(&["genre", "movie", "list"], &[])
    }

    pub fn search(&self, text: &str, genre: Option<u64>, page: u32) -> Url {
        let mut params = vec![("query", text.to_string())];
        if let Some(genre) = genre {
            params.push(("with_genres", genre.to_string()));
        }
        params.push(("page", page.to_string()));
        self.url(&["search", "movie"], &params)
    }

    pub fn discover(&self, filter: &DiscoverFilter, page: u32) -> Url {
        let mut params = vec![
            ("with_genres", filter.genre.to_string()),
            ("sort_by", "popularity.desc".to_string()),
            ("page", page.to_string()),
        ];
        if let Some((from, to)) = filter.released {
            params.push(("primary_release_date.gte", from.format("%Y-%m-%d").to_string()));
            params.push(("primary_release_date.lte", to.format("%Y-%m-%d").to_string()));
        }
        if let Some(votes) = filter.min_vote_count {
            params.push(("vote_count.gte", votes.to_string()));
        }
        self.url(&["discover", "movie"], &params)
    }

    pub fn recommendations(&self, movie_id: u64) -> Url {
        let id = movie_id.to_string();
        self.url(&["movie", &id, "recommendations"], &[])
    }

    pub fn details(&self, movie_id: u64) -> Url {
        let id = movie_id.to_string();
        self.url(
            &["movie", &id],
            &[("append_to_response", "credits,release_dates".to_string())],
        )
    }
}
