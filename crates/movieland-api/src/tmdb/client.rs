use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use movieland_core::config::TmdbConfig;
use movieland_core::details::MovieDetails;
use movieland_core::models::Genre;
use movieland_core::normalize::{RawMovie, RawPage};

use super::error::TmdbError;
use super::query::Endpoint;
use super::types::{TmdbGenreList, TmdbMovieDetail, TmdbStatus};
use crate::traits::{CatalogService, DiscoverFilter};

/// TMDB v3 API client.
pub struct TmdbClient {
    endpoint: Endpoint,
    http: Client,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Result<Self, TmdbError> {
        if config.api_key.is_empty() {
            tracing::warn!("no TMDB API key configured, catalog requests will be rejected");
        }
        Ok(Self {
            endpoint: Endpoint::new(&config.base_url, &config.api_key, &config.language)?,
            http: Client::new(),
        })
    }

    /// Check the HTTP response for errors, preferring TMDB's own status message.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, TmdbError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TmdbStatus>(&body)
                .map(|s| s.status_message)
                .unwrap_or(body);
            tracing::warn!(status, %message, "TMDB API error");
            Err(TmdbError::Api { status, message })
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, TmdbError> {
        // The query string carries the API key; only the path is logged.
        tracing::debug!(path = url.path(), "TMDB request");
        let resp = self.http.get(url).send().await?;
        let resp = Self::check_response(resp).await?;
        resp.json()
            .await
            .map_err(|e| TmdbError::Parse(e.to_string()))
    }
}

impl CatalogService for TmdbClient {
    type Error = TmdbError;

    async fn genres(&self) -> Result<Vec<Genre>, TmdbError> {
        let list: TmdbGenreList = self.get_json(self.endpoint.genres()).await?;
        Ok(list.genres.into_iter().map(|g| g.into_genre()).collect())
    }

    async fn search_title(
        &self,
        text: &str,
        genre: Option<u64>,
        page: u32,
    ) -> Result<RawPage, TmdbError> {
        self.get_json(self.endpoint.search(text, genre, page)).await
    }

    async fn discover(&self, filter: &DiscoverFilter, page: u32) -> Result<RawPage, TmdbError> {
        self.get_json(self.endpoint.discover(filter, page)).await
    }

    async fn recommendations(&self, movie_id: u64) -> Result<Vec<RawMovie>, TmdbError> {
        let page: RawPage = self
            .get_json(self.endpoint.recommendations(movie_id))
            .await?;
        Ok(page.results)
    }

    async fn details(&self, movie_id: u64) -> Result<MovieDetails, TmdbError> {
        let detail: TmdbMovieDetail = self.get_json(self.endpoint.details(movie_id)).await?;
        Ok(detail.into_details())
    }
}
