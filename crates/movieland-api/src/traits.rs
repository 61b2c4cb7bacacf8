//! Trait definition for the remote movie catalog.
//!
//! The UI only talks to the catalog through this trait, so tests can swap in
//! a fake service.

use std::future::Future;

use chrono::NaiveDate;
use movieland_core::config::HomeConfig;
use movieland_core::details::MovieDetails;
use movieland_core::models::Genre;
use movieland_core::normalize::{RawMovie, RawPage};

/// A remote movie metadata catalog.
pub trait CatalogService: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All movie genres known to the catalog.
    fn genres(&self) -> impl Future<Output = Result<Vec<Genre>, Self::Error>> + Send;

    /// Search by title, optionally restricted to a genre.
    fn search_title(
        &self,
        text: &str,
        genre: Option<u64>,
        page: u32,
    ) -> impl Future<Output = Result<RawPage, Self::Error>> + Send;

    /// Browse a genre by popularity.
    fn discover(
        &self,
        filter: &DiscoverFilter,
        page: u32,
    ) -> impl Future<Output = Result<RawPage, Self::Error>> + Send;

    /// Movies recommended for someone who liked `movie_id`.
    fn recommendations(
        &self,
        movie_id: u64,
    ) -> impl Future<Output = Result<Vec<RawMovie>, Self::Error>> + Send;

    /// Runtime, language, certification and credits for one movie.
    fn details(
        &self,
        movie_id: u64,
    ) -> impl Future<Output = Result<MovieDetails, Self::Error>> + Send;
}

/// Parameters of a discover-by-genre query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverFilter {
    pub genre: u64,
    /// Inclusive primary release date range.
    pub released: Option<(NaiveDate, NaiveDate)>,
    pub min_vote_count: Option<u32>,
}

impl DiscoverFilter {
    /// Plain genre browse, as used by the search view.
    pub fn genre(genre: u64) -> Self {
        Self {
            genre,
            released: None,
            min_vote_count: None,
        }
    }

    /// Genre browse restricted to recent, reasonably voted releases, as used
    /// by the home carousels.
    pub fn home(genre: u64, home: &HomeConfig) -> Self {
        Self {
            genre,
            released: Some((home.release_from, home.release_to)),
            min_vote_count: Some(home.min_vote_count),
        }
    }
}
