//! Catalog calls that combine several requests or dispatch on a query shape.

use movieland_core::config::HomeConfig;
use movieland_core::models::HomeGenre;
use movieland_core::normalize::{RawMovie, RawPage};
use movieland_core::search::{SearchQuery, SearchRequest};

use crate::traits::{CatalogService, DiscoverFilter};

/// Run one page of a search: title search for text queries, discovery for a
/// bare genre.
pub async fn run_search<S: CatalogService>(
    service: &S,
    request: &SearchRequest,
) -> Result<RawPage, S::Error> {
    match &request.query {
        SearchQuery::Title { text, genre } => {
            service.search_title(text, *genre, request.page).await
        }
        SearchQuery::Genre(genre) => {
            service
                .discover(&DiscoverFilter::genre(*genre), request.page)
                .await
        }
    }
}

/// Load every home carousel, one genre at a time, in configured order.
///
/// A failed genre yields an empty row; the other rows still load.
pub async fn load_home_rows<S: CatalogService>(
    service: &S,
    home: &HomeConfig,
) -> Vec<(HomeGenre, Vec<RawMovie>)> {
    let mut rows = Vec::with_capacity(home.genres.len());
    for genre in &home.genres {
        let filter = DiscoverFilter::home(genre.id, home);
        let movies = match service.discover(&filter, 1).await {
            Ok(page) => {
                let mut results = page.results;
                results.truncate(home.per_genre);
                results
            }
            Err(e) => {
                tracing::warn!(genre = %genre.name, error = %e, "failed to load genre row");
                Vec::new()
            }
        };
        rows.push((genre.clone(), movies));
    }
    rows
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use movieland_core::config::AppConfig;
    use movieland_core::details::MovieDetails;
    use movieland_core::models::Genre;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("fake failure")]
    struct FakeError;

    /// Records calls in order; fails discovery for one genre.
    #[derive(Default)]
    struct FakeCatalog {
        calls: Mutex<Vec<String>>,
        failing_genre: Option<u64>,
    }

    impl FakeCatalog {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn page(count: u64) -> RawPage {
            RawPage {
                page: 1,
                total_pages: 1,
                results: (1..=count)
                    .map(|id| serde_json::from_value(serde_json::json!({ "id": id })).unwrap())
                    .collect(),
            }
        }
    }

    impl CatalogService for FakeCatalog {
        type Error = FakeError;

        async fn genres(&self) -> Result<Vec<Genre>, FakeError> {
            self.record("genres".into());
            Ok(Vec::new())
        }

        async fn search_title(
            &self,
            text: &str,
            genre: Option<u64>,
            page: u32,
        ) -> Result<RawPage, FakeError> {
            self.record(format!("search {text} {genre:?} {page}"));
            Ok(Self::page(3))
        }

        async fn discover(&self, filter: &DiscoverFilter, page: u32) -> Result<RawPage, FakeError> {
            self.record(format!(
                "discover {} {} {:?}",
                filter.genre,
                page,
                filter.min_vote_count
            ));
            if self.failing_genre == Some(filter.genre) {
                return Err(FakeError);
            }
            Ok(Self::page(25))
        }

        async fn recommendations(&self, movie_id: u64) -> Result<Vec<RawMovie>, FakeError> {
            self.record(format!("recommendations {movie_id}"));
            Ok(Vec::new())
        }

        async fn details(&self, movie_id: u64) -> Result<MovieDetails, FakeError> {
            self.record(format!("details {movie_id}"));
            Ok(MovieDetails::default())
        }
    }

    #[tokio::test]
    async fn test_home_rows_load_in_order() {
        let catalog = FakeCatalog {
            failing_genre: Some(27),
            ..Default::default()
        };
        let home = AppConfig::default().home;

        let rows = load_home_rows(&catalog, &home).await;

        let names: Vec<&str> = rows.iter().map(|(g, _)| g.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Action", "Comedy", "Drama", "Sci-Fi", "Horror", "Romance"]
        );
        assert_eq!(
            catalog.calls(),
            vec![
                "discover 28 1 Some(50)",
                "discover 35 1 Some(50)",
                "discover 18 1 Some(50)",
                "discover 878 1 Some(50)",
                "discover 27 1 Some(50)",
                "discover 10749 1 Some(50)",
            ]
        );

        // Truncated to the configured size; the failing genre is empty.
        assert_eq!(rows[0].1.len(), 20);
        assert!(rows[4].1.is_empty());
        assert_eq!(rows[5].1.len(), 20);
    }

    #[tokio::test]
    async fn test_run_search_dispatch() {
        let catalog = FakeCatalog::default();

        let title = SearchRequest {
            query: SearchQuery::Title {
                text: "batman".into(),
                genre: Some(28),
            },
            page: 2,
        };
        run_search(&catalog, &title).await.unwrap();

        let genre = SearchRequest {
            query: SearchQuery::Genre(35),
            page: 1,
        };
        run_search(&catalog, &genre).await.unwrap();

        assert_eq!(
            catalog.calls(),
            vec!["search batman Some(28) 2", "discover 35 1 None"]
        );
    }
}
