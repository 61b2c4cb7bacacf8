use serde::Deserialize;

use movieland_core::details::MovieDetails;
use movieland_core::models::Genre;

/// Cast members kept for the detail overlay.
const CAST_LIMIT: usize = 3;

/// Country whose certification is shown.
const CERTIFICATION_COUNTRY: &str = "US";

// ── Genre list ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TmdbGenreList {
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbGenre {
    pub id: u64,
    pub name: String,
}

impl TmdbGenre {
    pub fn into_genre(self) -> Genre {
        Genre {
            id: self.id,
            name: self.name,
        }
    }
}

// ── Movie detail ────────────────────────────────────────────────

/// `/movie/{id}` with `credits,release_dates` appended.
#[derive(Debug, Deserialize)]
pub struct TmdbMovieDetail {
    pub id: u64,
    pub runtime: Option<u32>,
    pub original_language: Option<String>,
    pub release_dates: Option<TmdbReleaseDates>,
    pub credits: Option<TmdbCredits>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbReleaseDates {
    #[serde(default)]
    pub results: Vec<TmdbCountryReleases>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCountryReleases {
    pub iso_3166_1: String,
    #[serde(default)]
    pub release_dates: Vec<TmdbReleaseDate>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbReleaseDate {
    #[serde(default)]
    pub certification: String,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<TmdbCastMember>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCastMember {
    pub name: String,
    #[serde(default)]
    pub order: u32,
}

/// `{"status_code": 7, "status_message": "Invalid API key"}`
#[derive(Debug, Deserialize)]
pub struct TmdbStatus {
    pub status_message: String,
}

impl TmdbMovieDetail {
    /// Certification of the first US release entry.
    pub fn certification(&self) -> Option<String> {
        self.release_dates
            .as_ref()?
            .results
            .iter()
            .find(|c| c.iso_3166_1 == CERTIFICATION_COUNTRY)?
            .release_dates
            .first()
            .map(|r| r.certification.clone())
            .filter(|c| !c.is_empty())
    }

    pub fn into_details(self) -> MovieDetails {
        let certification = self.certification();
        let mut cast = self.credits.map(|c| c.cast).unwrap_or_default();
        cast.sort_by_key(|m| m.order);

        MovieDetails {
            runtime: self.runtime.filter(|&r| r > 0),
            original_language: self.original_language.filter(|l| !l.is_empty()),
            certification,
            cast: cast.into_iter().take(CAST_LIMIT).map(|m| m.name).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use movieland_core::normalize::{normalize_list, RawPage};

    use super::*;

    #[test]
    fn test_genre_list() {
        let json = r#"{"genres":[{"id":28,"name":"Action"},{"id":878,"name":"Science Fiction"}]}"#;
        let list: TmdbGenreList = serde_json::from_str(json).unwrap();
        let genres: Vec<Genre> = list.genres.into_iter().map(|g| g.into_genre()).collect();
        assert_eq!(genres[1].id, 878);
        assert_eq!(genres[1].to_string(), "Science Fiction");
    }

    #[test]
    fn test_search_page() {
        let json = r#"{
            "page": 1,
            "results": [
                {
                    "adult": false,
                    "backdrop_path": "/frDS8A5vIP927KYAxTVVKRIbqZw.jpg",
                    "genre_ids": [28, 80],
                    "id": 272,
                    "original_language": "en",
                    "original_title": "Batman Begins",
                    "overview": "Driven by tragedy...",
                    "popularity": 16.4,
                    "poster_path": "/sPX89Td70IDDjVr85jdSBb4rWGr.jpg",
                    "release_date": "2005-06-10",
                    "title": "Batman Begins",
                    "video": false,
                    "vote_average": 7.7,
                    "vote_count": 21000
                },
                {
                    "id": 268,
                    "poster_path": null,
                    "release_date": "",
                    "title": "Batman",
                    "vote_average": 0
                }
            ],
            "total_pages": 12,
            "total_results": 233
        }"#;
        let page: RawPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 12);

        let movies = normalize_list(&page.results);
        assert_eq!(movies[0].year, "2005");
        assert_eq!(movies[0].rating, 7.7);
        assert_eq!(movies[1].year, "N/A");
        assert_eq!(movies[1].poster, "https://via.placeholder.com/400x600");
        assert_eq!(movies[1].rating, 0.0);
    }

    #[test]
    fn test_empty_page() {
        let page: RawPage =
            serde_json::from_str(r#"{"page":1,"results":[],"total_pages":0,"total_results":0}"#)
                .unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_movie_detail() {
        let json = r#"{
            "id": 550,
            "runtime": 139,
            "original_language": "en",
            "genres": [{"id": 18, "name": "Drama"}],
            "release_dates": {
                "results": [
                    {"iso_3166_1": "DE", "release_dates": [{"certification": "18", "type": 3}]},
                    {"iso_3166_1": "US", "release_dates": [
                        {"certification": "R", "type": 3},
                        {"certification": "", "type": 5}
                    ]}
                ]
            },
            "credits": {
                "cast": [
                    {"name": "Brad Pitt", "order": 1},
                    {"name": "Edward Norton", "order": 0},
                    {"name": "Helena Bonham Carter", "order": 2},
                    {"name": "Meat Loaf", "order": 3}
                ]
            }
        }"#;
        let detail: TmdbMovieDetail = serde_json::from_str(json).unwrap();
        let details = detail.into_details();
        assert_eq!(details.runtime, Some(139));
        assert_eq!(details.original_language.as_deref(), Some("en"));
        assert_eq!(details.certification.as_deref(), Some("R"));
        assert_eq!(
            details.cast,
            vec!["Edward Norton", "Brad Pitt", "Helena Bonham Carter"]
        );
    }

    #[test]
    fn test_movie_detail_without_us_release() {
        let json = r#"{
            "id": 1,
            "runtime": 0,
            "original_language": "ja",
            "release_dates": {"results": [{"iso_3166_1": "JP", "release_dates": [{"certification": "G"}]}]}
        }"#;
        let details = serde_json::from_str::<TmdbMovieDetail>(json)
            .unwrap()
            .into_details();
        assert_eq!(details.certification, None);
        assert_eq!(details.runtime, None);
        assert!(details.cast.is_empty());
    }

    #[test]
    fn test_status_body() {
        let status: TmdbStatus = serde_json::from_str(
            r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#,
        )
        .unwrap();
        assert!(status.status_message.starts_with("Invalid API key"));
    }
}
