//! View-model normalization for movie records.
//!
//! Records reach the app in three source shapes:
//!
//! - **Canonical**: the app's own [`Movie`] shape (watchlist storage, or a
//!   record that was already normalized).
//! - **Catalog**: catalog search / discover / recommendation results, which
//!   carry a poster *path*, a release date and an average vote.
//! - **Legacy**: an older external schema with capitalized field names and
//!   a string external id.
//!
//! [`RawMovie`] holds the field groups of all three shapes side by side so a
//! single payload may mix them. Each canonical field is resolved by its own
//! rule table, tried in order; the first rule that yields a value wins, and
//! the field's documented default applies when none does.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::models::{Movie, MovieId, NOT_AVAILABLE};

/// CDN prefix for catalog poster paths.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Poster used whenever a record has no usable image.
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/400x600";

/// Media type assumed when a record does not say.
pub const DEFAULT_MEDIA_TYPE: &str = "movie";

// ── Raw record ───────────────────────────────────────────────────

/// Which source shape a field rule reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Canonical,
    Catalog,
    Legacy,
}

/// A movie record as received, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMovie {
    #[serde(flatten)]
    pub canonical: CanonicalFields,
    #[serde(flatten)]
    pub catalog: CatalogFields,
    #[serde(flatten)]
    pub legacy: LegacyFields,
}

/// Field names shared by the canonical shape and catalog results.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CanonicalFields {
    pub id: Option<MovieId>,
    pub title: Option<String>,
    pub year: Option<YearValue>,
    pub poster: Option<String>,
    pub genre: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub rating: Option<f64>,
}

/// Catalog-only fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogFields {
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub genres: Option<Vec<NamedGenre>>,
    pub genre_names: Option<Vec<String>>,
    pub media_type: Option<String>,
    pub vote_average: Option<f64>,
}

/// Legacy external-schema fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LegacyFields {
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
}

/// A genre object embedded in a record; only the name matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedGenre {
    pub name: String,
}

/// A year stored either as a number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum YearValue {
    Number(i64),
    Text(String),
}

/// One page of raw results from a paged catalog endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub results: Vec<RawMovie>,
}

impl From<&Movie> for RawMovie {
    fn from(movie: &Movie) -> Self {
        Self {
            canonical: CanonicalFields {
                id: Some(movie.id.clone()),
                title: Some(movie.title.clone()),
                year: Some(YearValue::Text(movie.year.clone())),
                poster: Some(movie.poster.clone()),
                genre: Some(movie.genre.clone()),
                kind: Some(movie.media_type.clone()),
                rating: Some(movie.rating),
            },
            ..Default::default()
        }
    }
}

// ── Rule tables ──────────────────────────────────────────────────

/// One way of reading a canonical field from a raw record.
pub struct Rule<T> {
    pub shape: Shape,
    /// Source field name, for diagnostics and tests.
    pub field: &'static str,
    pub probe: fn(&RawMovie) -> Option<T>,
}

/// Try `rules` in order; return the first value found with the field it came from.
pub fn resolve<T>(rules: &[Rule<T>], raw: &RawMovie) -> Option<(T, &'static str)> {
    rules
        .iter()
        .find_map(|rule| (rule.probe)(raw).map(|value| (value, rule.field)))
}

pub const ID_RULES: &[Rule<MovieId>] = &[
    Rule {
        shape: Shape::Canonical,
        field: "id",
        probe: id_from_canonical,
    },
    Rule {
        shape: Shape::Legacy,
        field: "imdbID",
        probe: id_from_legacy,
    },
];

pub const TITLE_RULES: &[Rule<String>] = &[
    Rule {
        shape: Shape::Canonical,
        field: "title",
        probe: title_from_canonical,
    },
    Rule {
        shape: Shape::Legacy,
        field: "Title",
        probe: title_from_legacy,
    },
];

pub const YEAR_RULES: &[Rule<String>] = &[
    Rule {
        shape: Shape::Canonical,
        field: "year",
        probe: year_from_canonical,
    },
    Rule {
        shape: Shape::Catalog,
        field: "release_date",
        probe: year_from_release_date,
    },
    Rule {
        shape: Shape::Legacy,
        field: "Year",
        probe: year_from_legacy,
    },
];

pub const POSTER_RULES: &[Rule<String>] = &[
    Rule {
        shape: Shape::Canonical,
        field: "poster",
        probe: poster_from_canonical,
    },
    Rule {
        shape: Shape::Catalog,
        field: "poster_path",
        probe: poster_from_path,
    },
    Rule {
        shape: Shape::Legacy,
        field: "Poster",
        probe: poster_from_legacy,
    },
];

pub const GENRE_RULES: &[Rule<String>] = &[
    Rule {
        shape: Shape::Canonical,
        field: "genre",
        probe: genre_from_canonical,
    },
    Rule {
        shape: Shape::Catalog,
        field: "genres",
        probe: genre_from_objects,
    },
    Rule {
        shape: Shape::Catalog,
        field: "genre_names",
        probe: genre_from_names,
    },
    Rule {
        shape: Shape::Legacy,
        field: "Genre",
        probe: genre_from_legacy,
    },
];

pub const TYPE_RULES: &[Rule<String>] = &[
    Rule {
        shape: Shape::Canonical,
        field: "type",
        probe: type_from_canonical,
    },
    Rule {
        shape: Shape::Catalog,
        field: "media_type",
        probe: type_from_media_type,
    },
    Rule {
        shape: Shape::Legacy,
        field: "Type",
        probe: type_from_legacy,
    },
];

pub const RATING_RULES: &[Rule<f64>] = &[
    Rule {
        shape: Shape::Canonical,
        field: "rating",
        probe: rating_from_canonical,
    },
    Rule {
        shape: Shape::Catalog,
        field: "vote_average",
        probe: rating_from_vote_average,
    },
];

// ── Probes ───────────────────────────────────────────────────────

/// Non-empty text that is not the "N/A" sentinel.
fn present(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != NOT_AVAILABLE)
        .map(str::to_string)
}

fn id_from_canonical(raw: &RawMovie) -> Option<MovieId> {
    raw.canonical.id.clone().filter(|id| !id.is_unknown())
}

fn id_from_legacy(raw: &RawMovie) -> Option<MovieId> {
    present(raw.legacy.imdb_id.as_ref()).map(MovieId::External)
}

fn title_from_canonical(raw: &RawMovie) -> Option<String> {
    present(raw.canonical.title.as_ref())
}

fn title_from_legacy(raw: &RawMovie) -> Option<String> {
    present(raw.legacy.title.as_ref())
}

fn year_from_canonical(raw: &RawMovie) -> Option<String> {
    match raw.canonical.year.as_ref()? {
        YearValue::Number(n) if *n > 0 => Some(n.to_string()),
        YearValue::Number(_) => None,
        YearValue::Text(s) => present(Some(s)),
    }
}

fn year_from_release_date(raw: &RawMovie) -> Option<String> {
    let date = present(raw.catalog.release_date.as_ref())?;
    year_of(&date)
}

fn year_from_legacy(raw: &RawMovie) -> Option<String> {
    present(raw.legacy.year.as_ref())
}

/// Four-digit year of an ISO date string (`"1999-10-15"` → `"1999"`).
fn year_of(date: &str) -> Option<String> {
    if let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(parsed.year().to_string());
    }
    // Partial dates ("1999", "1999-10") still carry the year.
    let prefix = date.get(..4)?;
    prefix
        .chars()
        .all(|c| c.is_ascii_digit())
        .then(|| prefix.to_string())
}

fn poster_from_canonical(raw: &RawMovie) -> Option<String> {
    present(raw.canonical.poster.as_ref())
}

fn poster_from_path(raw: &RawMovie) -> Option<String> {
    let path = present(raw.catalog.poster_path.as_ref())?;
    Some(poster_url(&path))
}

fn poster_from_legacy(raw: &RawMovie) -> Option<String> {
    present(raw.legacy.poster.as_ref())
}

/// Compose a poster URL from a catalog path fragment.
pub fn poster_url(path: &str) -> String {
    if path.starts_with('/') {
        format!("{POSTER_BASE_URL}{path}")
    } else {
        format!("{POSTER_BASE_URL}/{path}")
    }
}

fn genre_from_canonical(raw: &RawMovie) -> Option<String> {
    present(raw.canonical.genre.as_ref())
}

fn genre_from_objects(raw: &RawMovie) -> Option<String> {
    let genres = raw.catalog.genres.as_ref()?;
    join_names(genres.iter().map(|g| g.name.as_str()))
}

fn genre_from_names(raw: &RawMovie) -> Option<String> {
    let names = raw.catalog.genre_names.as_ref()?;
    join_names(names.iter().map(String::as_str))
}

fn genre_from_legacy(raw: &RawMovie) -> Option<String> {
    present(raw.legacy.genre.as_ref())
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> Option<String> {
    let joined = names
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    (!joined.is_empty()).then_some(joined)
}

fn type_from_canonical(raw: &RawMovie) -> Option<String> {
    present(raw.canonical.kind.as_ref())
}

fn type_from_media_type(raw: &RawMovie) -> Option<String> {
    present(raw.catalog.media_type.as_ref())
}

fn type_from_legacy(raw: &RawMovie) -> Option<String> {
    present(raw.legacy.kind.as_ref())
}

fn rating_from_canonical(raw: &RawMovie) -> Option<f64> {
    usable_rating(raw.canonical.rating)
}

fn rating_from_vote_average(raw: &RawMovie) -> Option<f64> {
    usable_rating(raw.catalog.vote_average)
}

/// A zero rating means "unrated" and defers to the next rule.
fn usable_rating(value: Option<f64>) -> Option<f64> {
    value
        .filter(|r| r.is_finite() && *r > 0.0)
        .map(|r| r.min(10.0))
}

// ── Entry points ─────────────────────────────────────────────────

/// Normalize one raw record into the canonical shape.
pub fn normalize(raw: &RawMovie) -> Movie {
    let not_available = || NOT_AVAILABLE.to_string();

    Movie {
        id: resolve(ID_RULES, raw)
            .map(|(v, _)| v)
            .unwrap_or_else(|| MovieId::External(not_available())),
        title: resolve(TITLE_RULES, raw)
            .map(|(v, _)| v)
            .unwrap_or_else(not_available),
        year: resolve(YEAR_RULES, raw)
            .map(|(v, _)| v)
            .unwrap_or_else(not_available),
        poster: resolve(POSTER_RULES, raw)
            .map(|(v, _)| v)
            .unwrap_or_else(|| PLACEHOLDER_POSTER.to_string()),
        genre: resolve(GENRE_RULES, raw)
            .map(|(v, _)| v)
            .unwrap_or_else(not_available),
        media_type: resolve(TYPE_RULES, raw)
            .map(|(v, _)| v)
            .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string()),
        rating: resolve(RATING_RULES, raw).map(|(v, _)| v).unwrap_or(0.0),
    }
}

/// Normalize a list, keeping the first occurrence of each id.
///
/// Records with no resolvable id are dropped: they cannot be told apart.
pub fn normalize_list<'a>(raws: impl IntoIterator<Item = &'a RawMovie>) -> Vec<Movie> {
    let mut seen = HashSet::new();
    raws.into_iter()
        .map(normalize)
        .filter(|movie| {
            if movie.id.is_unknown() {
                tracing::debug!(title = %movie.title, "dropping movie without id");
                return false;
            }
            seen.insert(movie.id.clone())
        })
        .collect()
}
