use serde::{Deserialize, Serialize};

/// Sentinel used for any canonical field the source did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Movie identifier: a numeric catalog id, or an external string id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Catalog(u64),
    External(String),
}

impl MovieId {
    /// The numeric catalog id, if this identifier can address the catalog.
    pub fn catalog_id(&self) -> Option<u64> {
        match self {
            Self::Catalog(id) => Some(*id),
            Self::External(s) => s.parse().ok(),
        }
    }

    /// Whether this id is the "no identifier" sentinel.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::External(s) if s.is_empty() || s == NOT_AVAILABLE)
    }
}

impl From<u64> for MovieId {
    fn from(id: u64) -> Self {
        Self::Catalog(id)
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catalog(id) => write!(f, "{id}"),
            Self::External(s) => f.write_str(s),
        }
    }
}

/// Canonical movie record shared by every list in the app.
///
/// This is also the exact shape persisted in the watchlist: detail fields
/// (runtime, certification, language) are never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: String,
    pub poster: String,
    pub genre: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub rating: f64,
}

impl Movie {
    /// Rating formatted for the badge, one decimal place.
    pub fn rating_label(&self) -> String {
        format!("{:.1}", self.rating)
    }

    /// Whether the genre label carries real data.
    pub fn has_genre(&self) -> bool {
        !self.genre.is_empty() && self.genre != NOT_AVAILABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_id_untagged() {
        let numeric: MovieId = serde_json::from_str("550").unwrap();
        assert_eq!(numeric, MovieId::Catalog(550));

        let external: MovieId = serde_json::from_str("\"tt0137523\"").unwrap();
        assert_eq!(external, MovieId::External("tt0137523".into()));
        assert_eq!(external.catalog_id(), None);

        assert_eq!(serde_json::to_string(&MovieId::Catalog(550)).unwrap(), "550");
    }

    #[test]
    fn test_numeric_string_id_addresses_catalog() {
        assert_eq!(MovieId::External("603".into()).catalog_id(), Some(603));
        assert!(MovieId::External(NOT_AVAILABLE.into()).is_unknown());
        assert!(!MovieId::Catalog(0).is_unknown());
    }

    #[test]
    fn test_type_field_renamed() {
        let movie = Movie {
            id: MovieId::Catalog(550),
            title: "Fight Club".into(),
            year: "1999".into(),
            poster: "https://image.tmdb.org/t/p/w500/a.jpg".into(),
            genre: "Drama".into(),
            media_type: "movie".into(),
            rating: 8.4,
        };
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["type"], "movie");
        assert_eq!(movie.rating_label(), "8.4");
    }
}
