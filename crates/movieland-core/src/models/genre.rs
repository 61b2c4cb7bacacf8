use serde::{Deserialize, Serialize};

/// A catalog genre. Fetched once per session and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// A genre shown as a carousel on the home view.
///
/// The display name is chosen by configuration and may differ from the
/// catalog's own name (e.g. "Sci-Fi" for "Science Fiction").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeGenre {
    pub name: String,
    pub id: u64,
}
