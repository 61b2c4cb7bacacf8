pub mod feed;
pub mod tmdb;
pub mod traits;

pub use tmdb::{TmdbClient, TmdbError};
pub use traits::{CatalogService, DiscoverFilter};
