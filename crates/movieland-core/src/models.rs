mod genre;
mod movie;

pub use genre::{Genre, HomeGenre};
pub use movie::{Movie, MovieId, NOT_AVAILABLE};
