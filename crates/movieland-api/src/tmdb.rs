pub mod client;
pub mod error;
pub mod query;
pub mod types;

pub use client::TmdbClient;
pub use error::TmdbError;
