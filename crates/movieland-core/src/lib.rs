pub mod appearance;
pub mod browser;
pub mod carousel;
pub mod config;
pub mod details;
pub mod error;
pub mod models;
pub mod normalize;
pub mod pagination;
pub mod search;
pub mod storage;
pub mod view;
pub mod visibility;
pub mod watchlist;
