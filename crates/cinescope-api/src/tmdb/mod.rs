//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 endpoints, aggregates
//! multi-type search results and provides the built-in fallback catalog.

mod api;
mod client;
mod image;
mod rate_limiter;
mod search;
pub mod substitute;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{Credential, TmdbClient, TmdbClientBuilder};
pub use image::{DEFAULT_IMAGE_SIZE, IMAGE_BASE_URL, PLACEHOLDER_IMAGE, image_url};
pub use search::{ResultSource, SearchAggregator, SearchOptions, SearchResponse, partition};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    DEFAULT_LANGUAGE, ListParams, MovieItem, PersonItem, SearchMultiParams, SearchResult,
    TmdbEpisode, TmdbGenre, TmdbPage, TmdbProvider, TmdbRegionProviders,
    TmdbSearchMultiResponse, TmdbSeasonSummary, TmdbTvDetails, TmdbTvSeason,
    TmdbWatchProviders, TvItem,
};
