//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{
    ListParams, MovieItem, SearchMultiParams, TmdbPage, TmdbSearchMultiResponse, TmdbTvDetails,
    TmdbTvSeason, TmdbWatchProviders, TvItem,
};

/// TMDB API trait.
///
/// The search aggregator is generic over this trait so that each
/// transport (API key, access token) and test doubles plug in alike.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Searches movies, TV series and people in one request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_multi(&self, params: &SearchMultiParams) -> Result<TmdbSearchMultiResponse>;

    /// Lists popular movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn popular_movies(&self, params: &ListParams) -> Result<TmdbPage<MovieItem>>;

    /// Lists popular TV series.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn popular_tv(&self, params: &ListParams) -> Result<TmdbPage<TvItem>>;

    /// Lists top rated movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn top_rated_movies(&self, params: &ListParams) -> Result<TmdbPage<MovieItem>>;

    /// Lists top rated TV series.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn top_rated_tv(&self, params: &ListParams) -> Result<TmdbPage<TvItem>>;

    /// Lists TV series with an episode airing today.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_airing_today(&self, params: &ListParams) -> Result<TmdbPage<TvItem>>;

    /// Fetches TV series details including the season list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_details(&self, series_id: u64, language: &str) -> Result<TmdbTvDetails>;

    /// Fetches TV season details including the episode list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_season(
        &self,
        series_id: u64,
        season_number: u32,
        language: &str,
    ) -> Result<TmdbTvSeason>;

    /// Fetches streaming/rent/buy providers for a TV series, per region.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn tv_watch_providers(&self, series_id: u64) -> Result<TmdbWatchProviders>;
}
