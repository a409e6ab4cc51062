//! Multi-type search with a fallback ladder.
//!
//! A query is sent to `search/multi` through the primary (API key)
//! transport. An error or an empty result list moves on to the access
//! token transport, and if that yields nothing the built-in catalog is
//! returned. The ladder never fails; `SearchResponse::source` tells the
//! caller which rung answered.
#![allow(clippy::future_not_send)]

use std::future::Future;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::instrument;

use super::api::LocalTmdbApi;
use super::substitute;
use super::types::{MovieItem, PersonItem, SearchMultiParams, SearchResult, TvItem};

/// Caller-selectable search behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Collect `person` hits into `SearchResponse::people`.
    pub include_people: bool,
}

/// Which rung of the ladder produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    /// Live data from the API key transport.
    Primary,
    /// Live data from the access token transport.
    AccessToken,
    /// Built-in catalog; no live source answered.
    Substitute,
}

impl ResultSource {
    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::AccessToken => "access_token",
            Self::Substitute => "substitute",
        }
    }
}

/// Search hits split by media type, each list in API order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    /// Movie hits.
    pub movies: Vec<MovieItem>,
    /// TV series hits.
    pub tv_shows: Vec<TvItem>,
    /// Person hits; always empty unless `include_people` was set.
    pub people: Vec<PersonItem>,
    /// Rung that produced this response.
    pub source: ResultSource,
}

impl SearchResponse {
    /// Creates an empty response attributed to `source`.
    const fn empty(source: ResultSource) -> Self {
        Self {
            movies: Vec::new(),
            tv_shows: Vec::new(),
            people: Vec::new(),
            source,
        }
    }

    /// Built-in catalog response: substitute movies and TV, no people.
    #[must_use]
    pub fn substitute() -> Self {
        Self {
            movies: substitute::movies(),
            tv_shows: substitute::tv_shows(),
            people: Vec::new(),
            source: ResultSource::Substitute,
        }
    }

    /// Returns true when no partition holds an item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.tv_shows.is_empty() && self.people.is_empty()
    }

    /// Returns true when the response is the built-in catalog.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.source == ResultSource::Substitute
    }
}

/// Splits raw hits into movies, TV and (optionally) people.
///
/// Unknown media types, and people when not requested, are dropped.
#[must_use]
pub fn partition(
    results: Vec<SearchResult>,
    options: SearchOptions,
    source: ResultSource,
) -> SearchResponse {
    let mut response = SearchResponse::empty(source);
    for item in results {
        match item {
            SearchResult::Movie(movie) => response.movies.push(movie),
            SearchResult::Tv(tv) => response.tv_shows.push(tv),
            SearchResult::Person(person) if options.include_people => {
                response.people.push(person);
            }
            SearchResult::Person(_) | SearchResult::Unknown => {}
        }
    }
    response
}

/// Multi-type search over two transports with a built-in last resort.
#[derive(Debug)]
pub struct SearchAggregator<P, F> {
    /// API key transport, tried first.
    primary: P,
    /// Access token transport, tried after the primary fails.
    fallback: F,
}

impl<P, F> SearchAggregator<P, F>
where
    P: LocalTmdbApi + Sync,
    F: LocalTmdbApi + Sync,
{
    /// Creates an aggregator over the given transports.
    pub const fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    /// Searches movies, TV series and optionally people.
    ///
    /// Never fails: errors and empty results fall through to the access
    /// token transport, then to the built-in catalog.
    #[instrument(skip_all, fields(query = query, page = page))]
    pub async fn search(&self, query: &str, page: u32, options: SearchOptions) -> SearchResponse {
        let params = SearchMultiParams::new(query).page(page);

        match self.search_primary(&params, options).await {
            Ok(response) => return response,
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "Primary search failed");
            }
        }

        tracing::info!("Trying search with access token");
        match self.search_fallback(&params, options).await {
            Ok(Some(response)) => return response,
            Ok(None) => tracing::warn!("Access token search returned no results"),
            Err(err) => {
                tracing::warn!(error = %format!("{err:#}"), "Access token search also failed");
            }
        }

        tracing::warn!("Serving built-in catalog");
        SearchResponse::substitute()
    }

    /// Runs `search` until `cancel` completes.
    ///
    /// Returns `None` when cancelled; the in-flight request is dropped
    /// and no partial result is delivered.
    pub async fn search_cancellable(
        &self,
        query: &str,
        page: u32,
        options: SearchOptions,
        cancel: impl Future<Output = ()>,
    ) -> Option<SearchResponse> {
        tokio::select! {
            biased;
            () = cancel => {
                tracing::debug!(query, "Search cancelled");
                None
            }
            response = self.search(query, page, options) => Some(response),
        }
    }

    /// First rung. An empty result list counts as a failure.
    async fn search_primary(
        &self,
        params: &SearchMultiParams,
        options: SearchOptions,
    ) -> Result<SearchResponse> {
        let response = self
            .primary
            .search_multi(params)
            .await
            .context("search/multi request failed")?;

        tracing::info!(count = response.results.len(), "Search results");

        if response.results.is_empty() {
            bail!("no search results found");
        }

        Ok(partition(response.results, options, ResultSource::Primary))
    }

    /// Second rung. `None` when nothing survives partitioning.
    async fn search_fallback(
        &self,
        params: &SearchMultiParams,
        options: SearchOptions,
    ) -> Result<Option<SearchResponse>> {
        let response = self
            .fallback
            .search_multi(params)
            .await
            .context("search/multi request with access token failed")?;

        let partitioned = partition(response.results, options, ResultSource::AccessToken);
        if partitioned.is_empty() {
            return Ok(None);
        }
        Ok(Some(partitioned))
    }
}
