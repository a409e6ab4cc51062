//! Catalog client library for cinescope.
//!
//! Provides the TMDB API client, the multi-type search aggregator and
//! the static catalog used when every live source fails.

/// TMDB API client and search aggregation.
pub mod tmdb;
