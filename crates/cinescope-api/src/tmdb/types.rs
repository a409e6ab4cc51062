//! TMDB API response types and request parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Response language used by every catalog request unless overridden.
pub const DEFAULT_LANGUAGE: &str = "it-IT";

// --- Search Multi ---

/// Response from the `search/multi` endpoint.
///
/// `results` is empty when the field is absent or null. Items that fail
/// to decode become `SearchResult::Unknown` instead of failing the page.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchMultiResponse {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Heterogeneous results in API order.
    #[serde(default, deserialize_with = "deserialize_results")]
    pub results: Vec<SearchResult>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

/// A single `search/multi` hit, discriminated by `media_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub enum SearchResult {
    /// `media_type: "movie"`.
    Movie(MovieItem),
    /// `media_type: "tv"`.
    Tv(TvItem),
    /// `media_type: "person"`.
    Person(PersonItem),
    /// Any other media type (e.g. `"collection"`).
    #[serde(other)]
    Unknown,
}

/// Decodes `results` item by item.
fn deserialize_results<'de, D>(deserializer: D) -> Result<Vec<SearchResult>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .map(|value| {
            SearchResult::deserialize(value).unwrap_or_else(|err| {
                tracing::debug!(error = %err, "Dropping undecodable search result");
                SearchResult::Unknown
            })
        })
        .collect())
}

/// Movie record as returned by search and list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovieItem {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Original title.
    pub original_title: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD).
    pub release_date: Option<String>,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Popularity score.
    pub popularity: f64,
    /// Genre IDs.
    pub genre_ids: Vec<u32>,
    /// Original language (ISO 639-1).
    pub original_language: Option<String>,
    /// Adult flag.
    pub adult: bool,
}

/// TV series record as returned by search and list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TvItem {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    #[serde(alias = "title")]
    pub name: String,
    /// Original name.
    pub original_name: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// First air date (YYYY-MM-DD).
    pub first_air_date: Option<String>,
    /// Vote average.
    pub vote_average: f64,
    /// Vote count.
    pub vote_count: u32,
    /// Popularity score.
    pub popularity: f64,
    /// Genre IDs.
    pub genre_ids: Vec<u32>,
    /// Origin countries (ISO 3166-1).
    pub origin_country: Vec<String>,
    /// Original language (ISO 639-1).
    pub original_language: Option<String>,
}

/// Person record as returned by `search/multi`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonItem {
    /// TMDB person ID.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Original name.
    pub original_name: Option<String>,
    /// Profile image path.
    pub profile_path: Option<String>,
    /// Department the person is best known for (e.g. "Acting").
    pub known_for_department: Option<String>,
    /// Popularity score.
    pub popularity: f64,
    /// TMDB gender code (0 = unspecified).
    pub gender: u8,
    /// Adult flag.
    pub adult: bool,
}

// --- Lists ---

/// Paged list response (`movie/popular`, `tv/top_rated`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage<T> {
    /// Current page number.
    #[serde(default)]
    pub page: u32,
    /// Items on this page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of results.
    #[serde(default)]
    pub total_results: u32,
}

// --- TV Details ---

/// Response from `tv/{series_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvDetails {
    /// TMDB series ID.
    pub id: u64,
    /// Localized name.
    pub name: String,
    /// Original name.
    #[serde(default)]
    pub original_name: Option<String>,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// First air date.
    #[serde(default)]
    pub first_air_date: Option<String>,
    /// Last air date.
    #[serde(default)]
    pub last_air_date: Option<String>,
    /// Total number of episodes.
    #[serde(default)]
    pub number_of_episodes: u32,
    /// Total number of seasons.
    #[serde(default)]
    pub number_of_seasons: u32,
    /// Season summaries.
    #[serde(default)]
    pub seasons: Vec<TmdbSeasonSummary>,
    /// Status (e.g. "Returning Series", "Ended").
    #[serde(default)]
    pub status: Option<String>,
    /// Genres.
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Whether the show is still in production.
    #[serde(default)]
    pub in_production: bool,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

/// Season summary within TV details.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSeasonSummary {
    /// TMDB season ID.
    pub id: u64,
    /// Season number (0 = specials).
    pub season_number: u32,
    /// Number of episodes in this season.
    #[serde(default)]
    pub episode_count: u32,
    /// Air date of this season.
    #[serde(default)]
    pub air_date: Option<String>,
    /// Season name.
    #[serde(default)]
    pub name: String,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

// --- TV Season ---

/// Response from `tv/{series_id}/season/{season_number}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvSeason {
    /// TMDB season ID.
    pub id: u64,
    /// Season number.
    pub season_number: u32,
    /// Season name.
    #[serde(default)]
    pub name: Option<String>,
    /// Season overview.
    #[serde(default)]
    pub overview: Option<String>,
    /// Air date.
    #[serde(default)]
    pub air_date: Option<String>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Episodes in this season.
    #[serde(default)]
    pub episodes: Vec<TmdbEpisode>,
}

/// A single episode within a season.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbEpisode {
    /// TMDB episode ID.
    pub id: u64,
    /// Episode number within the season.
    pub episode_number: u32,
    /// Season number.
    pub season_number: u32,
    /// Episode name.
    #[serde(default)]
    pub name: String,
    /// Episode overview.
    #[serde(default)]
    pub overview: Option<String>,
    /// Air date.
    #[serde(default)]
    pub air_date: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Vote average.
    #[serde(default)]
    pub vote_average: f64,
    /// Still image path.
    #[serde(default)]
    pub still_path: Option<String>,
}

// --- Watch Providers ---

/// Response from `tv/{series_id}/watch/providers`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbWatchProviders {
    /// TMDB series ID.
    pub id: u64,
    /// Providers keyed by region code (ISO 3166-1).
    #[serde(default)]
    pub results: BTreeMap<String, TmdbRegionProviders>,
}

/// Watch providers available in a single region.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TmdbRegionProviders {
    /// JustWatch landing page.
    pub link: Option<String>,
    /// Subscription streaming.
    pub flatrate: Vec<TmdbProvider>,
    /// Rental.
    pub rent: Vec<TmdbProvider>,
    /// Purchase.
    pub buy: Vec<TmdbProvider>,
}

/// A watch provider entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbProvider {
    /// Provider ID.
    pub provider_id: u32,
    /// Provider name.
    pub provider_name: String,
    /// Logo image path.
    #[serde(default)]
    pub logo_path: Option<String>,
    /// Display priority (lower first).
    #[serde(default)]
    pub display_priority: u32,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default)]
    pub success: bool,
}

// --- Parameters ---

/// Parameters for `search/multi`.
#[derive(Debug, Clone)]
pub struct SearchMultiParams {
    /// Free-text query, sent as-is.
    pub query: String,
    /// Response language (default: "it-IT").
    pub language: String,
    /// Result page (1-based, default: 1).
    pub page: u32,
}

impl SearchMultiParams {
    /// Creates search params for the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            language: String::from(DEFAULT_LANGUAGE),
            page: 1,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page; `0` is clamped to `1`.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}

/// Parameters shared by the paged list endpoints.
#[derive(Debug, Clone)]
pub struct ListParams {
    /// Response language (default: "it-IT").
    pub language: String,
    /// Result page (1-based, default: 1).
    pub page: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            language: String::from(DEFAULT_LANGUAGE),
            page: 1,
        }
    }
}

impl ListParams {
    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the result page; `0` is clamped to `1`.
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::panic)]

    use super::*;

    #[test]
    fn test_search_result_dispatches_on_media_type() {
        // Arrange
        let json = r#"[
            {"id": 1, "media_type": "movie", "title": "Dune"},
            {"id": 2, "media_type": "tv", "name": "Shogun"},
            {"id": 3, "media_type": "person", "name": "Zendaya"}
        ]"#;

        // Act
        let results: Vec<SearchResult> = serde_json::from_str(json).unwrap();

        // Assert
        assert!(matches!(&results[0], SearchResult::Movie(m) if m.title == "Dune"));
        assert!(matches!(&results[1], SearchResult::Tv(t) if t.name == "Shogun"));
        assert!(matches!(&results[2], SearchResult::Person(p) if p.name == "Zendaya"));
    }

    #[test]
    fn test_result_without_media_type_is_dropped_alone() {
        // Arrange
        let json = r#"{"page": 1, "results": [
            {"id": 106379, "media_type": "tv", "name": "Fallout"},
            {"id": 5, "name": "no type"}
        ]}"#;

        // Act
        let response: TmdbSearchMultiResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.results.len(), 2);
        assert!(matches!(&response.results[0], SearchResult::Tv(t) if t.id == 106_379));
        assert_eq!(response.results[1], SearchResult::Unknown);
    }

    #[test]
    fn test_malformed_results_do_not_fail_the_page() {
        // Arrange
        let json = r#"{"results": [
            {"id": 6, "media_type": "movie", "title": null},
            {"id": 7, "media_type": 42},
            "not an object",
            {"id": 1104845, "media_type": "movie", "title": "Fallout"}
        ]}"#;

        // Act
        let response: TmdbSearchMultiResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.results[0], SearchResult::Unknown);
        assert_eq!(response.results[1], SearchResult::Unknown);
        assert_eq!(response.results[2], SearchResult::Unknown);
        assert!(matches!(&response.results[3], SearchResult::Movie(m) if m.id == 1_104_845));
    }

    #[test]
    fn test_null_results_decode_as_empty() {
        // Arrange
        let json = r#"{"page": 1, "results": null}"#;

        // Act
        let response: TmdbSearchMultiResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_unknown_media_type_maps_to_unknown() {
        // Arrange
        let json = r#"{"id": 10, "media_type": "collection", "name": "Saga"}"#;

        // Act
        let result: SearchResult = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(result, SearchResult::Unknown);
    }

    #[test]
    fn test_tv_item_accepts_title_field() {
        // Arrange
        let json = r#"{"id": 106379, "media_type": "tv", "title": "Fallout"}"#;

        // Act
        let result: SearchResult = serde_json::from_str(json).unwrap();

        // Assert
        let SearchResult::Tv(tv) = result else {
            panic!("expected tv variant");
        };
        assert_eq!(tv.id, 106_379);
        assert_eq!(tv.name, "Fallout");
        assert!(tv.poster_path.is_none());
    }

    #[test]
    fn test_missing_results_field_is_empty() {
        // Arrange
        let json = r#"{"page": 1}"#;

        // Act
        let response: TmdbSearchMultiResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(response.results.is_empty());
        assert_eq!(response.total_results, 0);
    }

    #[test]
    fn test_parse_search_multi_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/search_multi_fallout.json");

        // Act
        let response: TmdbSearchMultiResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.page, 1);
        assert_eq!(response.results.len(), 5);
        assert!(matches!(&response.results[0], SearchResult::Tv(t) if t.id == 106_379));
    }

    #[test]
    fn test_parse_popular_movies_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_popular.json");

        // Act
        let page: TmdbPage<MovieItem> = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(page.page, 1);
        assert_eq!(page.results[0].id, 693_134);
    }

    #[test]
    fn test_parse_tv_details_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/tv_details_106379.json");

        // Act
        let details: TmdbTvDetails = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(details.id, 106_379);
        assert_eq!(details.name, "Fallout");
        assert!(!details.seasons.is_empty());
    }

    #[test]
    fn test_parse_tv_season_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/tv_season_106379_1.json");

        // Act
        let season: TmdbTvSeason = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(season.season_number, 1);
        assert_eq!(season.episodes[0].episode_number, 1);
    }

    #[test]
    fn test_parse_watch_providers_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/tv_watch_providers_106379.json");

        // Act
        let providers: TmdbWatchProviders = serde_json::from_str(json).unwrap();

        // Assert
        let italy = providers.results.get("IT").unwrap();
        assert_eq!(italy.flatrate[0].provider_name, "Amazon Prime Video");
        assert!(italy.rent.is_empty());
    }

    #[test]
    fn test_search_params_defaults_to_italian_first_page() {
        // Arrange & Act
        let params = SearchMultiParams::new("Fallout");

        // Assert
        assert_eq!(params.language, "it-IT");
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_page_zero_is_clamped() {
        // Arrange & Act
        let search = SearchMultiParams::new("x").page(0);
        let list = ListParams::default().page(0);

        // Assert
        assert_eq!(search.page, 1);
        assert_eq!(list.page, 1);
    }
}
