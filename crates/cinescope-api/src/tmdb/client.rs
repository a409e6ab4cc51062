//! `TmdbClient` - retrying TMDB API transport.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::{Client, StatusCode};
use tokio::sync::Mutex;
use tracing::instrument;
use url::Url;

use super::api::LocalTmdbApi;
use super::rate_limiter::RequestThrottle;
use super::types::{
    ListParams, MovieItem, SearchMultiParams, TmdbErrorResponse, TmdbPage,
    TmdbSearchMultiResponse, TmdbTvDetails, TmdbTvSeason, TmdbWatchProviders, TvItem,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Maximum number of retries for transient failures.
const MAX_RETRIES: u32 = 3;

/// Backoff unit between retries, multiplied by the attempt number.
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// How a request authenticates against TMDB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// v3 API key, sent as the `api_key` query parameter.
    ApiKey(String),
    /// v4 read access token, sent as `Authorization: Bearer`.
    AccessToken(String),
}

impl Credential {
    /// Short label for logs; never includes the secret.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ApiKey(_) => "api_key",
            Self::AccessToken(_) => "access_token",
        }
    }
}

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Credential attached to every request.
    credential: Credential,
    /// Backoff unit between retries.
    retry_backoff: Duration,
    /// Request pacing.
    throttle: Arc<Mutex<RequestThrottle>>,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    credential: Option<Credential>,
    user_agent: Option<String>,
    min_interval: Option<Duration>,
    retry_backoff: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            credential: None,
            user_agent: None,
            min_interval: None,
            retry_backoff: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Authenticates with a v3 API key. Replaces any previous credential.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.credential = Some(Credential::ApiKey(key.into()));
        self
    }

    /// Authenticates with a bearer access token. Replaces any previous credential.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.credential = Some(Credential::AccessToken(token.into()));
        self
    }

    /// Sets the credential directly.
    #[must_use]
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the minimum request interval (default: 25ms).
    #[must_use]
    pub const fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    /// Sets the retry backoff unit (default: 1s).
    #[must_use]
    pub const fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = Some(backoff);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - no credential is set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let credential = self
            .credential
            .context("api_key or access_token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let throttle = self
            .min_interval
            .map_or_else(RequestThrottle::default_interval, RequestThrottle::new);

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            credential,
            retry_backoff: self.retry_backoff.unwrap_or(RETRY_BACKOFF),
            throttle: Arc::new(Mutex::new(throttle)),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Returns the credential this client authenticates with.
    #[must_use]
    pub const fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Waits before the next attempt, or fails once retries are exhausted.
    async fn backoff(&self, retries: &mut u32, path: &str, reason: &str) -> Result<()> {
        *retries = retries.saturating_add(1);
        if *retries > MAX_RETRIES {
            bail!("TMDB API {reason} persisted after {MAX_RETRIES} retries: {path}");
        }
        tracing::warn!(
            retry = *retries,
            max_retries = MAX_RETRIES,
            reason,
            "TMDB API transient failure. Retrying..."
        );
        tokio::time::sleep(self.retry_backoff.saturating_mul(*retries)).await;
        Ok(())
    }

    /// Sends an authenticated, rate-limited GET and decodes the JSON body.
    ///
    /// HTTP 429, 5xx and connect/timeout errors are retried up to
    /// `MAX_RETRIES` times with linear backoff.
    #[instrument(skip_all, fields(path = path, auth = self.credential.kind()))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut retries = 0u32;
        loop {
            self.throttle.lock().await.acquire().await;

            let builder = self.http_client.get(url.clone()).query(query);
            let builder = match &self.credential {
                Credential::ApiKey(key) => builder.query(&[("api_key", key.as_str())]),
                Credential::AccessToken(token) => builder.bearer_auth(token),
            };
            let request = builder
                .build()
                .with_context(|| format!("failed to build request: {path}"))?;

            tracing::debug!(?query, "TMDB API request");

            let response = match self.http_client.execute(request).await {
                Ok(response) => response,
                Err(err) if err.is_connect() || err.is_timeout() => {
                    tracing::debug!(error = %err, "TMDB API connection error");
                    self.backoff(&mut retries, path, "connection error").await?;
                    continue;
                }
                Err(err) => return Err(err).with_context(|| format!("request failed: {path}")),
            };

            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS {
                self.backoff(&mut retries, path, "rate limit").await?;
                continue;
            }
            if status.is_server_error() {
                self.backoff(&mut retries, path, "server error").await?;
                continue;
            }

            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| String::from("<failed to read body>"));
                if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                    bail!(
                        "TMDB API error (HTTP {}): code={}, message={}",
                        status,
                        error_response.status_code,
                        error_response.status_message,
                    );
                }
                bail!("TMDB API error (HTTP {status}): {body}");
            }

            let body = response
                .text()
                .await
                .with_context(|| format!("failed to read response body: {path}"))?;
            let raw_result: std::result::Result<T, _> = serde_json::from_str(&body);
            let parsed =
                raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
            return Ok(parsed);
        }
    }

    /// Fetches one page of a list endpoint.
    async fn get_page<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &ListParams,
    ) -> Result<TmdbPage<T>> {
        let query = [
            ("language", params.language.clone()),
            ("page", params.page.to_string()),
        ];
        self.get_json(path, &query).await
    }
}

impl LocalTmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn search_multi(&self, params: &SearchMultiParams) -> Result<TmdbSearchMultiResponse> {
        let query = [
            ("language", params.language.clone()),
            ("query", params.query.clone()),
            ("page", params.page.to_string()),
        ];
        self.get_json("search/multi", &query).await
    }

    #[instrument(skip_all)]
    async fn popular_movies(&self, params: &ListParams) -> Result<TmdbPage<MovieItem>> {
        self.get_page("movie/popular", params).await
    }

    #[instrument(skip_all)]
    async fn popular_tv(&self, params: &ListParams) -> Result<TmdbPage<TvItem>> {
        self.get_page("tv/popular", params).await
    }

    #[instrument(skip_all)]
    async fn top_rated_movies(&self, params: &ListParams) -> Result<TmdbPage<MovieItem>> {
        self.get_page("movie/top_rated", params).await
    }

    #[instrument(skip_all)]
    async fn top_rated_tv(&self, params: &ListParams) -> Result<TmdbPage<TvItem>> {
        self.get_page("tv/top_rated", params).await
    }

    #[instrument(skip_all)]
    async fn tv_airing_today(&self, params: &ListParams) -> Result<TmdbPage<TvItem>> {
        self.get_page("tv/airing_today", params).await
    }

    #[instrument(skip_all)]
    async fn tv_details(&self, series_id: u64, language: &str) -> Result<TmdbTvDetails> {
        let path = format!("tv/{series_id}");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn tv_season(
        &self,
        series_id: u64,
        season_number: u32,
        language: &str,
    ) -> Result<TmdbTvSeason> {
        let path = format!("tv/{series_id}/season/{season_number}");
        let query = [("language", String::from(language))];
        self.get_json(&path, &query).await
    }

    #[instrument(skip_all)]
    async fn tv_watch_providers(&self, series_id: u64) -> Result<TmdbWatchProviders> {
        let path = format!("tv/{series_id}/watch/providers");
        self.get_json(&path, &[]).await
    }
}
