//! HTTP client for place pages, the booking GraphQL endpoint and map search.

mod booking;
mod place;
mod search;
mod url;

use std::time::Duration;

use placemap_core::AppConfig;
use reqwest::{Client, Response};

use crate::error::ScraperError;

pub(crate) use url::validate_id;

/// Base URLs of the three hosts the client talks to, without trailing `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Server-rendered place pages (`/restaurant/{id}/home`).
    pub place_base_url: String,
    /// Booking/ordering service hosting `/graphql`.
    pub booking_base_url: String,
    /// Map search API (`/p/api/search/allSearch`).
    pub search_base_url: String,
}

impl Endpoints {
    /// Points every host at one base URL. Used with a single mock server.
    #[must_use]
    pub fn single(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_owned();
        Self {
            place_base_url: base_url.clone(),
            booking_base_url: base_url.clone(),
            search_base_url: base_url,
        }
    }
}

/// Fetches raw page and API bodies for the extraction layer.
///
/// Maps 429 to [`ScraperError::RateLimited`], 404 to
/// [`ScraperError::NotFound`] and any other non-2xx status to
/// [`ScraperError::UnexpectedStatus`]. Rate limits, 5xx responses and
/// network failures are retried with exponential backoff up to
/// `max_retries` additional attempts.
pub struct PlaceClient {
    pub(super) client: Client,
    pub(super) endpoints: Endpoints,
    /// Maximum number of retry attempts after the first failure.
    pub(super) max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    pub(super) backoff_base_secs: u64,
}

impl PlaceClient {
    /// Creates a `PlaceClient` with configured timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        endpoints: Endpoints,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoints,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Builds a client from the scraper section of [`AppConfig`].
    ///
    /// # Errors
    ///
    /// See [`PlaceClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            Endpoints {
                place_base_url: config.place_base_url.clone(),
                booking_base_url: config.booking_base_url.clone(),
                search_base_url: config.search_base_url.clone(),
            },
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
            config.scraper_max_retries,
            config.scraper_retry_backoff_base_secs,
        )
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

/// Converts non-success statuses into typed errors, passing 2xx through.
pub(super) fn check_status(response: Response) -> Result<Response, ScraperError> {
    let status = response.status();
    let url = response.url().to_string();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(60);

        return Err(ScraperError::RateLimited {
            domain: url::extract_domain(&url),
            retry_after_secs,
        });
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ScraperError::NotFound { url });
    }

    if !status.is_success() {
        return Err(ScraperError::UnexpectedStatus {
            status: status.as_u16(),
            url,
        });
    }

    Ok(response)
}

/// Parses a JSON response body, naming `context` on failure.
pub(super) fn parse_json(body: &str, context: &str) -> Result<serde_json::Value, ScraperError> {
    serde_json::from_str(body).map_err(|e| ScraperError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}
