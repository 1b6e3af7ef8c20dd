use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;

use super::{check_status, url, PlaceClient};

impl PlaceClient {
    /// Fetches the server-rendered home page of a place.
    ///
    /// The page embeds the Apollo state read by
    /// [`crate::find_business_hours`] and [`crate::extract_place_detail`].
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`]: `business_id` is not numeric.
    /// - [`ScraperError::RateLimited`]: HTTP 429 after all retries exhausted.
    /// - [`ScraperError::NotFound`]: HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status (5xx retried).
    /// - [`ScraperError::Http`]: network or TLS failure after all retries exhausted.
    pub async fn fetch_home_html(&self, business_id: &str) -> Result<String, ScraperError> {
        let url = url::restaurant_url(&self.endpoints.place_base_url, business_id, "home")?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT_LANGUAGE, "ko-KR,ko;q=0.9,en;q=0.8")
                    .header(reqwest::header::REFERER, &url)
                    .send()
                    .await?;
                let body = check_status(response)?.text().await?;
                tracing::debug!(business_id, bytes = body.len(), "fetched place home page");
                Ok(body)
            }
        })
        .await
    }

    /// Fetches the menu list page as raw bytes for [`crate::extract_menu`].
    ///
    /// The body is returned undecoded because it can contain invalid UTF-8.
    ///
    /// # Errors
    ///
    /// Same as [`PlaceClient::fetch_home_html`].
    pub async fn fetch_menu_list_bytes(&self, business_id: &str) -> Result<Vec<u8>, ScraperError> {
        let url = url::restaurant_url(&self.endpoints.place_base_url, business_id, "menu/list")?;
        let referer = url::restaurant_url(&self.endpoints.place_base_url, business_id, "menu")?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            let referer = referer.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(reqwest::header::ACCEPT_LANGUAGE, "ko-KR,ko;q=0.9,en;q=0.8")
                    .header(reqwest::header::REFERER, &referer)
                    .send()
                    .await?;
                let body = check_status(response)?.bytes().await?;
                tracing::debug!(business_id, bytes = body.len(), "fetched menu list page");
                Ok(body.to_vec())
            }
        })
        .await
    }
}
