use serde_json::Value;

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;

use super::{check_status, parse_json, url, PlaceClient};

impl PlaceClient {
    /// Runs a map keyword search around `(lat, lng)`.
    ///
    /// Returns the raw response; pass it to [`crate::parse_search_places`].
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Deserialize`]: the body is not JSON.
    /// - Status and network errors as for [`PlaceClient::fetch_home_html`].
    pub async fn search(&self, query: &str, lat: f64, lng: f64) -> Result<Value, ScraperError> {
        let url = url::search_url(&self.endpoints.search_base_url, query, lat, lng)?;
        let referer = format!("{}/", self.endpoints.search_base_url);

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            let referer = referer.clone();
            async move {
                let response = self
                    .client
                    .get(url)
                    .header(reqwest::header::ACCEPT_LANGUAGE, "ko-KR,ko;q=0.9,en;q=0.8")
                    .header(reqwest::header::REFERER, &referer)
                    .send()
                    .await?;
                let body = check_status(response)?.text().await?;
                parse_json(&body, &format!("search results for \"{query}\""))
            }
        })
        .await
    }
}
