use serde_json::Value;

use crate::booking::GraphQlRequest;
use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;

use super::{check_status, parse_json, url, PlaceClient};

impl PlaceClient {
    /// Posts a GraphQL request to the booking service and returns the full
    /// response document (`{"data": ..., "errors": ...}`).
    ///
    /// `referer` should be the order page of the item being queried, see
    /// [`crate::booking::order_referer`].
    ///
    /// # Errors
    ///
    /// - [`ScraperError::GraphQl`]: the response has `errors` and no `data`.
    /// - [`ScraperError::Deserialize`]: the body is not JSON.
    /// - Status and network errors as for [`PlaceClient::fetch_home_html`].
    pub async fn post_graphql(
        &self,
        request: &GraphQlRequest,
        referer: &str,
    ) -> Result<Value, ScraperError> {
        let operation = request.operation.name();
        let url = url::graphql_url(&self.endpoints.booking_base_url, operation)?;

        let document = retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .post(url)
                    .header(reqwest::header::ACCEPT, "*/*")
                    .header(reqwest::header::ACCEPT_LANGUAGE, "ko-KR,ko;q=0.9,en;q=0.8")
                    .header(reqwest::header::ORIGIN, &self.endpoints.booking_base_url)
                    .header(reqwest::header::REFERER, referer)
                    .json(&request.body)
                    .send()
                    .await?;
                let body = check_status(response)?.text().await?;
                parse_json(&body, &format!("graphql operation {operation}"))
            }
        })
        .await?;

        check_graphql_errors(operation, document)
    }
}

/// Fails when the document carries `errors` without any `data`; logs and
/// keeps partial results otherwise.
fn check_graphql_errors(operation: &str, document: Value) -> Result<Value, ScraperError> {
    let first_error = document
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
        .map(|error| {
            error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_owned()
        });

    let Some(message) = first_error else {
        return Ok(document);
    };

    if document.get("data").is_none_or(Value::is_null) {
        return Err(ScraperError::GraphQl {
            operation: operation.to_owned(),
            message,
        });
    }

    tracing::warn!(operation, message = %message, "graphql response carried partial errors");
    Ok(document)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn errors_without_data_fail() {
        let doc = json!({"data": null, "errors": [{"message": "slot closed"}]});
        let err = check_graphql_errors("categories", doc).unwrap_err();
        assert!(
            matches!(err, ScraperError::GraphQl { ref operation, ref message } if operation == "categories" && message == "slot closed")
        );
    }

    #[test]
    fn errors_with_data_are_kept() {
        let doc = json!({"data": {"menu": {"menus": []}}, "errors": [{"message": "partial"}]});
        assert!(check_graphql_errors("menu", doc).is_ok());
    }

    #[test]
    fn clean_document_passes_through() {
        let doc = json!({"data": {"categories": []}});
        assert_eq!(check_graphql_errors("categories", doc.clone()).unwrap(), doc);
    }
}
