//! URL construction for the place, booking and search hosts.

use crate::error::ScraperError;

/// Extracts the hostname from a URL for use in error messages.
///
/// Falls back to the full URL string if parsing fails.
pub(super) fn extract_domain(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}

/// Place and booking ids are numeric; anything else would escape the path.
pub(crate) fn validate_id(kind: &str, id: &str) -> Result<(), ScraperError> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScraperError::InvalidUrl {
            url: id.to_owned(),
            reason: format!("{kind} must be a non-empty string of digits"),
        });
    }
    Ok(())
}

/// `{base}/restaurant/{id}/{page}`, e.g. `home` or `menu/list`.
pub(super) fn restaurant_url(
    place_base_url: &str,
    business_id: &str,
    page: &str,
) -> Result<String, ScraperError> {
    validate_id("business id", business_id)?;
    Ok(format!("{place_base_url}/restaurant/{business_id}/{page}"))
}

pub(super) fn graphql_url(booking_base_url: &str, operation: &str) -> Result<reqwest::Url, ScraperError> {
    reqwest::Url::parse_with_params(
        &format!("{booking_base_url}/graphql"),
        &[("opName", operation)],
    )
    .map_err(|e| ScraperError::InvalidUrl {
        url: booking_base_url.to_owned(),
        reason: e.to_string(),
    })
}

/// `allSearch` URL. The coordinate parameter is `"{lng};{lat}"`.
pub(super) fn search_url(
    search_base_url: &str,
    query: &str,
    lat: f64,
    lng: f64,
) -> Result<reqwest::Url, ScraperError> {
    let coord = format!("{lng};{lat}");
    reqwest::Url::parse_with_params(
        &format!("{search_base_url}/p/api/search/allSearch"),
        &[("query", query), ("type", "all"), ("searchCoord", coord.as_str())],
    )
    .map_err(|e| ScraperError::InvalidUrl {
        url: search_base_url.to_owned(),
        reason: e.to_string(),
    })
}
