use anyhow::Context;
use placemap_core::AppConfig;
use placemap_scraper::parse_search_places;

/// Prints one document per place in response order.
pub(crate) async fn run_search(
    config: &AppConfig,
    query: &str,
    lat: f64,
    lng: f64,
) -> anyhow::Result<()> {
    let client = crate::build_client(config)?;
    let response = client
        .search(query, lat, lng)
        .await
        .with_context(|| format!("search for \"{query}\" failed"))?;

    let places = parse_search_places(&response);
    tracing::info!(query, places = places.len(), "search complete");

    for place in &places {
        println!("{}", serde_json::to_string(place)?);
    }
    Ok(())
}
