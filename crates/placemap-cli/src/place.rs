//! `hours`, `menu` and `place` command handlers.

use std::path::Path;

use anyhow::Context;
use placemap_core::AppConfig;
use placemap_scraper::{
    extract_business_hours, extract_keyword_list, extract_menu, extract_menu_board_images,
    extract_place_detail, to_menu_records, DecodeProfile, PlaceClient,
};
use serde_json::json;

use crate::fanout::run_per_id;

/// Where page bodies come from: the live place host, or one saved file used
/// for every id.
struct PageSource {
    client: PlaceClient,
    saved: Option<Vec<u8>>,
}

impl PageSource {
    async fn new(config: &AppConfig, html: Option<&Path>) -> anyhow::Result<Self> {
        let client = crate::build_client(config)?;
        let saved = match html {
            Some(path) => Some(
                tokio::fs::read(path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?,
            ),
            None => None,
        };
        Ok(Self { client, saved })
    }

    /// Saved pages need no politeness delay.
    fn delay_ms(&self, config: &AppConfig) -> u64 {
        if self.saved.is_some() {
            0
        } else {
            config.scraper_inter_request_delay_ms
        }
    }

    async fn home_html(&self, business_id: &str) -> anyhow::Result<String> {
        match &self.saved {
            Some(bytes) => Ok(String::from_utf8_lossy(bytes).into_owned()),
            None => Ok(self.client.fetch_home_html(business_id).await?),
        }
    }

    async fn menu_list_bytes(&self, business_id: &str) -> anyhow::Result<Vec<u8>> {
        match &self.saved {
            Some(bytes) => Ok(bytes.clone()),
            None => Ok(self.client.fetch_menu_list_bytes(business_id).await?),
        }
    }
}

pub(crate) async fn run_hours(
    config: &AppConfig,
    ids: &[String],
    html: Option<&Path>,
) -> anyhow::Result<()> {
    let pages = PageSource::new(config, html).await?;
    run_per_id(ids, config.scraper_max_concurrent, pages.delay_ms(config), |id| {
        let pages = &pages;
        async move {
            let html = pages.home_html(&id).await?;
            let hours = extract_business_hours(&html);
            if hours.is_empty() {
                tracing::info!(id = %id, "no business hours on page");
            }
            Ok(json!({ "id": id, "business_hours": hours }))
        }
    })
    .await
}

pub(crate) async fn run_menu(
    config: &AppConfig,
    ids: &[String],
    html: Option<&Path>,
    profile: DecodeProfile,
) -> anyhow::Result<()> {
    let pages = PageSource::new(config, html).await?;
    run_per_id(ids, config.scraper_max_concurrent, pages.delay_ms(config), |id| {
        let pages = &pages;
        async move {
            let bytes = pages.menu_list_bytes(&id).await?;
            let menus = extract_menu(&bytes, &id, profile);
            let board_images = extract_menu_board_images(&String::from_utf8_lossy(&bytes));
            tracing::debug!(id = %id, menus = menus.len(), ?profile, "extracted menus");
            Ok(json!({
                "id": id,
                "menus": to_menu_records(&id, &menus),
                "menu_board_images": board_images,
            }))
        }
    })
    .await
}

pub(crate) async fn run_place(
    config: &AppConfig,
    ids: &[String],
    html: Option<&Path>,
) -> anyhow::Result<()> {
    let pages = PageSource::new(config, html).await?;
    run_per_id(ids, config.scraper_max_concurrent, pages.delay_ms(config), |id| {
        let pages = &pages;
        async move {
            let html = pages.home_html(&id).await?;
            let detail = extract_place_detail(&html, &id);
            if detail.is_none() {
                tracing::info!(id = %id, "no place state on page");
            }
            Ok(json!({
                "id": id,
                "detail": detail,
                "keywords": extract_keyword_list(&html),
            }))
        }
    })
    .await
}
