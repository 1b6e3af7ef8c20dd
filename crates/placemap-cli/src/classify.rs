use anyhow::Context;
use placemap_core::{load_category_groups, AppConfig};
use placemap_scraper::CategoryClassifier;
use serde_json::json;

pub(crate) fn run_classify(config: &AppConfig, categories: &[String]) -> anyhow::Result<()> {
    let groups = load_category_groups(&config.category_groups_path)?;
    let classifier =
        CategoryClassifier::new(&groups).context("category keywords did not compile")?;

    for raw in categories {
        println!(
            "{}",
            json!({ "category": raw, "groups": classifier.classify(raw) })
        );
    }
    Ok(())
}
