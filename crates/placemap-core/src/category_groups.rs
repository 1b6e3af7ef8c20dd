use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One classification bucket and the category keywords that route into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Contents of `category_groups.yaml`.
///
/// Group order is significant: a raw category is tested against groups in
/// file order and every matching group is reported in that order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGroups {
    pub groups: Vec<CategoryGroup>,
    /// Group assigned when no keyword matches.
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

fn default_fallback() -> String {
    "기타".to_string()
}

/// Load and validate category groups from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_category_groups(path: &Path) -> Result<CategoryGroups, ConfigError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::CategoryGroupsFileIo {
            path: path.display().to_string(),
            source: e,
        })?;

    parse_category_groups(&content)
}

/// Parse and validate category groups from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_category_groups(yaml: &str) -> Result<CategoryGroups, ConfigError> {
    let groups: CategoryGroups = serde_yaml::from_str(yaml)?;
    validate_category_groups(&groups)?;
    Ok(groups)
}

fn validate_category_groups(groups: &CategoryGroups) -> Result<(), ConfigError> {
    if groups.fallback.trim().is_empty() {
        return Err(ConfigError::Validation(
            "fallback group name must be non-empty".to_string(),
        ));
    }

    let mut seen_names = HashSet::new();
    for group in &groups.groups {
        if group.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "group name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(group.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate group name: '{}'",
                group.name
            )));
        }

        if group.keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "group '{}' has no keywords",
                group.name
            )));
        }
    }

    Ok(())
}
