pub mod app_config;
pub mod category_groups;
pub mod config;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use category_groups::{
    load_category_groups, parse_category_groups, CategoryGroup, CategoryGroups,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use types::{
    menu_record_id, BusinessDay, BusinessHourEntry, CategoryId, MenuEntry, MenuRecord,
    PlaceDetail,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read category groups file {path}: {source}")]
    CategoryGroupsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse category groups file: {0}")]
    CategoryGroupsFileParse(#[from] serde_yaml::Error),

    #[error("category groups validation error: {0}")]
    Validation(String),
}
