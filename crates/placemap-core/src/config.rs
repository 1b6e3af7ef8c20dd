use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a
/// `HashMap` lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let base_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        let trimmed = raw.trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("\"{raw}\" must start with http:// or https://"),
            });
        }
        Ok(trimmed.to_string())
    };

    let env = parse_environment(&or_default("PLACEMAP_ENV", "development"))?;
    let log_level = or_default("PLACEMAP_LOG_LEVEL", "info");

    let place_base_url = base_url("PLACEMAP_PLACE_BASE_URL", "https://pcmap.place.naver.com")?;
    let booking_base_url = base_url("PLACEMAP_BOOKING_BASE_URL", "https://m.booking.naver.com")?;
    let search_base_url = base_url("PLACEMAP_SEARCH_BASE_URL", "https://map.naver.com")?;
    let category_groups_path = PathBuf::from(or_default(
        "PLACEMAP_CATEGORY_GROUPS_PATH",
        "./config/category_groups.yaml",
    ));

    let scraper_request_timeout_secs = parse_u64("PLACEMAP_SCRAPER_REQUEST_TIMEOUT_SECS", "20")?;
    let scraper_user_agent = or_default("PLACEMAP_SCRAPER_USER_AGENT", DEFAULT_USER_AGENT);
    let scraper_max_concurrent = parse_usize("PLACEMAP_SCRAPER_MAX_CONCURRENT", "1")?;
    let scraper_inter_request_delay_ms =
        parse_u64("PLACEMAP_SCRAPER_INTER_REQUEST_DELAY_MS", "1500")?;
    let scraper_max_retries = parse_u32("PLACEMAP_SCRAPER_MAX_RETRIES", "3")?;
    let scraper_retry_backoff_base_secs =
        parse_u64("PLACEMAP_SCRAPER_RETRY_BACKOFF_BASE_SECS", "2")?;

    Ok(AppConfig {
        env,
        log_level,
        place_base_url,
        booking_base_url,
        search_base_url,
        category_groups_path,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_max_concurrent,
        scraper_inter_request_delay_ms,
        scraper_max_retries,
        scraper_retry_backoff_base_secs,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PLACEMAP_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
