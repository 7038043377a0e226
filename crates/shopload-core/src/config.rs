use crate::app_config::ImportConfig;
use crate::ConfigError;

const REQUIRED_ENV: [&str; 3] = ["SHOPIFY_SHOP", "SHOPIFY_ADMIN_TOKEN", "SHOPIFY_API_VERSION"];

/// Load import configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load a `.env` file before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_import_config() -> Result<ImportConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_import_config_from_env()
}

/// Load import configuration from environment variables already in the process.
///
/// Unlike [`load_import_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_import_config_from_env() -> Result<ImportConfig, ConfigError> {
    build_import_config(|key| std::env::var(key))
}

/// Build import configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_import_config<F>(lookup: F) -> Result<ImportConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // Whitespace-only values count as missing.
    let non_blank = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    };

    let missing: Vec<String> = REQUIRED_ENV
        .iter()
        .filter(|var| non_blank(var).is_none())
        .map(|var| (*var).to_owned())
        .collect();
    if !missing.is_empty() {
        return Err(ConfigError::MissingEnvVars(missing));
    }

    let require = |var: &str| -> Result<String, ConfigError> {
        non_blank(var).ok_or_else(|| ConfigError::MissingEnvVars(vec![var.to_owned()]))
    };

    let or_default = |var: &str, default: &str| -> String {
        non_blank(var).unwrap_or_else(|| default.to_owned())
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

    let shop = require("SHOPIFY_SHOP")?;
    let access_token = require("SHOPIFY_ADMIN_TOKEN")?;
    let api_version = require("SHOPIFY_API_VERSION")?;

    let log_level = or_default("SHOPLOAD_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("SHOPLOAD_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SHOPLOAD_USER_AGENT", "shopload/0.1 (catalog-import)");

    let max_attempts = parse_u32("SHOPLOAD_MAX_ATTEMPTS", "5")?;
    if max_attempts == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPLOAD_MAX_ATTEMPTS".to_owned(),
            reason: "must be at least 1".to_owned(),
        });
    }
    let backoff_base_secs = parse_u64("SHOPLOAD_BACKOFF_BASE_SECS", "1")?;
    let backoff_cap_secs = parse_u64("SHOPLOAD_BACKOFF_CAP_SECS", "16")?;

    Ok(ImportConfig {
        shop,
        access_token,
        api_version,
        log_level,
        request_timeout_secs,
        user_agent,
        max_attempts,
        backoff_base_secs,
        backoff_cap_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
