use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

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

    let api_url = require("MERCATO_API_URL")?;
    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "MERCATO_API_URL".to_string(),
            reason: format!("expected an http(s) URL, got \"{api_url}\""),
        });
    }

    let env = parse_environment(&or_default("MERCATO_ENV", "development"))?;
    let log_level = or_default("MERCATO_LOG_LEVEL", "info");
    let api_token = lookup("MERCATO_API_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());
    let login_route = or_default("MERCATO_LOGIN_ROUTE", "/login");

    let request_timeout_secs = parse_u64("MERCATO_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("MERCATO_USER_AGENT", "mercato/0.1 (storefront)");

    let page_size = parse_u32("MERCATO_PAGE_SIZE", "12")?;
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MERCATO_PAGE_SIZE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        api_url: api_url.trim_end_matches('/').to_string(),
        env,
        log_level,
        api_token,
        login_route,
        request_timeout_secs,
        user_agent,
        page_size,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MERCATO_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
