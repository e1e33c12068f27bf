use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub(crate) const DEFAULT_API_BASE_URL: &str =
    "https://2ybh8dang0.execute-api.ap-southeast-2.amazonaws.com/dev";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields a usable
/// development config pointed at the hosted API.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("OUTPOST_ENV", "development"))?;
    let log_level = or_default("OUTPOST_LOG_LEVEL", "info");
    let api_base_url = parse_base_url(&or_default("OUTPOST_API_BASE_URL", DEFAULT_API_BASE_URL))?;

    let http_timeout_secs = parse_u64("OUTPOST_HTTP_TIMEOUT_SECS", "30")?;
    let http_user_agent = or_default("OUTPOST_HTTP_USER_AGENT", "outpost/0.1 (table-ordering)");

    let credential_ttl_secs = parse_u64("OUTPOST_CREDENTIAL_TTL_SECS", "3600")?;
    if credential_ttl_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "OUTPOST_CREDENTIAL_TTL_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let session_path = PathBuf::from(or_default("OUTPOST_SESSION_PATH", "./.outpost/session.json"));

    Ok(AppConfig {
        env,
        log_level,
        api_base_url,
        http_timeout_secs,
        http_user_agent,
        credential_ttl_secs,
        session_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "OUTPOST_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Validates the API base URL scheme and strips trailing slashes.
fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "OUTPOST_API_BASE_URL".to_string(),
            reason: format!("'{raw}' must start with http:// or https://"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
