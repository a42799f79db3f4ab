use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

// RFC 3986 unreserved characters pass through; everything else in the
// userinfo part is escaped.
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

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
/// Decoupled from the real environment so tests can drive it from a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let database_url = match lookup("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => database_url_from_parts(&lookup)?,
    };

    let env = parse_environment(&or_default("STOCKRATE_ENV", "development"));

    // Legacy deployments only set PORT.
    let (bind_var, raw_bind) = match lookup("STOCKRATE_BIND_ADDR") {
        Ok(addr) => ("STOCKRATE_BIND_ADDR", addr),
        Err(_) => ("PORT", format!("0.0.0.0:{}", or_default("PORT", "8080"))),
    };
    let bind_addr = raw_bind
        .parse::<SocketAddr>()
        .map_err(|e| invalid(bind_var, e.to_string()))?;

    let log_level = or_default("STOCKRATE_LOG_LEVEL", "info");
    let cors_origins = or_default("STOCKRATE_CORS_ORIGINS", "http://localhost:5173")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    let db_max_connections = parse_u32("STOCKRATE_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("STOCKRATE_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("STOCKRATE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    if db_min_connections > db_max_connections {
        return Err(invalid(
            "STOCKRATE_DB_MIN_CONNECTIONS",
            format!("{db_min_connections} exceeds STOCKRATE_DB_MAX_CONNECTIONS ({db_max_connections})"),
        ));
    }

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        cors_origins,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
    })
}

/// Assemble a Postgres URL from the discrete `DB_*` variables.
///
/// `DB_HOST` and `DB_NAME` are required; the rest have defaults. User and
/// password are percent-encoded.
fn database_url_from_parts<F>(lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let host = require("DB_HOST")
        .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;
    let name = require("DB_NAME")?;
    let user = lookup("DB_USER").unwrap_or_default();
    let password = lookup("DB_PASSWORD").unwrap_or_default();
    let port = lookup("DB_PORT").unwrap_or_else(|_| "5432".to_string());
    let sslmode = lookup("DB_SSLMODE").unwrap_or_else(|_| "disable".to_string());

    let credentials = match (user.is_empty(), password.is_empty()) {
        (true, _) => String::new(),
        (false, true) => format!("{}@", utf8_percent_encode(&user, USERINFO)),
        (false, false) => format!(
            "{}:{}@",
            utf8_percent_encode(&user, USERINFO),
            utf8_percent_encode(&password, USERINFO)
        ),
    };

    Ok(format!(
        "postgres://{credentials}{host}:{port}/{name}?sslmode={sslmode}"
    ))
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
