//! Offline unit tests for stockrate-db pool configuration and row types.
//! These tests do not require a live database connection.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use stockrate_core::{AppConfig, Environment};
use stockrate_db::{PoolConfig, RatingRow};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080),
        log_level: "info".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`RatingRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn rating_row_has_expected_fields() {
    use chrono::Utc;

    let row = RatingRow {
        id: 7_i64,
        ticker: "AAPL".to_string(),
        target_from: 150.0_f64,
        target_to: 160.0_f64,
        company: "Apple Inc.".to_string(),
        action: "upgraded by".to_string(),
        brokerage: "Goldman Sachs".to_string(),
        rating_from: "Neutral".to_string(),
        rating_to: "Buy".to_string(),
        time: Utc::now(),
    };

    assert_eq!(row.id, 7);
    assert_eq!(row.ticker, "AAPL");
    assert_eq!(row.rating_to, "Buy");
}
