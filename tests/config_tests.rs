use std::env;

use kwanza_erp::config::{Config, DataSource};
use pretty_assertions::assert_eq;
use serial_test::serial;

mod common;

#[test]
#[serial]
fn test_config_defaults() {
    let _guard = common::EnvGuard::clear(&common::CONFIG_KEYS);

    let config = Config::from_env_only().unwrap();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.environment, "development");
    assert_eq!(config.data_source, DataSource::Mock);
    assert_eq!(config.mock_seed, 42);
    assert_eq!(config.workday_start, common::time(8, 0));
    assert_eq!(config.workday_end, common::time(17, 0));
    assert_eq!(config.break_minutes, 60);
    assert_eq!(config.late_grace_minutes, 0);
    assert!(config.is_development());
    assert!(!config.is_production());
    assert_eq!(config.default_log_filter(), "debug");
    assert_eq!(config.server_address(), "127.0.0.1:8080");
}

#[test]
#[serial]
fn test_config_custom_values() {
    let _guard = common::EnvGuard::clear(&common::CONFIG_KEYS);
    unsafe {
        env::set_var("HOST", "0.0.0.0");
        env::set_var("PORT", "9000");
        env::set_var("ENVIRONMENT", "production");
        env::set_var("DATA_SOURCE", "Postgres");
        env::set_var("WORKDAY_START", "07:30");
        env::set_var("WORKDAY_END", "16:30");
        env::set_var("LATE_GRACE_MINUTES", "10");
    }

    let config = Config::from_env_only().unwrap();

    assert_eq!(config.server_address(), "0.0.0.0:9000");
    assert!(config.is_production());
    assert_eq!(config.default_log_filter(), "warn,kwanza_erp=info");
    assert_eq!(config.data_source, DataSource::Postgres);

    let rules = config.work_rules();
    assert_eq!(rules.shift_start, common::time(7, 30));
    assert_eq!(rules.shift_end, common::time(16, 30));
    assert_eq!(rules.late_grace_minutes, 10);
    assert_eq!(rules.scheduled_minutes(), 8 * 60);
}

#[test]
#[serial]
fn test_config_unparsable_values_fall_back() {
    let _guard = common::EnvGuard::clear(&common::CONFIG_KEYS);
    unsafe {
        env::set_var("PORT", "not-a-port");
        env::set_var("DATA_SOURCE", "oracle");
        env::set_var("WORKDAY_START", "8am");
        env::set_var("BREAK_MINUTES", "-5");
    }

    let config = Config::from_env_only().unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.data_source, DataSource::Mock);
    assert_eq!(config.workday_start, common::time(8, 0));
    assert_eq!(config.break_minutes, 60);
}
