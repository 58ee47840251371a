//! Tests for the configuration module.
//!
//! This module contains tests for configuration loading, validation, and usage.

use crate::config::{
    AppConfig, BenchConfig, ConfigLoader, DemoConfig, LogConfig, Validate, MAX_SUPPORTED_DEPTH,
};
use crate::error::config::ConfigError;
use crate::tests::TestFixture;

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = AppConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.bench.max_depth, 16);
    assert_eq!(config.demo.max_depth, 8);
    assert_eq!(config.log.level, "info");
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = AppConfig::default();

    config.bench.points = 0;
    assert!(config.validate().is_err());

    config.bench.points = 10;
    config.demo.key_range = 0;
    assert!(config.validate().is_err());

    config.demo.key_range = 5;
    config.log.level = "verbose".to_string();
    assert!(config.validate().is_err());

    config.log.level = "debug".to_string();
    assert!(config.validate().is_ok());
}

/// Test that an oversized max_depth is reported as out of range.
#[test]
fn test_max_depth_out_of_range() {
    let bench = BenchConfig {
        max_depth: MAX_SUPPORTED_DEPTH + 1,
        ..BenchConfig::default()
    };
    match bench.validate() {
        Err(ConfigError::ValueOutOfRange { key, .. }) => assert_eq!(key, "bench.max_depth"),
        other => panic!("expected out-of-range error, got {other:?}"),
    }

    let demo = DemoConfig {
        max_depth: MAX_SUPPORTED_DEPTH,
        ..DemoConfig::default()
    };
    assert!(demo.validate().is_ok());
}

/// Test loading configuration from a file.
#[test]
fn test_load_config_from_file() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "config_file_test.toml",
            r#"
    [bench]
    points = 2000
    max_depth = 12
    seed = 99

    [demo]
    tasks = 3

    [log]
    level = "warn"
    json = true
    "#,
        )
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_FILE");
    let config = loader.load().unwrap();

    assert_eq!(config.bench.points, 2000);
    assert_eq!(config.bench.max_depth, 12);
    assert_eq!(config.bench.seed, Some(99));
    assert_eq!(config.demo.tasks, 3);
    assert_eq!(config.log.level, "warn");
    assert!(config.log.json);

    // Other values should be defaults
    assert_eq!(config.bench.dimensions, 4);
    assert_eq!(config.demo.key_range, 5);
}

/// Test loading configuration from a JSON file.
#[test]
fn test_load_json_config() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file("config.json", r#"{ "demo": { "key_len": 4 } }"#)
        .unwrap();

    let config = ConfigLoader::new(Some(&config_path), "TEST_JSON")
        .load()
        .unwrap();
    assert_eq!(config.demo.key_len, 4);
}

/// Test loading configuration with environment variable overrides.
#[test]
fn test_env_var_override() {
    let mut fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file("config_env_test.toml", "[bench]\npoints = 2000\n")
        .unwrap();

    fixture.set_env("TEST_ENV__BENCH__POINTS", "3000");
    fixture.set_env("TEST_ENV__DEMO__MAX_DELAY_MS", "5");

    let loader = ConfigLoader::new(Some(&config_path), "TEST_ENV");
    let config = loader.load().unwrap();

    assert_eq!(config.bench.points, 3000);
    assert_eq!(config.demo.max_delay_ms, 5);
}

/// Test that environment overrides are validated too.
#[test]
fn test_env_var_override_is_validated() {
    let mut fixture = TestFixture::new().unwrap();
    fixture.set_env("TEST_ENV_INVALID__DEMO__TASKS", "0");

    let loader = ConfigLoader::new(None::<&str>, "TEST_ENV_INVALID");
    assert!(matches!(
        loader.load(),
        Err(ConfigError::ValidationError(_))
    ));
}

/// Test that loading an invalid configuration file returns an error.
#[test]
fn test_load_invalid_config() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file("invalid.toml", "[bench\npoints = many\"\n")
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_INVALID");
    assert!(loader.load().is_err());
}

/// Test that missing files and unknown extensions are rejected.
#[test]
fn test_load_missing_and_unsupported_files() {
    let fixture = TestFixture::new().unwrap();

    let missing = fixture.temp_dir.path().join("missing.toml");
    assert!(matches!(
        ConfigLoader::new(Some(&missing), "TEST_MISSING").load(),
        Err(ConfigError::FileNotFound(_))
    ));

    let unsupported = fixture.create_file("config.ini", "[bench]").unwrap();
    assert!(matches!(
        ConfigLoader::new(Some(&unsupported), "TEST_UNSUPPORTED").load(),
        Err(ConfigError::ParseError(_))
    ));
}

/// Test that the default configuration survives a TOML round trip.
#[test]
fn test_generated_config_loads_back() {
    let fixture = TestFixture::new().unwrap();
    let toml = toml::to_string_pretty(&AppConfig::default()).unwrap();
    let config_path = fixture.create_file("generated.toml", toml).unwrap();

    let config = ConfigLoader::new(Some(&config_path), "TEST_GENERATED")
        .load()
        .unwrap();
    assert_eq!(config.bench.points, BenchConfig::default().points);
    assert_eq!(config.log.level, LogConfig::default().level);
}
