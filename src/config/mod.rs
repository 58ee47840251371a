//! Configuration module for the PH-Tree crate.
//!
//! Settings for the benchmark and demonstration workloads and for logging.
//! They are layered from built-in defaults, an optional file (TOML, YAML,
//! JSON) and environment variables, then validated before use.

use std::path::{Path, PathBuf};

use crate::error::config::ConfigError;
use config::{Config, ConfigError as ExternalConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

pub mod workload;

pub use workload::{BenchConfig, DemoConfig};

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "PHTREE";

/// Largest `max_depth` a workload may request.
///
/// Applies to workload settings only. The tree itself accepts any depth.
pub const MAX_SUPPORTED_DEPTH: usize = 4096;

/// A trait for types that can be validated.
pub trait Validate {
    /// Validates that the configuration is correct.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the configuration is valid
    /// * `Err(ConfigError)` if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Main configuration for the PH-Tree tooling.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Benchmark workload configuration
    pub bench: BenchConfig,

    /// Demonstration workload configuration
    pub demo: DemoConfig,

    /// Log configuration
    pub log: LogConfig,
}

impl Validate for AppConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.bench.validate()?;
        self.demo.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error), overridden by `RUST_LOG`
    pub level: String,

    /// Whether to log in JSON format
    pub json: bool,

    /// Whether to include source code locations in logs
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            source_location: true,
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationError(format!(
                "Invalid log level: {}",
                self.level
            ))),
        }
    }
}

/// Checks a workload's `max_depth` against [`MAX_SUPPORTED_DEPTH`].
pub(crate) fn validate_max_depth(key: &str, max_depth: usize) -> ConfigResult<()> {
    if max_depth > MAX_SUPPORTED_DEPTH {
        return Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            message: format!("{max_depth} exceeds the supported maximum of {MAX_SUPPORTED_DEPTH}"),
        });
    }
    Ok(())
}

/// Configuration loader for the PH-Tree tooling.
#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to the configuration file
    /// * `env_prefix` - Prefix for environment variables that override configuration values
    pub fn new<P: AsRef<Path>>(config_path: Option<P>, env_prefix: &str) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            env_prefix: env_prefix.to_string(),
        }
    }

    /// Loads the configuration from defaults, a file and environment variables.
    ///
    /// # Returns
    ///
    /// * `Ok(AppConfig)` if the configuration was loaded and validated
    /// * `Err(ConfigError)` if there was an error loading the configuration
    pub fn load(&self) -> ConfigResult<AppConfig> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&AppConfig::default())
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
        );

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }

            let format = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => FileFormat::Toml,
                Some("json") => FileFormat::Json,
                Some("yaml" | "yml") => FileFormat::Yaml,
                _ => {
                    return Err(ConfigError::ParseError(format!(
                        "Unsupported file extension for: {path:?}"
                    )))
                }
            };
            builder = builder.add_source(File::from(path.as_path()).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(map_external_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        app_config.validate()?;
        tracing::debug!(?app_config, "configuration loaded");

        Ok(app_config)
    }
}

fn map_external_error(e: ExternalConfigError) -> ConfigError {
    match e {
        ExternalConfigError::NotFound(path) => ConfigError::FileNotFound(PathBuf::from(path)),
        ExternalConfigError::PathParse(kind) => {
            ConfigError::ParseError(format!("Invalid path: {kind:?}"))
        }
        ExternalConfigError::FileParse { uri, cause } => ConfigError::ParseError(format!(
            "Error parsing {}: {cause}",
            uri.as_deref().unwrap_or("config file")
        )),
        ExternalConfigError::Foreign(err) => ConfigError::ParseError(err.to_string()),
        ExternalConfigError::Frozen => {
            ConfigError::ParseError("Configuration is frozen".to_string())
        }
        ExternalConfigError::Message(msg) => ConfigError::ParseError(msg),
        err @ ExternalConfigError::Type { .. } => ConfigError::ParseError(err.to_string()),
    }
}
