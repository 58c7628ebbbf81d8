//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables and
//! default values, using Figment to merge the layers.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use dupguard_domain::{DetectionSettings, Error, Result, SimilarityMethod};
use dupguard_engine::ThresholdResolver;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};

use crate::config::{AppConfig, LoggingConfig};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
    LEGACY_FOLDER_THRESHOLDS_ENV, LEGACY_GLOBAL_THRESHOLD_ENV, LEGACY_SIMILARITY_METHOD_ENV,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,

    /// Honour the unprefixed CI variables
    legacy_env: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
            legacy_env: true,
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Enable or disable `GLOBAL_THRESHOLD` / `FOLDER_THRESHOLDS` / `SIMILARITY_METHOD`
    pub fn with_legacy_env(mut self, enabled: bool) -> Self {
        self.legacy_env = enabled;
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix (e.g., `DUPGUARD_DETECTION__GLOBAL_THRESHOLD`)
    /// 4. Unprefixed CI variables (`GLOBAL_THRESHOLD`, `FOLDER_THRESHOLDS`, `SIMILARITY_METHOD`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        // Double underscore separates nested keys; single underscores stay in field names
        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let mut app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        if self.legacy_env {
            apply_legacy_overrides(&mut app_config, |key| env::var(key).ok())?;
        }

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(format!(".{DEFAULT_CONFIG_DIR}"))
                .join(DEFAULT_CONFIG_FILENAME),
            dirs::config_dir()
                .map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME))
                .unwrap_or_default(),
        ];

        candidates.into_iter().find(|path| path.is_file())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply the unprefixed CI variables on top of a loaded configuration
///
/// `lookup` resolves a variable name to its value. Blank values are ignored.
/// Folder thresholds from `FOLDER_THRESHOLDS` are merged over the existing
/// ones, replacing entries with the same prefix.
pub fn apply_legacy_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let value = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(raw) = value(LEGACY_GLOBAL_THRESHOLD_ENV) {
        config.detection.global_threshold = raw.parse::<f64>().config_context(format!(
            "Invalid {LEGACY_GLOBAL_THRESHOLD_ENV}: '{raw}'"
        ))?;
    }

    if let Some(raw) = value(LEGACY_FOLDER_THRESHOLDS_ENV) {
        let folders: BTreeMap<String, f64> = serde_json::from_str(&raw).config_context(format!(
            "Invalid {LEGACY_FOLDER_THRESHOLDS_ENV}; expected a JSON object of numbers"
        ))?;
        config.detection.folder_thresholds.extend(folders);
    }

    if let Some(raw) = value(LEGACY_SIMILARITY_METHOD_ENV) {
        config.detection.similarity_method = raw.parse::<SimilarityMethod>()?;
    }

    Ok(())
}

/// Validate application configuration
fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_detection_config(&config.detection)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_detection_config(detection: &DetectionSettings) -> Result<()> {
    ThresholdResolver::from_settings(detection)?;

    if detection.min_function_lines == 0 {
        return Err(Error::config("Minimum function lines must be greater than 0"));
    }
    if detection.max_workers == Some(0) {
        return Err(Error::config("Maximum workers cannot be 0"));
    }
    if detection.include_patterns.is_empty() {
        return Err(Error::config("At least one include pattern is required"));
    }
    Ok(())
}

fn validate_logging_config(logging: &LoggingConfig) -> Result<()> {
    parse_log_level(&logging.level).map(|_| ())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set detection settings
    pub fn with_detection(mut self, detection: DetectionSettings) -> Self {
        self.config.detection = detection;
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}
