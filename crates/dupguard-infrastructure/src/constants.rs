//! Infrastructure constants

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Configuration file looked up when no explicit path is given
pub const DEFAULT_CONFIG_FILENAME: &str = "dupguard.toml";

/// Directory holding the configuration file (`.dupguard/` locally, `dupguard/` under the user config dir)
pub const DEFAULT_CONFIG_DIR: &str = "dupguard";

/// Prefix for environment overrides, e.g. `DUPGUARD_DETECTION__GLOBAL_THRESHOLD`
pub const CONFIG_ENV_PREFIX: &str = "DUPGUARD";

/// Separator between nested keys in environment overrides
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Unprefixed global threshold, as set by CI workflows
pub const LEGACY_GLOBAL_THRESHOLD_ENV: &str = "GLOBAL_THRESHOLD";

/// Unprefixed JSON object of folder thresholds
pub const LEGACY_FOLDER_THRESHOLDS_ENV: &str = "FOLDER_THRESHOLDS";

/// Unprefixed similarity method name
pub const LEGACY_SIMILARITY_METHOD_ENV: &str = "SIMILARITY_METHOD";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Environment variable overriding the configured log filter
pub const LOG_ENV_VAR: &str = "DUPGUARD_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// File stem used when the log file path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "dupguard";
