//! Configuration
//!
//! [`AppConfig`] is the full configuration tree; [`ConfigLoader`] builds it
//! from defaults, a TOML file and the environment.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader, apply_legacy_overrides};
pub use types::{AppConfig, LoggingConfig};
