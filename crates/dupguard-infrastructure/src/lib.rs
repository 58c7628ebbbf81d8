//! Infrastructure layer for dupguard
//!
//! Cross-cutting concerns that sit outside the detection engine:
//!
//! - [`config`]: layered configuration (defaults, TOML file, environment)
//! - [`logging`]: `tracing` subscriber setup
//! - [`error_ext`]: context helpers mapping foreign errors into the domain [`Error`]
//!
//! [`Error`]: dupguard_domain::Error

pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigBuilder, ConfigLoader, LoggingConfig};
pub use logging::{init_logging, parse_log_level};
