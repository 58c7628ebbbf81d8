//! Error extension utilities
//!
//! Context helpers that turn foreign errors into the domain [`Error`] while
//! keeping the original error as the source.
//!
//! ```ignore
//! use dupguard_infrastructure::error_ext::ErrorContext;
//!
//! let text = std::fs::read_to_string(&path)
//!     .io_context(format!("Failed to read {}", path.display()))?;
//! let config: AppConfig = figment.extract().config_context("Failed to extract configuration")?;
//! ```

use std::fmt;

use dupguard_domain::{Error, Result};

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Wrap the error as [`Error::Internal`]
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;

    /// Wrap the error as [`Error::Io`]
    fn io_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;

    /// Wrap the error as [`Error::Configuration`]
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|err| Error::internal(format!("{context}: {err}")))
    }

    fn io_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|err| Error::io_with_source(format!("{context}: {err}"), err))
    }

    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display,
    {
        self.map_err(|err| Error::config_with_source(format!("{context}: {err}"), err))
    }
}
