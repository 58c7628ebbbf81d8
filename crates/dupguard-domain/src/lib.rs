//! Domain layer for dupguard
//!
//! Holds the types every other crate agrees on: the [`FunctionRecord`] unit
//! produced by extraction, the [`MatchCandidate`] produced by matching, the
//! [`DetectionSettings`] configuration surface and the [`FunctionSource`] port
//! through which language parsers feed the engine.
//!
//! This crate performs no I/O of its own apart from the default
//! [`FunctionSource::extract_from_file`] helper.

pub mod constants;
pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use entities::{FunctionIdentity, FunctionRecord};
pub use error::{Error, Result};
pub use ports::FunctionSource;
pub use value_objects::{
    ConfidenceBand, DetectionSettings, MatchCandidate, MatchSummary, SimilarityMethod,
};
