//! Duplicate-Logic Detection Engine
//!
//! Flags newly written functions that closely resemble functions already in
//! the codebase, so a reviewer can point the author at the existing helper.
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Extraction | [`extract`] | [`FunctionRecord`]s per file |
//! | Scanning | [`scan`] | [`SourceUnit`]s for a repository |
//! | Indexing | [`index`] | [`FunctionIndex`] |
//! | Scoring | [`similarity`] | score in `[0.0, 1.0]` |
//! | Thresholds | [`thresholds`] | per-path acceptance threshold |
//! | Matching | [`orchestrator`] | ranked [`MatchCandidate`]s |
//!
//! [`DuplicateDetector`] wires the stages together.
//!
//! ## Usage
//!
//! ```ignore
//! use dupguard_engine::{DetectionSettings, DuplicateDetector};
//!
//! let mut detector = DuplicateDetector::new(DetectionSettings::default())?;
//! detector.index_repository(".")?;
//! let matches = detector.analyze_changes(&["src/billing.py"]);
//! ```
//!
//! [`FunctionRecord`]: dupguard_domain::FunctionRecord
//! [`MatchCandidate`]: dupguard_domain::MatchCandidate

pub mod detector;
pub mod extract;
pub mod index;
pub mod orchestrator;
pub mod scan;
pub mod similarity;
pub mod thresholds;

pub use detector::{ConfigurationInfo, DuplicateDetector};
pub use extract::{PythonFunctionExtractor, normalize_code};
pub use index::{FunctionIndex, IndexFilter, SourceUnit, is_test_file};
pub use orchestrator::{MatchOrchestrator, sort_matches};
pub use scan::RepositoryScanner;
pub use similarity::SimilarityEngine;
pub use thresholds::{ThresholdResolver, ThresholdRule, ThresholdSummary};

pub use dupguard_domain::{
    ConfidenceBand, DetectionSettings, Error, FunctionRecord, FunctionSource, MatchCandidate,
    MatchSummary, Result, SimilarityMethod,
};

/// Match `changed` against `index` with the given engine and thresholds
///
/// Convenience wrapper over [`MatchOrchestrator::find_matches`] using the
/// global thread pool.
pub fn find_matches(
    index: &FunctionIndex,
    changed: &[FunctionRecord],
    engine: SimilarityEngine,
    thresholds: ThresholdResolver,
) -> Vec<MatchCandidate> {
    MatchOrchestrator::new(engine, thresholds).find_matches(index, changed)
}
