//! Detection settings

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_EXCLUDE_PATTERNS, DEFAULT_GLOBAL_THRESHOLD, DEFAULT_INCLUDE_PATTERNS,
    DEFAULT_MIN_FUNCTION_LINES,
};
use crate::value_objects::SimilarityMethod;

/// Everything the engine needs to know for one run
///
/// Built once (usually by the infrastructure config loader) and passed by
/// reference into the detector. Threshold ranges are checked when the engine
/// turns these values into a resolver, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSettings {
    /// Threshold applied when no folder prefix matches
    pub global_threshold: f64,
    /// Per-folder overrides keyed by path prefix
    pub folder_thresholds: BTreeMap<String, f64>,
    /// Scoring algorithm
    pub similarity_method: SimilarityMethod,
    /// Functions shorter than this are ignored
    pub min_function_lines: usize,
    /// Drop functions whose name starts with `_`
    pub exclude_private: bool,
    /// Strip comments and collapse whitespace in extracted bodies
    pub normalize_bodies: bool,
    /// Globs selecting files to index
    pub include_patterns: Vec<String>,
    /// Globs excluded from indexing
    pub exclude_patterns: Vec<String>,
    /// Upper bound on comparison worker threads (`None` = one per core)
    pub max_workers: Option<usize>,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            global_threshold: DEFAULT_GLOBAL_THRESHOLD,
            folder_thresholds: BTreeMap::new(),
            similarity_method: SimilarityMethod::default(),
            min_function_lines: DEFAULT_MIN_FUNCTION_LINES,
            exclude_private: false,
            normalize_bodies: false,
            include_patterns: DEFAULT_INCLUDE_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect(),
            exclude_patterns: DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect(),
            max_workers: None,
        }
    }
}

impl DetectionSettings {
    /// Replace the global threshold
    pub fn with_global_threshold(mut self, threshold: f64) -> Self {
        self.global_threshold = threshold;
        self
    }

    /// Add a folder threshold override
    pub fn with_folder_threshold(mut self, prefix: impl Into<String>, threshold: f64) -> Self {
        self.folder_thresholds.insert(prefix.into(), threshold);
        self
    }

    /// Replace the similarity method
    pub fn with_similarity_method(mut self, method: SimilarityMethod) -> Self {
        self.similarity_method = method;
        self
    }

    /// Replace the minimum function length
    pub fn with_min_function_lines(mut self, lines: usize) -> Self {
        self.min_function_lines = lines;
        self
    }

    /// Bound the comparison worker pool
    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }
}
