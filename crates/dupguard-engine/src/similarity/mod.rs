//! Function Body Similarity
//!
//! Three interchangeable scoring algorithms over two bodies of text:
//!
//! | Method | Cost | Sensitive to |
//! |--------|------|--------------|
//! | [`SimilarityMethod::TokenJaccard`] | `O(n + m)` | vocabulary only |
//! | [`SimilarityMethod::SequenceRatio`] | `O(n·m)` worst case | order, whitespace |
//! | [`SimilarityMethod::NormalizedEditDistance`] | `O(n·m)` | every character |
//!
//! Every method is a pure, symmetric function of its inputs and always
//! returns a value in `[0.0, 1.0]`.
//!
//! ## Usage
//!
//! ```ignore
//! use dupguard_engine::similarity::SimilarityEngine;
//! use dupguard_domain::SimilarityMethod;
//!
//! let engine = SimilarityEngine::new(SimilarityMethod::TokenJaccard);
//! let score = engine.compute("return a + b", "return x + y");
//! ```

pub mod edit_distance;
pub mod sequence;
pub mod tokens;

use dupguard_domain::SimilarityMethod;

pub use edit_distance::{levenshtein_distance, normalized_edit_similarity};
pub use sequence::{matching_characters, sequence_ratio};
pub use tokens::{token_jaccard, tokenize};

/// Scores function bodies with one fixed algorithm
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimilarityEngine {
    method: SimilarityMethod,
}

impl SimilarityEngine {
    /// Create an engine for the given method
    pub fn new(method: SimilarityMethod) -> Self {
        Self { method }
    }

    /// The algorithm this engine runs
    pub fn method(&self) -> SimilarityMethod {
        self.method
    }

    /// Similarity of two bodies in `[0.0, 1.0]`
    pub fn compute(&self, a: &str, b: &str) -> f64 {
        let raw = match self.method {
            SimilarityMethod::TokenJaccard => token_jaccard(a, b),
            SimilarityMethod::SequenceRatio => sequence_ratio(a, b),
            SimilarityMethod::NormalizedEditDistance => normalized_edit_similarity(a, b),
        };
        clamp_score(raw)
    }
}

/// Force a score into `[0.0, 1.0]`; NaN becomes `0.0`
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}
