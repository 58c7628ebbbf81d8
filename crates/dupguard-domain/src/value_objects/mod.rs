//! Value objects
//!
//! Immutable values without identity: the similarity method selector, match
//! results and the detection settings consumed by the engine.

mod match_candidate;
mod settings;
mod similarity_method;

pub use match_candidate::{ConfidenceBand, MatchCandidate, MatchSummary};
pub use settings::DetectionSettings;
pub use similarity_method::SimilarityMethod;
