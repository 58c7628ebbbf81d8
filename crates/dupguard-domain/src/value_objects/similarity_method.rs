//! Similarity method selector

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Algorithm used to score two function bodies
///
/// The set is closed; the engine matches on it directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMethod {
    /// Jaccard coefficient over token sets
    #[default]
    #[serde(alias = "jaccard_tokens")]
    TokenJaccard,
    /// Ratcliff/Obershelp matching-block ratio over characters
    #[serde(alias = "sequence_matcher")]
    SequenceRatio,
    /// One minus normalised Levenshtein distance over characters
    #[serde(alias = "levenshtein_norm")]
    NormalizedEditDistance,
}

impl SimilarityMethod {
    /// Every available method, default first
    pub const ALL: [SimilarityMethod; 3] = [
        SimilarityMethod::TokenJaccard,
        SimilarityMethod::SequenceRatio,
        SimilarityMethod::NormalizedEditDistance,
    ];

    /// Configuration name
    pub fn name(&self) -> &'static str {
        match self {
            SimilarityMethod::TokenJaccard => "token_jaccard",
            SimilarityMethod::SequenceRatio => "sequence_ratio",
            SimilarityMethod::NormalizedEditDistance => "normalized_edit_distance",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            SimilarityMethod::TokenJaccard => "Token-based Jaccard similarity coefficient",
            SimilarityMethod::SequenceRatio => {
                "Longest-common-block sequence ratio over characters"
            }
            SimilarityMethod::NormalizedEditDistance => "Normalized Levenshtein distance",
        }
    }
}

impl std::fmt::Display for SimilarityMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimilarityMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "token_jaccard" | "jaccard_tokens" => Ok(SimilarityMethod::TokenJaccard),
            "sequence_ratio" | "sequence_matcher" => Ok(SimilarityMethod::SequenceRatio),
            "normalized_edit_distance" | "levenshtein_norm" => {
                Ok(SimilarityMethod::NormalizedEditDistance)
            }
            other => {
                let available: Vec<&str> = Self::ALL.iter().map(Self::name).collect();
                Err(Error::config(format!(
                    "Unknown similarity method '{other}'. Available methods: {}",
                    available.join(", ")
                )))
            }
        }
    }
}
