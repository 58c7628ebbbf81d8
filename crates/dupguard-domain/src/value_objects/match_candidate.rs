//! Match results and confidence bands

use serde::{Deserialize, Serialize};

use crate::constants::{HIGH_CONFIDENCE_CUTOFF, LOW_CONFIDENCE_CUTOFF, MEDIUM_CONFIDENCE_CUTOFF};
use crate::entities::FunctionRecord;
use crate::error::{Error, Result};

/// Fixed categorical label derived from a similarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConfidenceBand {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
}

impl ConfidenceBand {
    /// Band for a score: `>= 0.8` High, `>= 0.6` Medium, `>= 0.4` Low, else Very Low
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_CONFIDENCE_CUTOFF {
            ConfidenceBand::High
        } else if score >= MEDIUM_CONFIDENCE_CUTOFF {
            ConfidenceBand::Medium
        } else if score >= LOW_CONFIDENCE_CUTOFF {
            ConfidenceBand::Low
        } else {
            ConfidenceBand::VeryLow
        }
    }

    /// Get human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceBand::High => "High",
            ConfidenceBand::Medium => "Medium",
            ConfidenceBand::Low => "Low",
            ConfidenceBand::VeryLow => "Very Low",
        }
    }
}

impl std::fmt::Display for ConfidenceBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A changed function paired with an existing function it resembles
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate {
    new_function: FunctionRecord,
    existing_function: FunctionRecord,
    similarity_score: f64,
    confidence_level: ConfidenceBand,
}

impl MatchCandidate {
    /// Create a match; the score must lie in `[0.0, 1.0]`
    pub fn new(
        new_function: FunctionRecord,
        existing_function: FunctionRecord,
        similarity_score: f64,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&similarity_score) {
            return Err(Error::invalid_argument(format!(
                "Similarity score must be between 0.0 and 1.0, got {similarity_score}"
            )));
        }

        Ok(Self {
            new_function,
            existing_function,
            similarity_score,
            confidence_level: ConfidenceBand::from_score(similarity_score),
        })
    }

    pub fn new_function(&self) -> &FunctionRecord {
        &self.new_function
    }

    pub fn existing_function(&self) -> &FunctionRecord {
        &self.existing_function
    }

    pub fn similarity_score(&self) -> f64 {
        self.similarity_score
    }

    pub fn confidence_band(&self) -> ConfidenceBand {
        self.confidence_level
    }

    pub fn is_high_confidence(&self) -> bool {
        self.confidence_level == ConfidenceBand::High
    }
}

impl std::fmt::Display for MatchCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ~ {} ({:.1}%, {})",
            self.new_function,
            self.existing_function,
            self.similarity_score * 100.0,
            self.confidence_level
        )
    }
}

/// Counts over a match list, as printed under report tables
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchSummary {
    /// Total number of matches
    pub total_matches: usize,
    /// Matches in the High band
    pub high_confidence: usize,
    /// Matches in the Medium band
    pub medium_confidence: usize,
    /// Matches in the Low band
    pub low_confidence: usize,
    /// Matches in the Very Low band
    pub very_low_confidence: usize,
    /// Mean similarity score; `0.0` for an empty list
    pub average_similarity: f64,
}

impl MatchSummary {
    /// Tally a match list
    pub fn from_matches(matches: &[MatchCandidate]) -> Self {
        let mut summary = Self {
            total_matches: matches.len(),
            ..Self::default()
        };

        let mut total_score = 0.0;
        for m in matches {
            total_score += m.similarity_score();
            match m.confidence_band() {
                ConfidenceBand::High => summary.high_confidence += 1,
                ConfidenceBand::Medium => summary.medium_confidence += 1,
                ConfidenceBand::Low => summary.low_confidence += 1,
                ConfidenceBand::VeryLow => summary.very_low_confidence += 1,
            }
        }
        if !matches.is_empty() {
            summary.average_similarity = total_score / matches.len() as f64;
        }

        summary
    }
}
