//! Match Orchestration
//!
//! Compares every changed function against every indexed function, keeps the
//! pairs that clear the effective threshold and returns them ranked.
//!
//! Comparisons are independent, so they fan out per changed function across
//! a bounded rayon pool. The index is only borrowed immutably. Results are
//! merged and sorted once all workers are done.

use std::cmp::Ordering;
use std::panic::{AssertUnwindSafe, catch_unwind};

use dupguard_domain::{FunctionRecord, MatchCandidate, SimilarityMethod};
use rayon::prelude::*;

use crate::index::FunctionIndex;
use crate::similarity::SimilarityEngine;
use crate::thresholds::ThresholdResolver;

/// Produces the ranked duplicate list for one run
#[derive(Debug, Clone)]
pub struct MatchOrchestrator {
    engine: SimilarityEngine,
    thresholds: ThresholdResolver,
    max_workers: Option<usize>,
}

impl MatchOrchestrator {
    /// Create an orchestrator using the global rayon pool
    pub fn new(engine: SimilarityEngine, thresholds: ThresholdResolver) -> Self {
        Self {
            engine,
            thresholds,
            max_workers: None,
        }
    }

    /// Bound the number of comparison threads
    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers.max(1));
        self
    }

    pub fn method(&self) -> SimilarityMethod {
        self.engine.method()
    }

    pub fn thresholds(&self) -> &ThresholdResolver {
        &self.thresholds
    }

    /// Ranked matches of `changed` against `index`
    ///
    /// Never pairs a function with itself (same file path and name).
    pub fn find_matches(
        &self,
        index: &FunctionIndex,
        changed: &[FunctionRecord],
    ) -> Vec<MatchCandidate> {
        self.find_matches_with(index, changed, &|a: &str, b: &str| {
            self.engine.compute(a, b)
        })
    }

    fn find_matches_with<S>(
        &self,
        index: &FunctionIndex,
        changed: &[FunctionRecord],
        score: &S,
    ) -> Vec<MatchCandidate>
    where
        S: Fn(&str, &str) -> f64 + Sync,
    {
        if changed.is_empty() || index.is_empty() {
            tracing::info!(
                changed = changed.len(),
                indexed = index.len(),
                "Nothing to compare"
            );
            return Vec::new();
        }

        let run = || -> Vec<MatchCandidate> {
            changed
                .par_iter()
                .flat_map_iter(|new_function| self.matches_with(new_function, index, score))
                .collect()
        };

        let mut matches = match self.build_pool() {
            Some(pool) => pool.install(run),
            None => run(),
        };

        sort_matches(&mut matches);

        tracing::info!(
            matches = matches.len(),
            changed = changed.len(),
            indexed = index.len(),
            method = %self.engine.method(),
            "Analysis complete"
        );

        matches
    }

    /// Matches for a single changed function, unsorted
    fn matches_with<S>(
        &self,
        new_function: &FunctionRecord,
        index: &FunctionIndex,
        score: &S,
    ) -> Vec<MatchCandidate>
    where
        S: Fn(&str, &str) -> f64,
    {
        index
            .iter()
            .filter(|existing| !existing.same_identity(new_function))
            .filter_map(|existing| self.compare_with(score, new_function, existing))
            .collect()
    }

    /// Score one pair; a fault inside scoring counts as no match
    fn compare_with<S>(
        &self,
        scorer: &S,
        new_function: &FunctionRecord,
        existing: &FunctionRecord,
    ) -> Option<MatchCandidate>
    where
        S: Fn(&str, &str) -> f64,
    {
        let score = match catch_unwind(AssertUnwindSafe(|| {
            scorer(new_function.body(), existing.body())
        })) {
            Ok(score) => score,
            Err(_) => {
                tracing::warn!(
                    new_function = %new_function,
                    existing_function = %existing,
                    "Similarity computation failed; treating pair as no match"
                );
                return None;
            }
        };

        let threshold = self
            .thresholds
            .effective_threshold(new_function.file_path(), existing.file_path());
        if score < threshold {
            return None;
        }

        match MatchCandidate::new(new_function.clone(), existing.clone(), score) {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding invalid match");
                None
            }
        }
    }

    fn build_pool(&self) -> Option<rayon::ThreadPool> {
        let workers = self.max_workers?;
        match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => Some(pool),
            Err(e) => {
                tracing::warn!(error = %e, workers, "Falling back to the global thread pool");
                None
            }
        }
    }
}

/// Score descending, then existing path, existing name, new path, new name,
/// existing start line, new start line
pub fn compare_matches(a: &MatchCandidate, b: &MatchCandidate) -> Ordering {
    let (a_new, a_old) = (a.new_function(), a.existing_function());
    let (b_new, b_old) = (b.new_function(), b.existing_function());

    b.similarity_score()
        .total_cmp(&a.similarity_score())
        .then_with(|| a_old.file_path().cmp(b_old.file_path()))
        .then_with(|| a_old.name().cmp(b_old.name()))
        .then_with(|| a_new.file_path().cmp(b_new.file_path()))
        .then_with(|| a_new.name().cmp(b_new.name()))
        .then_with(|| a_old.line_start().cmp(&b_old.line_start()))
        .then_with(|| a_new.line_start().cmp(&b_new.line_start()))
}

/// Sort a match list into report order
pub fn sort_matches(matches: &mut [MatchCandidate]) {
    matches.sort_by(compare_matches);
}
