//! Similarity Thresholds
//!
//! Resolves the acceptance threshold for a file path from one global default
//! plus per-folder overrides. The most specific (longest) matching folder
//! prefix wins; for a pair of files the stricter side governs.

use std::collections::BTreeMap;

use dupguard_domain::constants::DEFAULT_GLOBAL_THRESHOLD;
use dupguard_domain::{DetectionSettings, Error, Result};
use serde::Serialize;

/// A folder prefix and the threshold applied beneath it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdRule {
    /// Prefix with leading/trailing separators removed
    pub prefix: String,
    /// Threshold in `[0.0, 1.0]`
    pub threshold: f64,
}

/// Immutable threshold table for one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdResolver {
    global_threshold: f64,
    /// Sorted longest prefix first
    rules: Vec<ThresholdRule>,
}

impl Default for ThresholdResolver {
    fn default() -> Self {
        Self {
            global_threshold: DEFAULT_GLOBAL_THRESHOLD,
            rules: Vec::new(),
        }
    }
}

impl ThresholdResolver {
    /// Build a resolver, rejecting any threshold outside `[0.0, 1.0]`
    ///
    /// Prefixes that normalise to the same string keep the stricter value.
    pub fn new<I, S>(global_threshold: f64, folder_thresholds: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        validate_threshold(global_threshold, "Global threshold")?;

        let mut by_prefix: BTreeMap<String, f64> = BTreeMap::new();
        for (folder, threshold) in folder_thresholds {
            let folder = folder.as_ref();
            validate_threshold(threshold, &format!("Threshold for folder '{folder}'"))?;

            let prefix = normalize_path(folder);
            if prefix.is_empty() {
                tracing::warn!(folder, "Ignoring folder threshold with an empty prefix");
                continue;
            }
            by_prefix
                .entry(prefix)
                .and_modify(|existing| *existing = existing.max(threshold))
                .or_insert(threshold);
        }

        let mut rules: Vec<ThresholdRule> = by_prefix
            .into_iter()
            .map(|(prefix, threshold)| ThresholdRule { prefix, threshold })
            .collect();
        rules.sort_by(|a, b| {
            b.prefix
                .len()
                .cmp(&a.prefix.len())
                .then_with(|| a.prefix.cmp(&b.prefix))
        });

        Ok(Self {
            global_threshold,
            rules,
        })
    }

    /// Build a resolver from detection settings
    pub fn from_settings(settings: &DetectionSettings) -> Result<Self> {
        Self::new(
            settings.global_threshold,
            settings
                .folder_thresholds
                .iter()
                .map(|(folder, threshold)| (folder.as_str(), *threshold)),
        )
    }

    /// Build a resolver from textual inputs
    ///
    /// `global` is a float literal (default 0.7 when absent or blank);
    /// `folder_json` is a JSON object mapping prefixes to numbers. `"{}"` or
    /// blank means no overrides. Non-numeric values are configuration errors.
    pub fn from_strings(global: Option<&str>, folder_json: Option<&str>) -> Result<Self> {
        let global_threshold = match global.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse::<f64>().map_err(|e| {
                Error::config_with_source(
                    format!("Invalid global threshold: '{raw}'. Must be a number."),
                    e,
                )
            })?,
            None => DEFAULT_GLOBAL_THRESHOLD,
        };

        let folder_thresholds = match folder_json.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => parse_folder_thresholds(raw)?,
            None => BTreeMap::new(),
        };

        Self::new(global_threshold, folder_thresholds)
    }

    /// Threshold applied when no prefix matches
    pub fn global_threshold(&self) -> f64 {
        self.global_threshold
    }

    /// Folder rules, longest prefix first
    pub fn rules(&self) -> &[ThresholdRule] {
        &self.rules
    }

    /// Threshold for one file: longest matching prefix, else the global default
    pub fn threshold_for(&self, path: &str) -> f64 {
        let path = normalize_path(path);
        self.rules
            .iter()
            .find(|rule| path.starts_with(rule.prefix.as_str()))
            .map_or(self.global_threshold, |rule| rule.threshold)
    }

    /// The stricter of the two per-file thresholds
    pub fn effective_threshold(&self, path_a: &str, path_b: &str) -> f64 {
        self.threshold_for(path_a).max(self.threshold_for(path_b))
    }

    /// True if `score` clears the threshold for `path`
    pub fn should_report(&self, score: f64, path: &str) -> bool {
        score >= self.threshold_for(path)
    }

    /// Global threshold plus folder overrides, for configuration output
    pub fn summary(&self) -> ThresholdSummary {
        ThresholdSummary {
            global_threshold: self.global_threshold,
            folder_thresholds: self
                .rules
                .iter()
                .map(|rule| (rule.prefix.clone(), rule.threshold))
                .collect(),
        }
    }
}

/// Serializable view of a resolver
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdSummary {
    pub global_threshold: f64,
    pub folder_thresholds: BTreeMap<String, f64>,
}

fn validate_threshold(value: f64, what: &str) -> Result<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::config(format!(
            "{what} must be between 0.0 and 1.0, got {value}"
        )))
    }
}

fn parse_folder_thresholds(raw: &str) -> Result<BTreeMap<String, f64>> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| Error::config_with_source("Invalid folder thresholds JSON", e))?;

    let object = value
        .as_object()
        .ok_or_else(|| Error::config("Folder thresholds must be a JSON object"))?;

    object
        .iter()
        .map(|(folder, threshold)| {
            threshold
                .as_f64()
                .map(|t| (folder.clone(), t))
                .ok_or_else(|| {
                    Error::config(format!(
                        "Threshold for folder '{folder}' must be a number, got {threshold}"
                    ))
                })
        })
        .collect()
}

/// Unify separators and strip them from both ends
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/").trim_matches('/').to_string()
}
