//! Function Index
//!
//! The searchable corpus of existing functions for one run. Built once from
//! the output of a [`FunctionSource`](dupguard_domain::FunctionSource) and only
//! read afterwards, so it can be shared across comparison workers without
//! locking.

use std::path::Path;

use dupguard_domain::constants::DEFAULT_MIN_FUNCTION_LINES;
use dupguard_domain::{DetectionSettings, FunctionRecord};

/// Functions extracted from one file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceUnit {
    /// Repository-relative path of the file
    pub file_path: String,
    /// Functions found in it (empty if parsing failed)
    pub records: Vec<FunctionRecord>,
}

impl SourceUnit {
    pub fn new(file_path: impl Into<String>, records: Vec<FunctionRecord>) -> Self {
        Self {
            file_path: file_path.into(),
            records,
        }
    }
}

/// Record filter shared by indexing and changed-function extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexFilter {
    /// Records spanning fewer lines are dropped
    pub min_function_lines: usize,
    /// Drop functions whose name starts with `_`
    pub exclude_private: bool,
}

impl Default for IndexFilter {
    fn default() -> Self {
        Self {
            min_function_lines: DEFAULT_MIN_FUNCTION_LINES,
            exclude_private: false,
        }
    }
}

impl IndexFilter {
    pub fn from_settings(settings: &DetectionSettings) -> Self {
        Self {
            min_function_lines: settings.min_function_lines,
            exclude_private: settings.exclude_private,
        }
    }

    /// True if the record should take part in matching
    pub fn retain(&self, record: &FunctionRecord) -> bool {
        if record.line_count() < self.min_function_lines {
            return false;
        }
        if is_test_file(record.file_path()) {
            return false;
        }
        !(self.exclude_private && record.name().starts_with('_'))
    }

    /// Keep only the records passing [`retain`](Self::retain)
    pub fn apply(&self, records: impl IntoIterator<Item = FunctionRecord>) -> Vec<FunctionRecord> {
        records.into_iter().filter(|r| self.retain(r)).collect()
    }
}

/// True if a path looks like a test file
///
/// Matches a basename starting with `test_`, a file stem ending in `_test`,
/// or any directory named `test` or `tests`. Case-insensitive.
pub fn is_test_file(file_path: &str) -> bool {
    let normalized = file_path.replace('\\', "/").to_lowercase();
    let path = Path::new(&normalized);

    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");

    if name.starts_with("test_") || stem.ends_with("_test") {
        return true;
    }

    path.parent().is_some_and(|parent| {
        parent
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .any(|segment| segment == "test" || segment == "tests")
    })
}

/// Ordered, duplicate-permitting collection of existing functions
#[derive(Debug, Clone, Default)]
pub struct FunctionIndex {
    records: Vec<FunctionRecord>,
    file_count: usize,
}

impl FunctionIndex {
    /// Build the index from extracted source units
    ///
    /// Records are kept in input order. Nothing is deduplicated: repeated
    /// logic is what the matcher looks for.
    pub fn build(units: impl IntoIterator<Item = SourceUnit>, filter: &IndexFilter) -> Self {
        let mut records = Vec::new();
        let mut file_count = 0;
        let mut dropped = 0;

        for unit in units {
            file_count += 1;
            let before = unit.records.len();
            let kept = filter.apply(unit.records);
            dropped += before - kept.len();
            records.extend(kept);
        }

        tracing::info!(
            functions = records.len(),
            files = file_count,
            dropped,
            "Indexed functions from codebase"
        );

        Self {
            records,
            file_count,
        }
    }

    /// Build directly from records that were already filtered
    pub fn from_records(records: Vec<FunctionRecord>) -> Self {
        Self {
            records,
            file_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of source units consumed by [`build`](Self::build)
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    pub fn records(&self) -> &[FunctionRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FunctionRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a FunctionIndex {
    type Item = &'a FunctionRecord;
    type IntoIter = std::slice::Iter<'a, FunctionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
