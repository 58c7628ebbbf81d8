//! Duplicate detector facade
//!
//! Ties the pieces together for one review run:
//!
//! 1. validate [`DetectionSettings`] (fails before any file is read)
//! 2. index the repository through a [`FunctionSource`]
//! 3. extract functions from the changed files
//! 4. hand both to the [`MatchOrchestrator`]
//!
//! ## Usage
//!
//! ```ignore
//! use dupguard_engine::DuplicateDetector;
//! use dupguard_domain::DetectionSettings;
//!
//! let mut detector = DuplicateDetector::new(DetectionSettings::default())?;
//! detector.index_repository("path/to/repo")?;
//! for m in detector.analyze_changes(&["src/new_module.py"]) {
//!     println!("{m}");
//! }
//! ```

use std::path::{Path, PathBuf};

use dupguard_domain::{
    DetectionSettings, Error, FunctionRecord, FunctionSource, MatchCandidate, Result,
    SimilarityMethod,
};
use serde::Serialize;

use crate::extract::PythonFunctionExtractor;
use crate::index::{FunctionIndex, IndexFilter};
use crate::orchestrator::MatchOrchestrator;
use crate::scan::RepositoryScanner;
use crate::similarity::SimilarityEngine;
use crate::thresholds::{ThresholdResolver, ThresholdSummary};

/// Serializable description of a detector's configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationInfo {
    pub repository_path: PathBuf,
    pub similarity_method: SimilarityMethod,
    pub similarity_description: &'static str,
    pub min_function_lines: usize,
    pub indexed_functions: usize,
    pub available_similarity_methods: Vec<SimilarityMethod>,
    #[serde(flatten)]
    pub thresholds: ThresholdSummary,
}

/// Duplicate-logic detector for one repository
pub struct DuplicateDetector {
    settings: DetectionSettings,
    source: Box<dyn FunctionSource>,
    filter: IndexFilter,
    orchestrator: MatchOrchestrator,
    repository_root: PathBuf,
    index: FunctionIndex,
}

impl DuplicateDetector {
    /// Create a detector for Python sources
    pub fn new(settings: DetectionSettings) -> Result<Self> {
        let extractor =
            PythonFunctionExtractor::new().with_normalized_bodies(settings.normalize_bodies);
        Self::with_source(settings, Box::new(extractor))
    }

    /// Create a detector with a custom function source
    pub fn with_source(settings: DetectionSettings, source: Box<dyn FunctionSource>) -> Result<Self> {
        validate_settings(&settings)?;

        let thresholds = ThresholdResolver::from_settings(&settings)?;
        let mut orchestrator =
            MatchOrchestrator::new(SimilarityEngine::new(settings.similarity_method), thresholds);
        if let Some(workers) = settings.max_workers {
            orchestrator = orchestrator.with_max_workers(workers);
        }

        tracing::info!(
            method = %settings.similarity_method,
            language = source.language(),
            global_threshold = settings.global_threshold,
            folder_overrides = settings.folder_thresholds.len(),
            "Initialized duplicate detector"
        );

        Ok(Self {
            filter: IndexFilter::from_settings(&settings),
            settings,
            source,
            orchestrator,
            repository_root: PathBuf::from("."),
            index: FunctionIndex::default(),
        })
    }

    pub fn settings(&self) -> &DetectionSettings {
        &self.settings
    }

    pub fn index(&self) -> &FunctionIndex {
        &self.index
    }

    pub fn repository_root(&self) -> &Path {
        &self.repository_root
    }

    /// Scan `root` and rebuild the index; returns the number of indexed functions
    ///
    /// Files that fail to read or parse are skipped with a warning.
    pub fn index_repository(&mut self, root: impl AsRef<Path>) -> Result<usize> {
        let root = root.as_ref();
        let scanner = RepositoryScanner::new(
            root,
            &self.settings.include_patterns,
            &self.settings.exclude_patterns,
        )?;

        let units = scanner.scan(self.source.as_ref())?;
        self.index = FunctionIndex::build(units, &self.filter);
        self.repository_root = root.to_path_buf();

        Ok(self.index.len())
    }

    /// Functions in the changed files, filtered like the index
    ///
    /// Relative paths are resolved against the repository root. Unsupported,
    /// missing, unreadable and unparsable files contribute nothing.
    pub fn changed_functions<P: AsRef<str>>(&self, changed_files: &[P]) -> Vec<FunctionRecord> {
        let mut records = Vec::new();

        for changed in changed_files {
            let (path, label) = self.resolve(changed.as_ref());

            if !self.source.supports(&path) {
                tracing::debug!(file = %label, "Skipping unsupported file");
                continue;
            }
            if !path.is_file() {
                tracing::warn!(file = %label, "Changed file not found; skipping");
                continue;
            }

            match self.source.extract_from_file(&path, &label) {
                Ok(found) => records.extend(self.filter.apply(found)),
                Err(e) => tracing::warn!(file = %label, error = %e, "Error analyzing changed file"),
            }
        }

        records
    }

    /// Match every function in the changed files against the index
    pub fn analyze_changes<P: AsRef<str>>(&self, changed_files: &[P]) -> Vec<MatchCandidate> {
        let changed = self.changed_functions(changed_files);
        if changed.is_empty() {
            tracing::info!(files = changed_files.len(), "No functions to analyze");
            return Vec::new();
        }
        self.orchestrator.find_matches(&self.index, &changed)
    }

    /// Match pre-extracted records against the index
    pub fn analyze_records(&self, changed: &[FunctionRecord]) -> Vec<MatchCandidate> {
        self.orchestrator.find_matches(&self.index, changed)
    }

    pub fn configuration_info(&self) -> ConfigurationInfo {
        let method = self.orchestrator.method();
        ConfigurationInfo {
            repository_path: self.repository_root.clone(),
            similarity_method: method,
            similarity_description: method.description(),
            min_function_lines: self.settings.min_function_lines,
            indexed_functions: self.index.len(),
            available_similarity_methods: SimilarityMethod::ALL.to_vec(),
            thresholds: self.orchestrator.thresholds().summary(),
        }
    }

    /// Filesystem path to open and the label recorded on its functions
    fn resolve(&self, changed: &str) -> (PathBuf, String) {
        let given = Path::new(changed);
        let path = if given.is_absolute() {
            given.to_path_buf()
        } else {
            self.repository_root.join(given)
        };

        let label = if given.is_absolute() {
            path.strip_prefix(&self.repository_root)
                .map_or_else(|_| changed.to_string(), |p| p.to_string_lossy().into_owned())
        } else {
            changed.to_string()
        };
        let label = label.replace('\\', "/");
        let label = label.trim_start_matches("./").to_string();

        (path, label)
    }
}

impl std::fmt::Debug for DuplicateDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuplicateDetector")
            .field("settings", &self.settings)
            .field("language", &self.source.language())
            .field("repository_root", &self.repository_root)
            .field("indexed_functions", &self.index.len())
            .finish()
    }
}

fn validate_settings(settings: &DetectionSettings) -> Result<()> {
    if settings.min_function_lines == 0 {
        return Err(Error::config("min_function_lines must be greater than 0"));
    }
    if settings.max_workers == Some(0) {
        return Err(Error::config("max_workers must be greater than 0"));
    }
    Ok(())
}
