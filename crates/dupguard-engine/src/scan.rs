//! Repository scanning
//!
//! Walks a repository, selects files by include/exclude globs and feeds them
//! through a [`FunctionSource`]. A file that cannot be read or parsed is
//! logged and contributes no records; the scan itself carries on.

use std::path::{Path, PathBuf};

use dupguard_domain::{Error, FunctionSource, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::index::SourceUnit;

/// Glob-filtered walker over one repository root
#[derive(Debug, Clone)]
pub struct RepositoryScanner {
    root: PathBuf,
    include: GlobSet,
    exclude: GlobSet,
}

impl RepositoryScanner {
    /// Compile the include and exclude patterns
    ///
    /// Patterns match repository-relative, `/`-separated paths; `*` does not
    /// cross directory boundaries.
    pub fn new<I, E, S, T>(root: impl Into<PathBuf>, include: I, exclude: E) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Ok(Self {
            root: root.into(),
            include: build_glob_set(include)?,
            exclude: build_glob_set(exclude)?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True if a relative path passes both glob sets
    pub fn is_selected(&self, relative_path: &str) -> bool {
        self.include.is_match(relative_path) && !self.exclude.is_match(relative_path)
    }

    /// Relative paths of every selected file, sorted
    pub fn files(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Err(Error::io(format!(
                "Repository root is not a directory: {}",
                self.root.display()
            )));
        }

        let mut files: Vec<String> = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable directory entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| relative_path(&self.root, entry.path()))
            .filter(|relative| self.is_selected(relative))
            .collect();

        files.sort();
        Ok(files)
    }

    /// Extract functions from every selected file the source supports
    pub fn scan(&self, source: &dyn FunctionSource) -> Result<Vec<SourceUnit>> {
        let files = self.files()?;
        let mut units = Vec::with_capacity(files.len());

        for relative in files {
            let path = self.root.join(&relative);
            if !source.supports(&path) {
                continue;
            }

            let records = match source.extract_from_file(&path, &relative) {
                Ok(records) => records,
                Err(e) => {
                    tracing::warn!(file = %relative, error = %e, "Skipping file");
                    Vec::new()
                }
            };
            units.push(SourceUnit::new(relative, records));
        }

        tracing::debug!(
            root = %self.root.display(),
            files = units.len(),
            language = source.language(),
            "Repository scanned"
        );
        Ok(units)
    }
}

fn build_glob_set<I, S>(patterns: I) -> Result<GlobSet>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| Error::config_with_source(format!("Invalid glob pattern '{pattern}'"), e))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| Error::config_with_source("Failed to compile glob patterns", e))
}

/// Path relative to `root` with `/` separators
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<&str> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<_>>()?;
    Some(parts.join("/"))
}
