//! Function source port

use std::path::Path;

use crate::entities::FunctionRecord;
use crate::error::{Error, Result};

/// Turns source files into [`FunctionRecord`]s
///
/// Implementations must be shareable across threads; the engine may call
/// them from a scanning loop while matching runs elsewhere.
pub trait FunctionSource: Send + Sync {
    /// Language handled, e.g. `"python"`
    fn language(&self) -> &'static str;

    /// True if this source understands the file at `path`
    fn supports(&self, path: &Path) -> bool;

    /// Extract every function in `content`, labelling records with `file_path`
    fn extract_from_content(&self, content: &str, file_path: &str) -> Result<Vec<FunctionRecord>>;

    /// Read a file and extract its functions, labelling records with `file_path`
    fn extract_from_file(&self, path: &Path, file_path: &str) -> Result<Vec<FunctionRecord>> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::io_with_source(format!("Failed to read {}", path.display()), e))?;
        self.extract_from_content(&content, file_path)
    }
}
