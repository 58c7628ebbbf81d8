//! Function record entity

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identity of a function: the file it lives in plus its name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionIdentity<'a> {
    /// File containing the function
    pub file_path: &'a str,
    /// Function name
    pub name: &'a str,
}

/// One function extracted from a source file
///
/// Created once during indexing or changed-file extraction and never mutated.
/// Fields are private so the line-range invariant cannot be broken after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFunctionRecord", into = "RawFunctionRecord")]
pub struct FunctionRecord {
    name: String,
    file_path: String,
    line_start: usize,
    line_end: usize,
    signature: String,
    body: String,
}

impl FunctionRecord {
    /// Create a record, validating name, path and line range
    ///
    /// Lines are 1-based and inclusive: `line_end >= line_start > 0`.
    pub fn new(
        name: impl Into<String>,
        file_path: impl Into<String>,
        line_start: usize,
        line_end: usize,
        signature: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let file_path = file_path.into();

        if name.is_empty() {
            return Err(Error::invalid_argument("Function name cannot be empty"));
        }
        if file_path.is_empty() {
            return Err(Error::invalid_argument("File path cannot be empty"));
        }
        if line_start == 0 {
            return Err(Error::invalid_argument(format!(
                "Line start must be positive for {file_path}::{name}"
            )));
        }
        if line_end < line_start {
            return Err(Error::invalid_argument(format!(
                "Line end ({line_end}) must be >= line start ({line_start}) for {file_path}::{name}"
            )));
        }

        Ok(Self {
            name,
            file_path,
            line_start,
            line_end,
            signature: signature.into(),
            body: body.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn line_start(&self) -> usize {
        self.line_start
    }

    pub fn line_end(&self) -> usize {
        self.line_end
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Source text used as the primary similarity input
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Number of lines spanned, inclusive of both ends
    pub fn line_count(&self) -> usize {
        self.line_end - self.line_start + 1
    }

    /// Identity used for self-match exclusion
    pub fn identity(&self) -> FunctionIdentity<'_> {
        FunctionIdentity {
            file_path: &self.file_path,
            name: &self.name,
        }
    }

    /// True when both records denote the same function
    pub fn same_identity(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl std::fmt::Display for FunctionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{} {}",
            self.file_path, self.line_start, self.line_end, self.name
        )
    }
}

/// Wire form; `line_count` is written out and ignored on input
#[derive(Serialize, Deserialize)]
struct RawFunctionRecord {
    name: String,
    file_path: String,
    line_start: usize,
    line_end: usize,
    #[serde(default)]
    signature: String,
    #[serde(rename = "body_content")]
    body: String,
    #[serde(default, skip_deserializing)]
    line_count: usize,
}

impl TryFrom<RawFunctionRecord> for FunctionRecord {
    type Error = Error;

    fn try_from(raw: RawFunctionRecord) -> Result<Self> {
        Self::new(
            raw.name,
            raw.file_path,
            raw.line_start,
            raw.line_end,
            raw.signature,
            raw.body,
        )
    }
}

impl From<FunctionRecord> for RawFunctionRecord {
    fn from(record: FunctionRecord) -> Self {
        let line_count = record.line_count();
        Self {
            name: record.name,
            file_path: record.file_path,
            line_start: record.line_start,
            line_end: record.line_end,
            signature: record.signature,
            body: record.body,
            line_count,
        }
    }
}
