//! Function Extraction
//!
//! Implementations of the [`FunctionSource`](dupguard_domain::FunctionSource)
//! port. Each extractor walks a tree-sitter syntax tree and turns function
//! definitions into [`FunctionRecord`](dupguard_domain::FunctionRecord)s.

pub mod python;

use once_cell::sync::Lazy;
use regex::Regex;

pub use python::PythonFunctionExtractor;

/// Syntax trees nested deeper than this are not searched for functions
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#.*$").expect("Invalid regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid regex"));

/// Strip `#` comments, collapse runs of whitespace and drop blank lines
///
/// Purely textual: a `#` inside a string literal also starts a comment.
pub fn normalize_code(code: &str) -> String {
    code.split('\n')
        .map(|line| {
            let without_comment = COMMENT_RE.replace(line, "");
            WHITESPACE_RE
                .replace_all(without_comment.trim(), " ")
                .into_owned()
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
