//! Domain constants
//!
//! Defaults and fixed cut points shared across crates.

/// Functions shorter than this many lines are ignored by default
pub const DEFAULT_MIN_FUNCTION_LINES: usize = 5;

/// Global similarity threshold used when none is configured
pub const DEFAULT_GLOBAL_THRESHOLD: f64 = 0.7;

/// Lower bound of the `High` confidence band
pub const HIGH_CONFIDENCE_CUTOFF: f64 = 0.8;

/// Lower bound of the `Medium` confidence band
pub const MEDIUM_CONFIDENCE_CUTOFF: f64 = 0.6;

/// Lower bound of the `Low` confidence band
pub const LOW_CONFIDENCE_CUTOFF: f64 = 0.4;

/// Glob patterns scanned when building the index
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &["**/*.py"];

/// Glob patterns never scanned when building the index
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "**/tests/**",
    "**/test/**",
    "**/test_*.py",
    "**/*_test.py",
    "**/.git/**",
    "**/.venv/**",
    "**/venv/**",
    "**/__pycache__/**",
    "**/node_modules/**",
];
