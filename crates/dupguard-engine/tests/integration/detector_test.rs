//! End-to-end runs of the detector over a temporary repository

use std::fs;
use std::path::Path;

use dupguard_engine::{
    ConfidenceBand, DetectionSettings, DuplicateDetector, FunctionRecord, MatchSummary,
};
use tempfile::TempDir;

const BILLING: &str = r#"import re


def validate_email(email):
    """Validate email format."""
    pattern = r'^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$'
    return re.match(pattern, email) is not None


def calculate_discount(price, percentage):
    """Calculate discount amount."""
    if percentage < 0 or percentage > 100:
        raise ValueError("Percentage must be between 0 and 100")
    return price * (percentage / 100)
"#;

const NEW_FEATURE: &str = r#"import re


def validate_email(email_address):
    """Check the email address format."""
    pattern = r'^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$'
    return re.match(pattern, email_address) is not None


def calculate_discount(price, percentage):
    """Work out the discount."""
    if percentage < 0 or percentage > 100:
        raise ValueError("Invalid discount percentage supplied")
    return price * (percentage / 100)
"#;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn repository() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app/billing.py", BILLING);
    write(dir.path(), "pkg/new_feature.py", NEW_FEATURE);
    write(dir.path(), "app/broken.py", "def broken(:\n    pass\n");
    write(dir.path(), "tests/test_billing.py", BILLING);
    write(dir.path(), "README.md", "# demo\n");
    dir
}

fn detector(root: &Path) -> DuplicateDetector {
    let settings = DetectionSettings::default()
        .with_global_threshold(0.6)
        .with_min_function_lines(3);
    let mut detector = DuplicateDetector::new(settings).unwrap();
    detector.index_repository(root).unwrap();
    detector
}

#[test]
fn test_index_skips_broken_and_test_files() {
    let repo = repository();
    let detector = detector(repo.path());

    let paths: Vec<&str> = detector
        .index()
        .iter()
        .map(FunctionRecord::file_path)
        .collect();

    assert_eq!(detector.index().len(), 4);
    assert!(paths.iter().all(|p| *p == "app/billing.py" || *p == "pkg/new_feature.py"));
}

#[test]
fn test_changed_file_matches_existing_helpers() {
    let repo = repository();
    let detector = detector(repo.path());

    let matches = detector.analyze_changes(&["pkg/new_feature.py"]);

    assert_eq!(matches.len(), 2);

    let first = &matches[0];
    assert_eq!(first.new_function().name(), "validate_email");
    assert_eq!(first.existing_function().file_path(), "app/billing.py");
    assert!(first.similarity_score() > 0.7);
    assert_eq!(first.confidence_band(), ConfidenceBand::High);

    let second = &matches[1];
    assert_eq!(second.new_function().name(), "calculate_discount");
    assert!(second.similarity_score() > 0.6);
    assert_eq!(second.confidence_band(), ConfidenceBand::Medium);

    let summary = MatchSummary::from_matches(&matches);
    assert_eq!(summary.total_matches, 2);
    assert_eq!(summary.high_confidence, 1);
    assert_eq!(summary.medium_confidence, 1);
}

#[test]
fn test_never_matches_a_function_with_itself() {
    let repo = repository();
    let detector = detector(repo.path());

    let matches = detector.analyze_changes(&["app/billing.py", "pkg/new_feature.py"]);

    assert!(!matches.is_empty());
    for m in &matches {
        assert!(!m.new_function().same_identity(m.existing_function()), "{m}");
    }
}

#[test]
fn test_empty_change_list() {
    let repo = repository();
    let detector = detector(repo.path());

    assert!(detector.analyze_changes::<&str>(&[]).is_empty());
    assert!(detector.analyze_records(&[]).is_empty());
    assert_eq!(detector.index().len(), 4);
}

#[test]
fn test_broken_changed_file_yields_nothing() {
    let repo = repository();
    let detector = detector(repo.path());

    assert!(detector.changed_functions(&["app/broken.py"]).is_empty());
}

#[test]
fn test_absolute_changed_path_is_labelled_relative() {
    let repo = repository();
    let detector = detector(repo.path());

    let absolute = repo.path().join("pkg/new_feature.py");
    let changed = detector.changed_functions(&[absolute.to_string_lossy()]);

    assert_eq!(changed.len(), 2);
    assert!(changed.iter().all(|f| f.file_path() == "pkg/new_feature.py"));
}

#[test]
fn test_configuration_info_after_indexing() {
    let repo = repository();
    let detector = detector(repo.path());

    let info = detector.configuration_info();
    assert_eq!(info.indexed_functions, 4);
    assert_eq!(info.repository_path, repo.path());
    assert_eq!(info.thresholds.global_threshold, 0.6);
    assert_eq!(info.min_function_lines, 3);
}

#[test]
fn test_index_of_missing_root_fails() {
    let mut detector = DuplicateDetector::new(DetectionSettings::default()).unwrap();
    assert!(detector.index_repository("/no/such/repository").is_err());
}
