//! Extraction through the `FunctionSource` port

use dupguard_domain::constants::{DEFAULT_EXCLUDE_PATTERNS, DEFAULT_INCLUDE_PATTERNS};
use dupguard_engine::{FunctionSource, PythonFunctionExtractor, RepositoryScanner};

#[test]
fn test_scan_keeps_unit_for_unparsable_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("good.py"), "def ok():\n    return 1\n").unwrap();
    std::fs::write(dir.path().join("bad.py"), "def nope(:\n").unwrap();

    let scanner =
        RepositoryScanner::new(dir.path(), DEFAULT_INCLUDE_PATTERNS, DEFAULT_EXCLUDE_PATTERNS)
            .unwrap();
    let units = scanner.scan(&PythonFunctionExtractor::new()).unwrap();

    assert_eq!(units.len(), 2);
    assert_eq!(units[0].file_path, "bad.py");
    assert!(units[0].records.is_empty());
    assert_eq!(units[1].file_path, "good.py");
    assert_eq!(units[1].records.len(), 1);
}

#[test]
fn test_deeply_nested_functions_are_found() {
    let mut source = String::new();
    for depth in 0..10 {
        source.push_str(&"    ".repeat(depth));
        source.push_str(&format!("def level_{depth}():\n"));
    }
    source.push_str(&"    ".repeat(10));
    source.push_str("return 0\n");

    let records = PythonFunctionExtractor::new()
        .extract_from_content(&source, "nested.py")
        .unwrap();

    assert_eq!(records.len(), 10);
    assert_eq!(records[9].name(), "level_9");
    assert_eq!(records[9].line_start(), 10);
    assert_eq!(records[0].line_end(), 11);
}

#[test]
fn test_deep_expression_does_not_hide_shallow_functions() {
    let sum = vec!["1"; 300].join(" + ");
    let source = format!(
        "def before(a):\n    return a\n\nTOTAL = {sum}\n\ndef after(b):\n    return b\n"
    );

    let records = PythonFunctionExtractor::new()
        .extract_from_content(&source, "deep.py")
        .unwrap();

    let names: Vec<&str> = records.iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["before", "after"]);
}

#[test]
fn test_non_utf8_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.py");
    std::fs::write(&path, b"def caf\xe9():\n    pass\n").unwrap();

    assert!(
        PythonFunctionExtractor::new()
            .extract_from_file(&path, "latin1.py")
            .is_err()
    );
}
