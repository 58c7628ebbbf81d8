//! Default `FunctionSource::extract_from_file` behaviour

use std::path::Path;

use dupguard_domain::{Error, FunctionRecord, FunctionSource, Result};

/// One record per non-empty line, named after the line
struct LineSource;

impl FunctionSource for LineSource {
    fn language(&self) -> &'static str {
        "lines"
    }

    fn supports(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "txt")
    }

    fn extract_from_content(&self, content: &str, file_path: &str) -> Result<Vec<FunctionRecord>> {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| FunctionRecord::new(line.trim(), file_path, i + 1, i + 1, "", line))
            .collect()
    }
}

#[test]
fn test_extract_from_file_reads_and_labels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("funcs.txt");
    std::fs::write(&path, "alpha\n\nbeta\n").unwrap();

    let records = LineSource.extract_from_file(&path, "lib/funcs.txt").unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name(), "alpha");
    assert_eq!(records[1].line_start(), 3);
    assert!(records.iter().all(|r| r.file_path() == "lib/funcs.txt"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = LineSource
        .extract_from_file(Path::new("/no/such/file.txt"), "file.txt")
        .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_non_utf8_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.txt");
    std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let err = LineSource.extract_from_file(&path, "binary.txt").unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
