//! Configuration loader tests

use std::path::Path;

use dupguard_domain::{DetectionSettings, SimilarityMethod};
use dupguard_infrastructure::config::{ConfigBuilder, ConfigLoader, LoggingConfig};
use dupguard_infrastructure::constants::DEFAULT_LOG_LEVEL;
use tempfile::TempDir;

/// Loader isolated from the process environment
fn isolated_loader(path: &Path) -> ConfigLoader {
    ConfigLoader::new()
        .with_config_path(path)
        .with_env_prefix("DUPGUARD_UNIT_TEST_UNSET")
        .with_legacy_env(false)
}

#[test]
fn test_missing_file_gives_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = isolated_loader(&temp_dir.path().join("absent.toml"))
        .load()
        .unwrap();

    assert_eq!(config.detection, DetectionSettings::default());
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
}

#[test]
fn test_toml_file_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dupguard.toml");
    std::fs::write(
        &config_path,
        r#"
[detection]
global_threshold = 0.8
similarity_method = "sequence_matcher"
min_function_lines = 3

[detection.folder_thresholds]
"src/tests" = 0.1

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = isolated_loader(&config_path).load().unwrap();

    assert_eq!(config.detection.global_threshold, 0.8);
    assert_eq!(
        config.detection.similarity_method,
        SimilarityMethod::SequenceRatio
    );
    assert_eq!(config.detection.min_function_lines, 3);
    assert_eq!(config.detection.folder_thresholds["src/tests"], 0.1);
    assert_eq!(config.logging.level, "debug");
    // untouched keys keep their defaults
    assert_eq!(
        config.detection.include_patterns,
        DetectionSettings::default().include_patterns
    );
}

#[test]
fn test_invalid_values_fail_to_load() {
    let temp_dir = TempDir::new().unwrap();
    let cases = [
        "[detection]\nglobal_threshold = 1.5\n",
        "[detection.folder_thresholds]\nsrc = -0.1\n",
        "[detection]\nsimilarity_method = \"cosine\"\n",
        "[detection]\nmin_function_lines = 0\n",
        "[logging]\nlevel = \"chatty\"\n",
    ];

    for (i, content) in cases.iter().enumerate() {
        let path = temp_dir.path().join(format!("case_{i}.toml"));
        std::fs::write(&path, content).unwrap();

        let err = isolated_loader(&path).load().unwrap_err();
        assert!(err.is_configuration(), "case {i}: {err}");
    }
}

#[test]
fn test_config_save_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("saved.toml");

    let original = ConfigBuilder::new()
        .with_detection(
            DetectionSettings::default()
                .with_global_threshold(0.75)
                .with_folder_threshold("src/legacy", 0.95)
                .with_similarity_method(SimilarityMethod::NormalizedEditDistance)
                .with_max_workers(4),
        )
        .with_logging(LoggingConfig {
            level: "warn".into(),
            json_format: true,
            file_output: None,
        })
        .build();

    let loader = isolated_loader(&config_path);
    loader.save_to_file(&original, &config_path).unwrap();
    let loaded = loader.load().unwrap();

    assert_eq!(loaded, original);
}

#[test]
fn test_config_path_accessor() {
    assert!(ConfigLoader::new().config_path().is_none());
    let loader = ConfigLoader::new().with_config_path("custom.toml");
    assert_eq!(loader.config_path(), Some(Path::new("custom.toml")));
}

/// Prefixed environment variables override the file
///
/// Run with: `cargo test -p dupguard-infrastructure --test unit -- --ignored --test-threads=1`
#[test]
#[ignore = "mutates the process environment; run with --test-threads=1"]
fn test_prefixed_env_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("dupguard.toml");
    std::fs::write(&config_path, "[detection]\nglobal_threshold = 0.8\n").unwrap();

    // SAFETY: ignored by default; must run single-threaded
    unsafe {
        std::env::set_var("DUPGUARD_ENVTEST_DETECTION__GLOBAL_THRESHOLD", "0.65");
    }

    let config = ConfigLoader::new()
        .with_config_path(&config_path)
        .with_env_prefix("DUPGUARD_ENVTEST")
        .with_legacy_env(false)
        .load();

    // SAFETY: as above
    unsafe {
        std::env::remove_var("DUPGUARD_ENVTEST_DETECTION__GLOBAL_THRESHOLD");
    }

    assert_eq!(config.unwrap().detection.global_threshold, 0.65);
}
