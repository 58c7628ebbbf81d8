//! Threshold resolution through the public API

use dupguard_engine::{
    DetectionSettings, FunctionIndex, FunctionRecord, MatchOrchestrator, SimilarityEngine,
    ThresholdResolver,
};

fn function(name: &str, path: &str, body: &str) -> FunctionRecord {
    FunctionRecord::new(name, path, 1, 5, format!("def {name}()"), body).unwrap()
}

fn resolver() -> ThresholdResolver {
    ThresholdResolver::from_settings(
        &DetectionSettings::default()
            .with_global_threshold(0.8)
            .with_folder_threshold("src/tests", 0.1),
    )
    .unwrap()
}

#[test]
fn test_global_default_without_matching_prefix() {
    assert_eq!(resolver().threshold_for("lib/app.py"), 0.8);
}

#[test]
fn test_overlapping_prefixes_longest_wins() {
    let r = ThresholdResolver::new(0.7, [("src/shared", 0.1), ("src/shared/utils", 0.3)]).unwrap();
    assert_eq!(r.threshold_for("src/shared/utils/text.py"), 0.3);
}

#[test]
fn test_half_similar_pair_reported_only_under_relaxed_folder() {
    // {a, +, b} vs {a, +, c} scores 0.5
    let orchestrator = MatchOrchestrator::new(SimilarityEngine::default(), resolver());

    let inside = FunctionIndex::from_records(vec![function("old", "src/tests/old.py", "a + b")]);
    let matches = orchestrator.find_matches(&inside, &[function("new", "src/tests/new.py", "a + c")]);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].similarity_score(), 0.5);

    let outside = FunctionIndex::from_records(vec![function("old", "src/app/old.py", "a + b")]);
    let matches = orchestrator.find_matches(&outside, &[function("new", "src/app/new.py", "a + c")]);
    assert!(matches.is_empty());
}
