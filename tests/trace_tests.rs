use sakura_functests::trace::logger::TraceLogger;
use sakura_functests::trace::trace::{StepOutcome, TraceEvent};

#[test]
fn logger_appends_one_json_line_per_event() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.jsonl");
    let path_str = path.to_str().unwrap();

    let logger = TraceLogger::new(path_str);
    assert!(logger.is_enabled());
    logger.log(
        &TraceEvent::now("show_about_dialog", 0, "focus tray icon")
            .with_outcome(StepOutcome::Passed)
            .with_duration(42),
    );
    drop(logger);

    // Reopening appends instead of truncating
    TraceLogger::new(path_str).log(
        &TraceEvent::now("show_about_dialog", 3, "wait for dialog titled 'バージョン情報'")
            .with_outcome(StepOutcome::Failed)
            .with_detail("Timed out"),
    );

    let content = std::fs::read_to_string(&path).unwrap();
    let events: Vec<serde_json::Value> = content
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["step"], 0);
    assert_eq!(events[0]["outcome"], "passed");
    assert_eq!(events[0]["duration_ms"], 42);
    assert!(events[0]["detail"].is_null());
    assert_eq!(events[1]["outcome"], "failed");
    assert_eq!(events[1]["detail"], "Timed out");
}

#[test]
fn disabled_logger_writes_nothing() {
    let logger = TraceLogger::disabled();
    assert!(!logger.is_enabled());
    logger.log(&TraceEvent::now("s", 0, "noop"));
}

#[test]
fn unopenable_path_disables_logger() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("trace.jsonl");

    let logger = TraceLogger::new(path.to_str().unwrap());

    assert!(!logger.is_enabled());
}

#[test]
fn outcome_display_matches_serialized_form() {
    for outcome in [StepOutcome::Passed, StepOutcome::Failed, StepOutcome::Error] {
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(json, outcome.to_string());
    }
}
