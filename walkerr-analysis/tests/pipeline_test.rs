//! Batch behaviour: ordering, failure isolation, file input, events.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{fixture_path, pipeline, read_fixture};
use walkerr_analysis::Pipeline;
use walkerr_core::config::{ConfigOverrides, UnresolvedCallPolicy, WalkerrConfig};
use walkerr_core::errors::{ParseError, PipelineError, WalkerrErrorCode};
use walkerr_core::events::{
    EventDispatcher, UnitCompleteEvent, UnitFailedEvent, WalkerrEventHandler,
};

const FIXTURES: &[&str] = &["d.go", "b.go", "e.go", "shadow.go", "conv.go", "lit.go", "svc.go", "hop.go", "flow.go", "rep.go", "imported.go", "forward.go"];

fn sources(names: &[&str]) -> Vec<(String, String)> {
    names
        .iter()
        .map(|name| (name.to_string(), read_fixture(name)))
        .collect()
}

#[derive(Default)]
struct Counter {
    complete: AtomicUsize,
    failed: AtomicUsize,
    diagnostics: AtomicUsize,
}

impl WalkerrEventHandler for Counter {
    fn on_unit_complete(&self, event: &UnitCompleteEvent) {
        self.complete.fetch_add(1, Ordering::SeqCst);
        self.diagnostics.fetch_add(event.diagnostics, Ordering::SeqCst);
    }

    fn on_unit_failed(&self, event: &UnitFailedEvent) {
        assert_eq!(event.error_code, "SYNTAX_ERROR");
        self.failed.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_parallel_output_matches_sequential_order() {
    let batch = sources(FIXTURES);
    let sequential = pipeline(UnresolvedCallPolicy::Skip).analyze_sources(&batch);
    let parallel = pipeline(UnresolvedCallPolicy::Skip)
        .with_parallel(true)
        .analyze_sources(&batch);

    assert!(sequential.is_clean());
    assert!(parallel.is_clean());
    assert_eq!(sequential.data, parallel.data);
    let units: Vec<_> = parallel.data.iter().map(|r| r.unit.as_str()).collect();
    assert_eq!(units, FIXTURES);
}

#[test]
fn test_batch_result_equals_units_alone() {
    let batch = sources(FIXTURES);
    let together = pipeline(UnresolvedCallPolicy::Report).analyze_sources(&batch);
    for (report, (name, source)) in together.data.iter().zip(&batch) {
        let alone = pipeline(UnresolvedCallPolicy::Report)
            .analyze_source(name, source.as_bytes())
            .unwrap();
        assert_eq!(report, &alone);
    }
}

#[test]
fn test_failing_unit_does_not_stop_batch() {
    let counter = Arc::new(Counter::default());
    let events = EventDispatcher::with_handler(counter.clone());
    let batch = sources(&["d.go", "bad.go", "hop.go"]);

    let result = pipeline(UnresolvedCallPolicy::Skip)
        .with_parallel(true)
        .with_events(events)
        .analyze_sources(&batch);

    assert_eq!(result.error_count(), 1);
    assert_eq!(result.errors[0].error_code(), "SYNTAX_ERROR");
    let units: Vec<_> = result.data.iter().map(|r| r.unit.as_str()).collect();
    assert_eq!(units, vec!["d.go", "hop.go"]);
    assert_eq!(counter.complete.load(Ordering::SeqCst), 2);
    assert_eq!(counter.failed.load(Ordering::SeqCst), 1);
    assert_eq!(counter.diagnostics.load(Ordering::SeqCst), 5);
}

#[test]
fn test_paths_are_read_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, "not go").unwrap();
    let missing = dir.path().join("missing.go");

    let paths = vec![fixture_path("d.go"), notes, missing.clone(), fixture_path("b.go")];
    let result = pipeline(UnresolvedCallPolicy::Skip).analyze_paths(&paths);

    assert_eq!(result.data.len(), 2);
    assert_eq!(result.error_count(), 1);
    match &result.errors[0] {
        PipelineError::Read { path, .. } => assert_eq!(path, &missing),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(result.errors[0].error_code(), "IO_ERROR");
}

#[test]
fn test_config_drives_policy_and_threads() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("walkerr.toml"),
        "[analysis]\nunresolved_calls = \"report\"\nthreads = 2\n",
    )
    .unwrap();
    let overrides = ConfigOverrides {
        parallel: Some(true),
        ..ConfigOverrides::default()
    };
    let config = WalkerrConfig::load(dir.path(), Some(&overrides)).unwrap();

    let pipeline = Pipeline::from_config(&config);
    let result = pipeline.analyze_sources(&sources(&["e.go", "d.go"]));
    assert!(result.is_clean());
    let messages: Vec<_> = result.data[0]
        .diagnostics
        .iter()
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(
        messages,
        vec!["return errors: e.AError", "return errors: e.AError, sube.AFunc"]
    );
}

#[test]
fn test_nesting_limit_fails_only_that_unit() {
    let mut deep = String::from("package deep\n\nfunc f() error {\n");
    for _ in 0..40 {
        deep.push_str("{\n");
    }
    deep.push_str("return nil\n");
    for _ in 0..40 {
        deep.push_str("}\n");
    }
    deep.push_str("}\n");

    let config = WalkerrConfig::from_toml("[analysis]\nmax_nesting_depth = 8\nparallel = false\n").unwrap();
    let batch = vec![
        ("deep.go".to_string(), deep),
        ("d.go".to_string(), read_fixture("d.go")),
    ];
    let result = Pipeline::from_config(&config).analyze_sources(&batch);

    assert_eq!(result.error_count(), 1);
    assert_eq!(result.errors[0].error_code(), "NESTING_LIMIT");
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.data[0].unit, "d.go");
}

#[test]
fn test_deep_expression_fails_only_that_unit() {
    let depth = 4000;
    let deep = format!(
        "package deep\n\nfunc f() error {{\n\tx := {}1{}\n\t_ = x\n\treturn nil\n}}\n",
        "(".repeat(depth),
        ")".repeat(depth)
    );
    let batch = vec![
        ("deep.go".to_string(), deep.clone()),
        ("d.go".to_string(), read_fixture("d.go")),
        ("deep2.go".to_string(), deep),
    ];

    let result = pipeline(UnresolvedCallPolicy::Skip)
        .with_parallel(true)
        .analyze_sources(&batch);

    assert_eq!(result.error_count(), 2);
    for error in &result.errors {
        assert!(matches!(error, PipelineError::Parse(ParseError::TreeTooDeep { .. })));
        assert_eq!(error.error_code(), "NESTING_LIMIT");
    }
    let units: Vec<_> = result.data.iter().map(|r| r.unit.as_str()).collect();
    assert_eq!(units, vec!["d.go"]);
}
