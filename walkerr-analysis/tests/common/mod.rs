//! Shared helpers: fixture loading and `// want` expectations.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::PathBuf;

use walkerr_analysis::analyzer::{AnalyzerOptions, ErrorFlowAnalyzer};
use walkerr_analysis::{GoFrontend, Pipeline, UnitReport};
use walkerr_core::config::UnresolvedCallPolicy;

pub fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("test-fixtures")
        .join("go")
}

pub fn fixture_path(name: &str) -> PathBuf {
    fixture_dir().join(name)
}

pub fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap()
}

pub fn pipeline(policy: UnresolvedCallPolicy) -> Pipeline {
    let options = AnalyzerOptions {
        unresolved_calls: policy,
        ..AnalyzerOptions::default()
    };
    Pipeline::new(GoFrontend::default(), ErrorFlowAnalyzer::new(options)).with_parallel(false)
}

/// Expected message per line. A line may carry `// want "msg"` and,
/// for the reporting policy, `report "msg"`; `report` falls back to `want`.
pub fn expectations(source: &str, policy: UnresolvedCallPolicy) -> BTreeMap<u32, String> {
    let mut expected = BTreeMap::new();
    for (index, line) in source.lines().enumerate() {
        let Some(want) = quoted_after(line, "// want \"") else {
            continue;
        };
        let message = match policy {
            UnresolvedCallPolicy::Report => quoted_after(line, " report \"").unwrap_or(want),
            UnresolvedCallPolicy::Skip => want,
        };
        expected.insert(index as u32 + 1, message.to_string());
    }
    expected
}

fn quoted_after<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let start = line.find(marker)? + marker.len();
    let len = line[start..].find('"')?;
    Some(&line[start..start + len])
}

pub fn by_line(report: &UnitReport) -> BTreeMap<u32, String> {
    report
        .diagnostics
        .iter()
        .map(|d| (d.position.line, d.message.clone()))
        .collect()
}

/// Analyze fixture `name` and compare every diagnostic against its `want`.
pub fn check_fixture(name: &str, policy: UnresolvedCallPolicy) {
    let source = read_fixture(name);
    let report = pipeline(policy)
        .analyze_source(name, source.as_bytes())
        .unwrap_or_else(|e| panic!("{name}: {e}"));
    assert_eq!(by_line(&report), expectations(&source, policy), "fixture {name}");
}
