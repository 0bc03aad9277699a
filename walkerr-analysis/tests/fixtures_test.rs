//! End-to-end checks of the Go fixtures against their `// want` comments.

mod common;

use common::{check_fixture, pipeline, read_fixture};
use walkerr_analysis::analyzer::ErrorFlowAnalyzer;
use walkerr_analysis::frontend::Frontend;
use walkerr_analysis::symbols::QualifiedName;
use walkerr_analysis::GoFrontend;
use walkerr_core::config::UnresolvedCallPolicy::{Report, Skip};
use walkerr_core::errors::{ParseError, PipelineError, WalkerrErrorCode};

#[test]
fn test_direct_and_joined_errors() {
    check_fixture("d.go", Skip);
}

#[test]
fn test_tuple_results_and_non_error_functions() {
    check_fixture("b.go", Skip);
}

#[test]
fn test_imported_callee_dropped_by_default() {
    check_fixture("e.go", Skip);
}

#[test]
fn test_imported_callee_reported_by_qualified_name() {
    check_fixture("e.go", Report);
}

#[test]
fn test_shadowed_and_named_results() {
    check_fixture("shadow.go", Skip);
}

#[test]
fn test_conversions_builtins_and_method_sets() {
    check_fixture("conv.go", Skip);
}

#[test]
fn test_function_literals_not_entered() {
    check_fixture("lit.go", Skip);
}

#[test]
fn test_method_calls_join_within_unit() {
    check_fixture("svc.go", Skip);
}

#[test]
fn test_join_is_one_hop() {
    check_fixture("hop.go", Skip);
}

#[test]
fn test_nested_control_flow_is_searched() {
    check_fixture("flow.go", Skip);
}

#[test]
fn test_unresolved_calls_skipped() {
    check_fixture("rep.go", Skip);
}

#[test]
fn test_unresolved_calls_reported() {
    check_fixture("rep.go", Report);
}

#[test]
fn test_untyped_errors_from_imported_calls() {
    check_fixture("imported.go", Skip);
}

#[test]
fn test_untyped_errors_with_unresolved_calls_reported() {
    check_fixture("imported.go", Report);
}

#[test]
fn test_package_initializers_may_refer_forward() {
    check_fixture("forward.go", Skip);
    check_fixture("forward.go", Report);
}

#[test]
fn test_shadowed_errors_are_distinct_symbols() {
    let source = read_fixture("shadow.go");
    let parsed = GoFrontend::default()
        .parse_unit("shadow.go", source.as_bytes())
        .unwrap();
    let table = ErrorFlowAnalyzer::default()
        .summarize(&parsed.unit, &parsed.symbols)
        .unwrap();

    let summary = table.get(&QualifiedName::new(Some("shadow"), "twoErrs")).unwrap();
    assert_eq!(summary.direct_errors.len(), 2);
    assert_ne!(summary.direct_errors[0].symbol, summary.direct_errors[1].symbol);
    assert_eq!(summary.direct_errors[0].name, summary.direct_errors[1].name);
}

#[test]
fn test_diagnostics_anchor_at_func_keyword() {
    let source = read_fixture("d.go");
    let report = pipeline(Skip).analyze_source("d.go", source.as_bytes()).unwrap();
    assert_eq!(report.diagnostics.len(), 2);
    for diagnostic in &report.diagnostics {
        assert_eq!(diagnostic.position.column, 1);
        assert_eq!(diagnostic.file, "d.go");
    }
    assert_eq!(report.diagnostics[0].function, "d.afunc");
    assert_eq!(report.diagnostics[1].function, "d.bfunc");
    assert_eq!(
        report.diagnostics[1].to_string(),
        format!("d.go:{}:1: return errors: d.AError, d.BError", report.diagnostics[1].position.line)
    );
}

#[test]
fn test_syntax_errors_fail_the_unit() {
    let source = read_fixture("bad.go");
    let err = pipeline(Skip).analyze_source("bad.go", source.as_bytes()).unwrap_err();
    assert!(matches!(err, PipelineError::Parse(ParseError::SyntaxErrors { .. })));
    assert_eq!(err.error_code(), "SYNTAX_ERROR");
}

#[test]
fn test_reanalysis_is_idempotent() {
    let source = read_fixture("flow.go");
    let pipeline = pipeline(Report);
    let first = pipeline.analyze_source("flow.go", source.as_bytes()).unwrap();
    let second = pipeline.analyze_source("flow.go", source.as_bytes()).unwrap();
    assert_eq!(first, second);
}
