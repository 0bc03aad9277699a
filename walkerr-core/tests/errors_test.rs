//! Tests for error types, codes and the pipeline result collector.

use std::path::PathBuf;

use walkerr_core::errors::{
    AnalysisError, ConfigError, ParseError, PipelineError, PipelineResult, WalkerrErrorCode,
};

#[test]
fn test_error_codes_are_stable() {
    let syntax = ParseError::SyntaxErrors {
        path: PathBuf::from("a.go"),
        count: 2,
        line: 3,
        column: 7,
    };
    assert_eq!(syntax.error_code(), "SYNTAX_ERROR");
    assert_eq!(
        ParseError::MissingPackageClause { path: PathBuf::from("a.go") }.error_code(),
        "PARSE_ERROR"
    );
    assert_eq!(
        AnalysisError::NestingTooDeep { function: "p.f".into(), limit: 8 }.error_code(),
        "NESTING_LIMIT"
    );
    assert_eq!(
        ParseError::TreeTooDeep { path: PathBuf::from("a.go"), line: 4, column: 600, limit: 512 }.error_code(),
        "NESTING_LIMIT"
    );
    assert_eq!(
        ConfigError::FileNotFound { path: "walkerr.toml".into() }.error_code(),
        "CONFIG_ERROR"
    );
}

#[test]
fn test_display_carries_location() {
    let syntax = ParseError::SyntaxErrors {
        path: PathBuf::from("a.go"),
        count: 2,
        line: 3,
        column: 7,
    };
    assert_eq!(syntax.to_string(), "a.go:3:7: 2 syntax error(s)");
}

#[test]
fn test_pipeline_error_wraps_subsystems() {
    let err: PipelineError = AnalysisError::MalformedUnit {
        unit: "x.go".into(),
        message: "unit has no package name".into(),
    }
    .into();
    assert!(matches!(err, PipelineError::Analysis(_)));
    assert_eq!(err.error_code(), "ANALYSIS_ERROR");

    let err: PipelineError = ParseError::GrammarLoad { message: "abi".into() }.into();
    assert_eq!(err.error_code(), "PARSE_ERROR");

    let read = PipelineError::Read {
        path: PathBuf::from("missing.go"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    assert_eq!(read.error_code(), "IO_ERROR");
    assert!(std::error::Error::source(&read).is_some());
}

#[test]
fn test_coded_string_prefixes_code() {
    let err = ConfigError::InvalidValue {
        field: "WALKERR_UNRESOLVED_CALLS".into(),
        message: "expected skip or report".into(),
    };
    let coded = err.coded_string();
    assert!(coded.starts_with("[CONFIG_ERROR]"));
    assert!(coded.contains("WALKERR_UNRESOLVED_CALLS"));
}

#[test]
fn test_pipeline_result_collects_errors() {
    let mut result: PipelineResult<Vec<u32>> = PipelineResult::new(vec![1]);
    assert!(result.is_clean());

    result.data.push(2);
    result.add_error(PipelineError::ThreadPool("no threads".into()));

    assert!(!result.is_clean());
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.data, vec![1, 2]);
}
