//! Property tests over generated Go units.

mod common;

use std::collections::BTreeSet;
use std::fmt::Write;

use common::pipeline;
use proptest::collection::vec;
use proptest::prelude::*;
use walkerr_analysis::join::render_message;
use walkerr_core::config::UnresolvedCallPolicy;

const ERRORS: usize = 6;

fn branches(out: &mut String, returns: &[usize]) {
    for (case, err) in returns.iter().enumerate() {
        writeln!(out, "\tif n == {case} {{\n\t\treturn E{err}\n\t}}").unwrap();
    }
}

/// `f` returns `direct` errors and, when `via` is non-empty, the result of
/// calling `g`, which returns the `via` errors.
fn unit_source(direct: &[usize], via: &[usize], g_first: bool) -> String {
    let mut header = String::from("package p\n\nimport \"errors\"\n\n");
    for i in 0..ERRORS {
        writeln!(header, "var E{i} = errors.New(\"{i}\")").unwrap();
    }

    let mut g = String::from("\nfunc g(n int) error {\n");
    branches(&mut g, via);
    g.push_str("\treturn nil\n}\n");

    let mut f = String::from("\nfunc f(n int) error {\n");
    branches(&mut f, direct);
    if via.is_empty() {
        f.push_str("\treturn nil\n}\n");
    } else {
        f.push_str("\treturn g(n)\n}\n");
    }

    if g_first {
        header + &g + &f
    } else {
        header + &f + &g
    }
}

fn message_for(source: &str, function: &str) -> String {
    let report = pipeline(UnresolvedCallPolicy::Skip)
        .analyze_source("p.go", source.as_bytes())
        .unwrap();
    report
        .diagnostics
        .iter()
        .find(|d| d.function == function)
        .map(|d| d.message.clone())
        .unwrap()
}

proptest! {
    #[test]
    fn test_message_is_sorted_union_of_direct_and_callee_errors(
        direct in vec(0..ERRORS, 0..8),
        via in vec(0..ERRORS, 0..5),
        g_first in any::<bool>(),
    ) {
        let source = unit_source(&direct, &via, g_first);
        let expected: BTreeSet<String> = direct
            .iter()
            .chain(via.iter())
            .map(|i| format!("p.E{i}"))
            .collect();
        let expected: Vec<String> = expected.into_iter().collect();

        prop_assert_eq!(message_for(&source, "p.f"), render_message(&expected));
    }

    #[test]
    fn test_analysis_is_idempotent(
        direct in vec(0..ERRORS, 0..6),
        via in vec(0..ERRORS, 0..4),
    ) {
        let source = unit_source(&direct, &via, false);
        let pipeline = pipeline(UnresolvedCallPolicy::Report);
        let first = pipeline.analyze_source("p.go", source.as_bytes()).unwrap();
        let second = pipeline.analyze_source("p.go", source.as_bytes()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_rendered_names_strictly_ascend(names in vec("[a-z]{1,3}\\.[A-Z][a-z]{0,3}", 0..10)) {
        let set: BTreeSet<String> = names.into_iter().collect();
        let sorted: Vec<String> = set.into_iter().collect();
        let message = render_message(&sorted);
        let body = message.strip_prefix("return errors: ").unwrap();
        let parts: Vec<&str> = if body.is_empty() { Vec::new() } else { body.split(", ").collect() };
        prop_assert_eq!(parts.len(), sorted.len());
        prop_assert!(parts.windows(2).all(|w| w[0] < w[1]));
    }
}
