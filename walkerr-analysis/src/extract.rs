//! Function Extractor: selects the declarations worth summarizing.

use crate::syntax::{CompilationUnit, FuncDecl};

/// Spelling of the predeclared error interface type.
pub const ERROR_TYPE_NAME: &str = "error";

/// A function is eligible iff one of its declared results is written as the
/// bare `error` type name.
///
/// The check is on the declared spelling, not on capability: a result typed
/// as a concrete error implementation (`*MyErr`) does not qualify.
pub fn is_eligible(func: &FuncDecl) -> bool {
    func.results
        .iter()
        .any(|result| result.as_name() == Some(ERROR_TYPE_NAME))
}

/// Eligible functions and methods of `unit`, in declaration order.
pub fn eligible_functions(unit: &CompilationUnit) -> impl Iterator<Item = &FuncDecl> {
    unit.functions().filter(|func| is_eligible(func))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::*;

    fn ident(id: u32, name: &str) -> Ident {
        Ident { id: NodeId(id), name: name.to_string(), span: Span::default() }
    }

    fn func(name: &str, results: Vec<TypeExpr>) -> FuncDecl {
        FuncDecl { name: ident(0, name), receiver: None, results, body: None, span: Span::default() }
    }

    #[test]
    fn test_error_result_selected() {
        let f = func("f", vec![TypeExpr::Name(ident(1, "int")), TypeExpr::Name(ident(2, "error"))]);
        assert!(is_eligible(&f));
    }

    #[test]
    fn test_no_results_not_selected() {
        assert!(!is_eligible(&func("f", vec![])));
    }

    #[test]
    fn test_concrete_error_type_not_selected() {
        let ptr = TypeExpr::Pointer(Box::new(TypeExpr::Name(ident(1, "MyErr"))));
        assert!(!is_eligible(&func("f", vec![ptr])));
    }

    #[test]
    fn test_qualified_error_not_selected() {
        let q = TypeExpr::Qualified { package: "errs".into(), name: "error".into() };
        assert!(!is_eligible(&func("f", vec![q])));
    }

    #[test]
    fn test_eligible_functions_skips_other_decls() {
        let unit = CompilationUnit {
            path: "a.go".into(),
            package: "a".into(),
            decls: vec![
                Decl::Other(Span::default()),
                Decl::Func(func("ok", vec![TypeExpr::Name(ident(1, "error"))])),
                Decl::Func(func("plain", vec![TypeExpr::Name(ident(2, "int"))])),
            ],
        };
        let names: Vec<_> = eligible_functions(&unit).map(|f| f.name.name.as_str()).collect();
        assert_eq!(names, vec!["ok"]);
    }
}
