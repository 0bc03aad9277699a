//! Return-Site Walker: classifies every `return` result of one function body.

use std::ops::ControlFlow;

use walkerr_core::errors::AnalysisError;
use walkerr_core::events::{CallTargetEvent, DirectErrorEvent, EventDispatcher, SymbolUnresolvedEvent};
use walkerr_core::types::collections::{FxHashSet, SmallVec4};

use crate::extract::ERROR_TYPE_NAME;
use crate::symbols::{QualifiedName, SymbolId, SymbolKind, SymbolResolver};
use crate::syntax::{Block, CallExpr, Expr, Ident, Stmt, TypeExpr};
use crate::types::{ErrorCapability, Type};
use crate::visit::{inspect_stmts, NodeRef, Walk};

/// An error value returned by identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRef {
    pub symbol: SymbolId,
    pub name: QualifiedName,
}

/// What the walker found in a function body.
#[derive(Debug, Clone, Default)]
pub struct ReturnSites {
    /// Deduplicated by symbol identity, in first-seen order.
    pub direct_errors: Vec<ErrorRef>,
    /// Callee identifiers of calls in return position, unresolved.
    pub calls: SmallVec4<Ident>,
}

pub struct ReturnSiteWalker<'a> {
    resolver: &'a dyn SymbolResolver,
    capability: &'a ErrorCapability,
    events: &'a EventDispatcher,
    max_depth: usize,
}

impl<'a> ReturnSiteWalker<'a> {
    pub fn new(
        resolver: &'a dyn SymbolResolver,
        capability: &'a ErrorCapability,
        events: &'a EventDispatcher,
        max_depth: usize,
    ) -> Self {
        Self {
            resolver,
            capability,
            events,
            max_depth,
        }
    }

    /// Walk `body`, descending through nested blocks but not into function
    /// literals. Each return statement is classified once and not entered.
    ///
    /// `results` are the function's declared result types. A variable of
    /// unknown type returned in an `error` slot is taken as an error value,
    /// since the unit only compiles if it implements `error`.
    pub fn walk(
        &self,
        function: &str,
        results: &[TypeExpr],
        body: &Block,
    ) -> Result<ReturnSites, AnalysisError> {
        let error_slots: SmallVec4<bool> = results
            .iter()
            .map(|result| result.as_name() == Some(ERROR_TYPE_NAME))
            .collect();
        let mut sites = ReturnSites::default();
        let mut seen = FxHashSet::default();

        let flow = inspect_stmts(&body.stmts, &mut |node, depth| {
            if depth > self.max_depth {
                return Walk::Stop;
            }
            match node {
                NodeRef::Expr(Expr::FuncLit(_)) => Walk::Skip,
                NodeRef::Stmt(Stmt::Return(ret)) => {
                    let aligned = ret.results.len() == error_slots.len();
                    for (slot, result) in ret.results.iter().enumerate() {
                        let in_error_slot = aligned && error_slots[slot];
                        self.classify(function, result, in_error_slot, &mut sites, &mut seen);
                    }
                    Walk::Skip
                }
                _ => Walk::Descend,
            }
        });

        match flow {
            ControlFlow::Break(()) => Err(AnalysisError::NestingTooDeep {
                function: function.to_string(),
                limit: self.max_depth,
            }),
            ControlFlow::Continue(()) => Ok(sites),
        }
    }

    fn classify(
        &self,
        function: &str,
        expr: &Expr,
        in_error_slot: bool,
        sites: &mut ReturnSites,
        seen: &mut FxHashSet<SymbolId>,
    ) {
        match expr {
            Expr::Ident(ident) => self.classify_ident(function, ident, in_error_slot, sites, seen),
            Expr::Call(call) => self.classify_call(function, call, sites),
            _ => {}
        }
    }

    fn classify_ident(
        &self,
        function: &str,
        ident: &Ident,
        in_error_slot: bool,
        sites: &mut ReturnSites,
        seen: &mut FxHashSet<SymbolId>,
    ) {
        let Some(symbol) = self.resolver.resolve(ident) else {
            self.events.emit_symbol_unresolved(&SymbolUnresolvedEvent {
                function: function.to_string(),
                name: ident.name.clone(),
                line: ident.span.start.line,
            });
            return;
        };
        let untyped_error = in_error_slot
            && symbol.kind == SymbolKind::Var
            && matches!(symbol.ty, Type::Unknown);
        let capable = untyped_error || self.capability.is_satisfied_by(&symbol.ty);
        if !capable || !seen.insert(symbol.id) {
            return;
        }

        let error = ErrorRef {
            symbol: symbol.id,
            name: symbol.qualified_name(),
        };
        self.events.emit_direct_error(&DirectErrorEvent {
            function: function.to_string(),
            error: error.name.to_string(),
            line: ident.span.start.line,
        });
        sites.direct_errors.push(error);
    }

    fn classify_call(&self, function: &str, call: &CallExpr, sites: &mut ReturnSites) {
        let Some(callee) = call.callee_ident() else {
            return;
        };
        // Conversions and predeclared builtins never return a tracked error.
        if let Some(symbol) = self.resolver.resolve(callee) {
            if symbol.is_type() || symbol.kind == SymbolKind::Builtin {
                return;
            }
        }
        self.events.emit_call_target(&CallTargetEvent {
            function: function.to_string(),
            callee: callee.name.clone(),
            line: callee.span.start.line,
        });
        sites.calls.push(callee.clone());
    }
}
