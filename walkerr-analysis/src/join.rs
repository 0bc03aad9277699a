//! Join & Render: one-hop propagation of callee errors and message rendering.
//!
//! The join reads each callee's *direct* errors only, never a previously
//! joined set, so propagation stops after one call hop: if `a` calls `b`
//! calls `c`, `a` sees `b`'s direct errors but not `c`'s.

use std::collections::BTreeSet;

use walkerr_core::config::UnresolvedCallPolicy;
use walkerr_core::events::{CallJoinedEvent, CallUnresolvedEvent, EventDispatcher};

use crate::summary::{FunctionSummary, SummaryTable};
use crate::symbols::SymbolResolver;

/// Fixed lead-in of every diagnostic message.
pub const MESSAGE_PREFIX: &str = "return errors: ";

pub struct Joiner<'a> {
    table: &'a SummaryTable,
    resolver: &'a dyn SymbolResolver,
    policy: UnresolvedCallPolicy,
    events: &'a EventDispatcher,
}

impl<'a> Joiner<'a> {
    pub fn new(
        table: &'a SummaryTable,
        resolver: &'a dyn SymbolResolver,
        policy: UnresolvedCallPolicy,
        events: &'a EventDispatcher,
    ) -> Self {
        Self {
            table,
            resolver,
            policy,
            events,
        }
    }

    /// The sorted, deduplicated qualified names `summary` may return.
    pub fn join(&self, summary: &FunctionSummary) -> Vec<String> {
        let mut names = BTreeSet::new();
        let function = summary.name.as_str();

        for callee in &summary.calls {
            let Some(symbol) = self.resolver.resolve(callee) else {
                self.unresolved(function, callee.name.clone(), &mut names);
                continue;
            };
            let callee_name = symbol.qualified_name();
            match self.table.get(&callee_name) {
                Some(callee_summary) => {
                    self.events.emit_call_joined(&CallJoinedEvent {
                        function: function.to_string(),
                        callee: callee_name.to_string(),
                        errors: callee_summary.direct_errors.len(),
                    });
                    for error in &callee_summary.direct_errors {
                        names.insert(error.name.to_string());
                    }
                }
                None => self.unresolved(function, callee_name.into_string(), &mut names),
            }
        }

        for error in &summary.direct_errors {
            names.insert(error.name.to_string());
        }

        names.into_iter().collect()
    }

    /// The diagnostic text for `summary`.
    pub fn render(&self, summary: &FunctionSummary) -> String {
        render_message(&self.join(summary))
    }

    // Unresolved callees are labelled by their bare name, resolved callees
    // outside the table by their qualified name.
    fn unresolved(&self, function: &str, label: String, names: &mut BTreeSet<String>) {
        let reported = self.policy == UnresolvedCallPolicy::Report;
        self.events.emit_call_unresolved(&CallUnresolvedEvent {
            function: function.to_string(),
            callee: label.clone(),
            reported,
        });
        if reported {
            names.insert(label);
        }
    }
}

/// `"return errors: "` followed by the names joined with `", "`. An empty
/// list still renders the prefix.
pub fn render_message<S: AsRef<str>>(names: &[S]) -> String {
    let mut message = String::from(MESSAGE_PREFIX);
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            message.push_str(", ");
        }
        message.push_str(name.as_ref());
    }
    message
}
