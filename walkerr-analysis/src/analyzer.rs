//! ErrorFlowAnalyzer: the per-unit two-phase driver.
//!
//! Phase 1 builds the complete Summary Table for a unit; phase 2 resolves
//! joins against that finished table and renders diagnostics. Nothing is
//! shared between units.

use std::time::Instant;

use walkerr_core::config::{AnalysisConfig, UnresolvedCallPolicy};
use walkerr_core::config::analysis_config::DEFAULT_MAX_NESTING_DEPTH;
use walkerr_core::errors::AnalysisError;
use walkerr_core::events::{EventDispatcher, FunctionSelectedEvent, UnitCompleteEvent, UnitStartedEvent};

use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::extract::eligible_functions;
use crate::join::Joiner;
use crate::summary::{FunctionSummary, SummaryTable};
use crate::symbols::SymbolResolver;
use crate::syntax::CompilationUnit;
use crate::types::ErrorCapability;
use crate::walker::{ReturnSiteWalker, ReturnSites};

/// Engine knobs, usually derived from [`AnalysisConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerOptions {
    pub unresolved_calls: UnresolvedCallPolicy,
    pub max_nesting_depth: usize,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            unresolved_calls: UnresolvedCallPolicy::default(),
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl From<&AnalysisConfig> for AnalyzerOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            unresolved_calls: config.effective_unresolved_calls(),
            max_nesting_depth: config.effective_max_nesting_depth(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ErrorFlowAnalyzer {
    capability: ErrorCapability,
    options: AnalyzerOptions,
    events: EventDispatcher,
}

impl ErrorFlowAnalyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Self {
            capability: ErrorCapability::new(),
            options,
            events: EventDispatcher::new(),
        }
    }

    /// Attach the dispatcher that receives progress events.
    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    /// Phase 1: summarize every eligible function of `unit`.
    ///
    /// Functions whose own name does not resolve are left out.
    pub fn summarize(
        &self,
        unit: &CompilationUnit,
        resolver: &dyn SymbolResolver,
    ) -> Result<SummaryTable, AnalysisError> {
        if unit.package.is_empty() {
            return Err(AnalysisError::MalformedUnit {
                unit: unit.path.clone(),
                message: "unit has no package name".to_string(),
            });
        }

        let walker = ReturnSiteWalker::new(
            resolver,
            &self.capability,
            &self.events,
            self.options.max_nesting_depth,
        );
        let mut table = SummaryTable::new(&unit.path);

        for func in eligible_functions(unit) {
            let Some(symbol) = resolver.resolve(&func.name) else {
                continue;
            };
            let name = symbol.qualified_name();
            self.events.emit_function_selected(&FunctionSelectedEvent {
                unit: unit.path.clone(),
                function: name.to_string(),
                line: func.span.start.line,
            });

            let sites = match &func.body {
                Some(body) => walker.walk(name.as_str(), &func.results, body)?,
                None => ReturnSites::default(),
            };
            table.insert(FunctionSummary::new(name, func.span.start, sites));
        }

        Ok(table)
    }

    /// Phase 2: join and render one diagnostic per summary, in source order.
    pub fn render(&self, table: &SummaryTable, resolver: &dyn SymbolResolver) -> Vec<Diagnostic> {
        let joiner = Joiner::new(table, resolver, self.options.unresolved_calls, &self.events);
        table
            .in_source_order()
            .into_iter()
            .map(|summary| Diagnostic {
                file: table.unit().to_string(),
                position: summary.position,
                function: summary.name.to_string(),
                message: joiner.render(summary),
            })
            .collect()
    }

    /// Run both phases for one unit and report its diagnostics to `sink`.
    /// Returns the number of diagnostics reported.
    pub fn analyze_unit(
        &self,
        unit: &CompilationUnit,
        resolver: &dyn SymbolResolver,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<usize, AnalysisError> {
        let start = Instant::now();
        self.events.emit_unit_started(&UnitStartedEvent {
            unit: unit.path.clone(),
        });

        let table = self.summarize(unit, resolver)?;
        let diagnostics = self.render(&table, resolver);
        let count = diagnostics.len();
        for diagnostic in diagnostics {
            sink.report(diagnostic);
        }

        self.events.emit_unit_complete(&UnitCompleteEvent {
            unit: unit.path.clone(),
            summaries: table.len(),
            diagnostics: count,
            duration_us: start.elapsed().as_micros() as u64,
        });
        Ok(count)
    }
}
