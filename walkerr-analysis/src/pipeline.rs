//! Batch driver: parse and analyze many units, each independently.
//!
//! A unit that fails to read, parse or analyze is recorded as a non-fatal
//! error and the rest of the batch still runs. Reports come back in input
//! order whether or not the batch ran in parallel.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use walkerr_core::config::WalkerrConfig;
use walkerr_core::errors::{PipelineError, PipelineResult, WalkerrErrorCode};
use walkerr_core::events::{EventDispatcher, UnitFailedEvent};

use crate::analyzer::{AnalyzerOptions, ErrorFlowAnalyzer};
use crate::diagnostic::Diagnostic;
use crate::frontend::Frontend;
use crate::go::GoFrontend;

/// Diagnostics of one successfully analyzed unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitReport {
    pub unit: String,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Pipeline<F: Frontend = GoFrontend> {
    frontend: F,
    analyzer: ErrorFlowAnalyzer,
    parallel: bool,
    threads: Option<usize>,
}

impl Pipeline<GoFrontend> {
    /// A Go pipeline configured from `config`.
    pub fn from_config(config: &WalkerrConfig) -> Self {
        let analyzer = ErrorFlowAnalyzer::new(AnalyzerOptions::from(&config.analysis));
        let mut pipeline = Self::new(GoFrontend::new(&config.frontend), analyzer);
        pipeline.parallel = config.analysis.effective_parallel();
        pipeline.threads = config.analysis.threads;
        pipeline
    }
}

impl<F: Frontend> Pipeline<F> {
    pub fn new(frontend: F, analyzer: ErrorFlowAnalyzer) -> Self {
        Self {
            frontend,
            analyzer,
            parallel: true,
            threads: None,
        }
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.analyzer = self.analyzer.with_events(events);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn analyzer(&self) -> &ErrorFlowAnalyzer {
        &self.analyzer
    }

    /// Parse and analyze one in-memory source file.
    pub fn analyze_source(&self, path: &str, source: &[u8]) -> Result<UnitReport, PipelineError> {
        let outcome = self.run_unit(path, source);
        if let Err(error) = &outcome {
            self.report_failure(path, error);
        }
        outcome
    }

    /// Analyze `(path, source)` pairs.
    pub fn analyze_sources<S>(&self, sources: &[(String, S)]) -> PipelineResult<Vec<UnitReport>>
    where
        S: AsRef<[u8]> + Sync,
    {
        self.run_batch(sources, |(path, source)| {
            self.analyze_source(path, source.as_ref())
        })
    }

    /// Read and analyze files from disk. Paths the frontend does not accept
    /// are skipped.
    pub fn analyze_paths(&self, paths: &[PathBuf]) -> PipelineResult<Vec<UnitReport>> {
        let accepted: Vec<&PathBuf> = paths
            .iter()
            .filter(|path| self.frontend.accepts(&path.to_string_lossy()))
            .collect();
        self.run_batch(&accepted, |path| self.analyze_file(path))
    }

    fn analyze_file(&self, path: &Path) -> Result<UnitReport, PipelineError> {
        let label = path.to_string_lossy();
        let source = std::fs::read(path).map_err(|source| PipelineError::Read {
            path: path.to_path_buf(),
            source,
        });
        match source {
            Ok(source) => self.analyze_source(&label, &source),
            Err(error) => {
                self.report_failure(&label, &error);
                Err(error)
            }
        }
    }

    fn run_unit(&self, path: &str, source: &[u8]) -> Result<UnitReport, PipelineError> {
        let parsed = self.frontend.parse_unit(path, source)?;
        let mut diagnostics = Vec::new();
        self.analyzer
            .analyze_unit(&parsed.unit, &parsed.symbols, &mut diagnostics)?;
        Ok(UnitReport {
            unit: parsed.unit.path,
            diagnostics,
        })
    }

    fn report_failure(&self, path: &str, error: &PipelineError) {
        self.analyzer.events().emit_unit_failed(&UnitFailedEvent {
            unit: path.to_string(),
            error_code: error.error_code().to_string(),
            message: error.to_string(),
        });
    }

    fn run_batch<T, G>(&self, items: &[T], analyze: G) -> PipelineResult<Vec<UnitReport>>
    where
        T: Sync,
        G: Fn(&T) -> Result<UnitReport, PipelineError> + Sync + Send,
    {
        let mut result = PipelineResult::new(Vec::with_capacity(items.len()));

        let outcomes: Vec<Result<UnitReport, PipelineError>> = if self.parallel && items.len() > 1 {
            match self.threads {
                Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                    Ok(pool) => pool.install(|| items.par_iter().map(&analyze).collect()),
                    Err(e) => {
                        result.add_error(PipelineError::ThreadPool(e.to_string()));
                        items.iter().map(&analyze).collect()
                    }
                },
                None => items.par_iter().map(&analyze).collect(),
            }
        } else {
            items.iter().map(&analyze).collect()
        };

        for outcome in outcomes {
            match outcome {
                Ok(report) => result.data.push(report),
                Err(error) => result.add_error(error),
            }
        }
        result
    }
}
