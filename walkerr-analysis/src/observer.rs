//! Structured logging of analysis events through `tracing`.

use walkerr_core::events::*;

/// Forwards every analysis event to `tracing`: per-identifier events at
/// debug, unit lifecycle at info, failures at warn.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventHandler;

impl TracingEventHandler {
    pub fn new() -> Self {
        Self
    }
}

impl WalkerrEventHandler for TracingEventHandler {
    fn on_unit_started(&self, event: &UnitStartedEvent) {
        tracing::info!(unit = %event.unit, "analyzing unit");
    }

    fn on_unit_complete(&self, event: &UnitCompleteEvent) {
        tracing::info!(
            unit = %event.unit,
            summaries = event.summaries,
            diagnostics = event.diagnostics,
            duration_us = event.duration_us,
            "unit complete"
        );
    }

    fn on_unit_failed(&self, event: &UnitFailedEvent) {
        tracing::warn!(
            unit = %event.unit,
            code = %event.error_code,
            error = %event.message,
            "unit failed"
        );
    }

    fn on_function_selected(&self, event: &FunctionSelectedEvent) {
        tracing::debug!(unit = %event.unit, func = %event.function, line = event.line, "find function");
    }

    fn on_direct_error(&self, event: &DirectErrorEvent) {
        tracing::debug!(func = %event.function, error = %event.error, line = event.line, "find error");
    }

    fn on_call_target(&self, event: &CallTargetEvent) {
        tracing::debug!(func = %event.function, callee = %event.callee, line = event.line, "call in return");
    }

    fn on_symbol_unresolved(&self, event: &SymbolUnresolvedEvent) {
        tracing::debug!(func = %event.function, name = %event.name, line = event.line, "unresolved identifier skipped");
    }

    fn on_call_joined(&self, event: &CallJoinedEvent) {
        tracing::debug!(func = %event.function, callee = %event.callee, errors = event.errors, "join error");
    }

    fn on_call_unresolved(&self, event: &CallUnresolvedEvent) {
        tracing::debug!(
            func = %event.function,
            callee = %event.callee,
            reported = event.reported,
            "call target not analyzed"
        );
    }
}
