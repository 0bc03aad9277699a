//! EventDispatcher: synchronous event dispatch, free when no handler is registered.

use std::sync::Arc;

use super::handler::WalkerrEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn WalkerrEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with a single handler.
    pub fn with_handler(handler: Arc<dyn WalkerrEventHandler>) -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(handler);
        dispatcher
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn WalkerrEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler does not prevent later handlers from running.
    fn emit<F: Fn(&dyn WalkerrEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                ::tracing::warn!("event handler panicked; continuing with remaining handlers");
            }
        }
    }

    // ---- Unit Lifecycle ----
    pub fn emit_unit_started(&self, event: &UnitStartedEvent) {
        self.emit(|h| h.on_unit_started(event));
    }

    pub fn emit_unit_complete(&self, event: &UnitCompleteEvent) {
        self.emit(|h| h.on_unit_complete(event));
    }

    pub fn emit_unit_failed(&self, event: &UnitFailedEvent) {
        self.emit(|h| h.on_unit_failed(event));
    }

    // ---- Extraction ----
    pub fn emit_function_selected(&self, event: &FunctionSelectedEvent) {
        self.emit(|h| h.on_function_selected(event));
    }

    pub fn emit_direct_error(&self, event: &DirectErrorEvent) {
        self.emit(|h| h.on_direct_error(event));
    }

    pub fn emit_call_target(&self, event: &CallTargetEvent) {
        self.emit(|h| h.on_call_target(event));
    }

    pub fn emit_symbol_unresolved(&self, event: &SymbolUnresolvedEvent) {
        self.emit(|h| h.on_symbol_unresolved(event));
    }

    // ---- Join ----
    pub fn emit_call_joined(&self, event: &CallJoinedEvent) {
        self.emit(|h| h.on_call_joined(event));
    }

    pub fn emit_call_unresolved(&self, event: &CallUnresolvedEvent) {
        self.emit(|h| h.on_call_unresolved(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
