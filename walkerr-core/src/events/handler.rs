//! WalkerrEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for handling walkerr events.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about. The trait requires `Send + Sync`
/// because units may be analyzed on several threads.
pub trait WalkerrEventHandler: Send + Sync {
    // ---- Unit Lifecycle ----
    fn on_unit_started(&self, _event: &UnitStartedEvent) {}
    fn on_unit_complete(&self, _event: &UnitCompleteEvent) {}
    fn on_unit_failed(&self, _event: &UnitFailedEvent) {}

    // ---- Extraction ----
    fn on_function_selected(&self, _event: &FunctionSelectedEvent) {}
    fn on_direct_error(&self, _event: &DirectErrorEvent) {}
    fn on_call_target(&self, _event: &CallTargetEvent) {}
    fn on_symbol_unresolved(&self, _event: &SymbolUnresolvedEvent) {}

    // ---- Join ----
    fn on_call_joined(&self, _event: &CallJoinedEvent) {}
    fn on_call_unresolved(&self, _event: &CallUnresolvedEvent) {}
}
