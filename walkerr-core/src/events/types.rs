//! Event payload types.

/// Payload for `on_unit_started`.
#[derive(Debug, Clone)]
pub struct UnitStartedEvent {
    pub unit: String,
}

/// Payload for `on_function_selected`.
#[derive(Debug, Clone)]
pub struct FunctionSelectedEvent {
    pub unit: String,
    pub function: String,
    pub line: u32,
}

/// Payload for `on_direct_error`.
#[derive(Debug, Clone)]
pub struct DirectErrorEvent {
    pub function: String,
    pub error: String,
    pub line: u32,
}

/// Payload for `on_call_target`.
#[derive(Debug, Clone)]
pub struct CallTargetEvent {
    pub function: String,
    pub callee: String,
    pub line: u32,
}

/// Payload for `on_call_joined`.
#[derive(Debug, Clone)]
pub struct CallJoinedEvent {
    pub function: String,
    pub callee: String,
    pub errors: usize,
}

/// Payload for `on_call_unresolved`.
#[derive(Debug, Clone)]
pub struct CallUnresolvedEvent {
    pub function: String,
    pub callee: String,
    /// Whether the callee's name was reported in the diagnostic.
    pub reported: bool,
}

/// Payload for `on_symbol_unresolved`.
#[derive(Debug, Clone)]
pub struct SymbolUnresolvedEvent {
    pub function: String,
    pub name: String,
    pub line: u32,
}

/// Payload for `on_unit_complete`.
#[derive(Debug, Clone)]
pub struct UnitCompleteEvent {
    pub unit: String,
    pub summaries: usize,
    pub diagnostics: usize,
    pub duration_us: u64,
}

/// Payload for `on_unit_failed`.
#[derive(Debug, Clone)]
pub struct UnitFailedEvent {
    pub unit: String,
    pub error_code: String,
    pub message: String,
}
