//! Lexical scope chain used while lowering one file.

use walkerr_core::types::collections::FxHashMap;

use crate::symbols::SymbolId;

/// Innermost scope last. Index 0 is the universe, index 1 the package
/// (imports share it; a file is the whole unit).
#[derive(Debug, Default)]
pub(super) struct Scopes {
    frames: Vec<FxHashMap<String, SymbolId>>,
}

impl Scopes {
    pub(super) fn new(universe: FxHashMap<String, SymbolId>) -> Self {
        Self {
            frames: vec![universe, FxHashMap::default()],
        }
    }

    pub(super) fn push(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    pub(super) fn pop(&mut self) {
        // Never drop the universe or package frames.
        if self.frames.len() > 2 {
            self.frames.pop();
        }
    }

    /// Bind `name` in the innermost scope, shadowing outer bindings.
    pub(super) fn insert(&mut self, name: &str, symbol: SymbolId) {
        if name == "_" {
            return;
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string(), symbol);
        }
    }

    /// Bind `name` at package level regardless of the current depth.
    pub(super) fn insert_package(&mut self, name: &str, symbol: SymbolId) {
        if name == "_" {
            return;
        }
        if let Some(frame) = self.frames.get_mut(1) {
            frame.insert(name.to_string(), symbol);
        }
    }

    pub(super) fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.frames.iter().rev().find_map(|frame| frame.get(name).copied())
    }

    /// Look only in the innermost scope (for `:=` redeclaration).
    pub(super) fn lookup_local(&self, name: &str) -> Option<SymbolId> {
        self.frames.last().and_then(|frame| frame.get(name).copied())
    }
}
