//! Per-function summaries and the per-unit Summary Table.

use walkerr_core::types::collections::{FxHashMap, SmallVec4};

use crate::symbols::QualifiedName;
use crate::syntax::{Ident, Position};
use crate::walker::{ErrorRef, ReturnSites};

/// What one eligible function returns directly and which calls it returns through.
#[derive(Debug, Clone)]
pub struct FunctionSummary {
    pub name: QualifiedName,
    /// Declaration position; only used to anchor the diagnostic.
    pub position: Position,
    pub direct_errors: Vec<ErrorRef>,
    pub calls: SmallVec4<Ident>,
}

impl FunctionSummary {
    pub fn new(name: QualifiedName, position: Position, sites: ReturnSites) -> Self {
        Self {
            name,
            position,
            direct_errors: sites.direct_errors,
            calls: sites.calls,
        }
    }
}

/// Summaries of one compilation unit, keyed by qualified function name.
///
/// Built completely before any join is resolved, then consumed. Nothing in
/// it outlives the unit.
#[derive(Debug, Clone, Default)]
pub struct SummaryTable {
    unit: String,
    entries: FxHashMap<QualifiedName, FunctionSummary>,
}

impl SummaryTable {
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            entries: FxHashMap::default(),
        }
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Insert a summary; a later declaration with the same name replaces the
    /// earlier one, which is returned.
    pub fn insert(&mut self, summary: FunctionSummary) -> Option<FunctionSummary> {
        self.entries.insert(summary.name.clone(), summary)
    }

    pub fn get(&self, name: &QualifiedName) -> Option<&FunctionSummary> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Summaries ordered by declaration position, then name.
    pub fn in_source_order(&self) -> Vec<&FunctionSummary> {
        let mut summaries: Vec<_> = self.entries.values().collect();
        summaries.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.name.cmp(&b.name)));
        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(name: &str, line: u32) -> FunctionSummary {
        FunctionSummary::new(
            QualifiedName::new(Some("p"), name),
            Position::new(line, 1),
            ReturnSites::default(),
        )
    }

    #[test]
    fn test_later_declaration_overwrites() {
        let mut table = SummaryTable::new("p.go");
        assert!(table.insert(summary("f", 3)).is_none());
        let replaced = table.insert(summary("f", 9));
        assert_eq!(replaced.map(|s| s.position.line), Some(3));
        assert_eq!(table.len(), 1);
        let name = QualifiedName::new(Some("p"), "f");
        assert_eq!(table.get(&name).map(|s| s.position.line), Some(9));
    }

    #[test]
    fn test_source_order() {
        let mut table = SummaryTable::new("p.go");
        table.insert(summary("c", 20));
        table.insert(summary("a", 5));
        table.insert(summary("b", 12));
        let lines: Vec<_> = table.in_source_order().iter().map(|s| s.position.line).collect();
        assert_eq!(lines, vec![5, 12, 20]);
    }
}
