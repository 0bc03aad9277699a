//! Resolved symbols, qualified names, and the resolver seam.

use std::fmt;

use walkerr_core::types::collections::FxHashMap;

use crate::syntax::{Ident, NodeId};
use crate::types::Type;

/// Opaque identity of one declaration, minted by the resolver.
///
/// Two identifier occurrences denote the same value iff they resolve to the
/// same `SymbolId`; equal spelling is not enough (shadowing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Var,
    Const,
    Func,
    TypeName,
    /// An imported package name.
    Package { path: String },
    /// A member of an imported package whose declaration is not visible.
    Imported,
    /// Predeclared functions such as `len` or `panic`.
    Builtin,
    Nil,
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    /// Owning package name; `None` for predeclared symbols.
    pub package: Option<String>,
    pub kind: SymbolKind,
    pub ty: Type,
}

impl Symbol {
    pub fn qualified_name(&self) -> QualifiedName {
        QualifiedName::new(self.package.as_deref(), &self.name)
    }

    /// Whether a call through this symbol is a conversion rather than a call.
    pub fn is_type(&self) -> bool {
        self.kind == SymbolKind::TypeName
    }
}

/// `<package>.<name>`, the externally visible identity of a function or
/// error value. Predeclared symbols render as their bare name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName(String);

impl QualifiedName {
    pub fn new(package: Option<&str>, name: &str) -> Self {
        match package {
            Some(pkg) => Self(format!("{pkg}.{name}")),
            None => Self(name.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host-supplied symbol resolution for one compilation unit.
pub trait SymbolResolver {
    /// The declaration an identifier occurrence refers to, if known.
    fn resolve(&self, ident: &Ident) -> Option<&Symbol>;
}

/// Arena of symbols plus the identifier-use map for one unit.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    uses: FxHashMap<NodeId, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new symbol and return its identity.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        package: Option<&str>,
        kind: SymbolKind,
        ty: Type,
    ) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol {
            id,
            name: name.into(),
            package: package.map(str::to_string),
            kind,
            ty,
        });
        id
    }

    /// Record that identifier occurrence `node` refers to `symbol`.
    pub fn bind(&mut self, node: NodeId, symbol: SymbolId) {
        self.uses.insert(node, symbol);
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.0 as usize)
    }

    pub fn lookup_use(&self, node: NodeId) -> Option<SymbolId> {
        self.uses.get(&node).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SymbolResolver for SymbolTable {
    fn resolve(&self, ident: &Ident) -> Option<&Symbol> {
        self.lookup_use(ident.id).and_then(|id| self.get(id))
    }
}
