//! The seam between a host language frontend and the engine.

use walkerr_core::errors::ParseError;

use crate::symbols::SymbolTable;
use crate::syntax::CompilationUnit;

/// A compilation unit together with the symbols its identifiers resolve to.
#[derive(Debug)]
pub struct ParsedUnit {
    pub unit: CompilationUnit,
    pub symbols: SymbolTable,
}

/// Turns one source file into a [`ParsedUnit`].
pub trait Frontend: Send + Sync {
    /// File extensions this frontend accepts, without the dot.
    fn extensions(&self) -> &[&str];

    fn parse_unit(&self, path: &str, source: &[u8]) -> Result<ParsedUnit, ParseError>;

    fn accepts(&self, path: &str) -> bool {
        path.rsplit_once('.')
            .is_some_and(|(_, ext)| self.extensions().contains(&ext))
    }
}
