//! Predeclared Go identifiers.

use walkerr_core::types::collections::FxHashMap;

use crate::symbols::{SymbolId, SymbolKind, SymbolTable};
use crate::types::Type;

const BASIC_TYPES: &[&str] = &[
    "bool", "byte", "complex64", "complex128", "float32", "float64", "int", "int8", "int16",
    "int32", "int64", "rune", "string", "uint", "uint8", "uint16", "uint32", "uint64", "uintptr",
];

const BUILTIN_FUNCS: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover",
];

/// Mint the universe scope into `symbols` and return it.
pub(super) fn populate(symbols: &mut SymbolTable) -> FxHashMap<String, SymbolId> {
    let mut scope = FxHashMap::default();
    let mut add = |name: &str, kind: SymbolKind, ty: Type| {
        let id = symbols.declare(name, None, kind, ty);
        scope.insert(name.to_string(), id);
    };

    for &name in BASIC_TYPES {
        add(name, SymbolKind::TypeName, Type::basic(name));
    }
    add("error", SymbolKind::TypeName, Type::universe_error());
    add("any", SymbolKind::TypeName, Type::Interface(Vec::new()));
    add("comparable", SymbolKind::TypeName, Type::Interface(Vec::new()));

    for &name in BUILTIN_FUNCS {
        add(name, SymbolKind::Builtin, Type::Unknown);
    }

    add("true", SymbolKind::Const, Type::basic("bool"));
    add("false", SymbolKind::Const, Type::basic("bool"));
    add("iota", SymbolKind::Const, Type::basic("int"));
    add("nil", SymbolKind::Nil, Type::Nil);

    scope
}
