//! Host syntax model: one compilation unit's declarations, statements and
//! expressions, reduced to the shapes the error-flow engine inspects.
//!
//! A frontend produces this model and a matching [`SymbolResolver`]; every
//! identifier occurrence carries a [`NodeId`] the resolver is keyed on.
//!
//! [`SymbolResolver`]: crate::symbols::SymbolResolver

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of one syntactic identifier occurrence within a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// A source position. Both fields are 1-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub id: NodeId,
    pub name: String,
    pub span: Span,
}

/// One source file's parsed declarations.
#[derive(Debug, Clone, Default)]
pub struct CompilationUnit {
    /// File the unit was parsed from, used to label diagnostics.
    pub path: String,
    /// Name from the package clause.
    pub package: String,
    pub decls: Vec<Decl>,
}

impl CompilationUnit {
    /// Iterate the unit's top-level function and method declarations.
    pub fn functions(&self) -> impl Iterator<Item = &FuncDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Func(func) => Some(func),
            Decl::Other(_) => None,
        })
    }
}

#[derive(Debug, Clone)]
pub enum Decl {
    Func(FuncDecl),
    /// Imports, types, vars and consts. Only the resolver cares about them.
    Other(Span),
}

#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub name: Ident,
    /// Receiver type for methods.
    pub receiver: Option<TypeExpr>,
    /// Declared result types, one entry per result (named results repeat
    /// their shared type).
    pub results: Vec<TypeExpr>,
    /// `None` for declarations without a body.
    pub body: Option<Block>,
    pub span: Span,
}

impl FuncDecl {
    pub fn is_method(&self) -> bool {
        self.receiver.is_some()
    }
}

/// A type as written in a declaration, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// A bare type name such as `error` or `MyErr`.
    Name(Ident),
    /// `pkg.Name`.
    Qualified { package: String, name: String },
    Pointer(Box<TypeExpr>),
    /// Any other type literal (slices, maps, funcs, structs, ...).
    Other,
}

impl TypeExpr {
    /// The bare identifier text when this is a plain name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(ident) => Some(&ident.name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Return(ReturnStmt),
    Block(Block),
    If(IfStmt),
    For(ForStmt),
    /// Expression switches, type switches and selects.
    Switch(SwitchStmt),
    Labeled { label: String, stmt: Box<Stmt> },
    /// Expression statements, assignments, declarations, `go`, `defer`,
    /// inc/dec and sends: only their expressions matter.
    Simple(Vec<Expr>),
}

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub results: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub init: Option<Box<Stmt>>,
    pub cond: Option<Expr>,
    pub then: Block,
    /// Either a `Stmt::Block` or a chained `Stmt::If`.
    pub otherwise: Option<Box<Stmt>>,
}

#[derive(Debug, Clone)]
pub struct ForStmt {
    /// Init/cond/post or range clause contents.
    pub header: Vec<Stmt>,
    pub body: Block,
}

#[derive(Debug, Clone)]
pub struct SwitchStmt {
    pub init: Option<Box<Stmt>>,
    pub tag: Vec<Expr>,
    pub clauses: Vec<CaseClause>,
}

#[derive(Debug, Clone, Default)]
pub struct CaseClause {
    pub exprs: Vec<Expr>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Ident(Ident),
    Call(CallExpr),
    Selector { operand: Box<Expr>, field: Ident },
    FuncLit(FuncLit),
    Paren(Box<Expr>),
    Literal(Span),
    /// Every other expression form, kept only for its subexpressions.
    Other(Vec<Expr>),
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub fun: Box<Expr>,
    pub args: Vec<Expr>,
    pub span: Span,
}

impl CallExpr {
    /// The identifier naming the call target: the bare name for `f(..)`,
    /// the trailing selector for `pkg.F(..)`. Parentheses are looked through.
    pub fn callee_ident(&self) -> Option<&Ident> {
        let mut fun = self.fun.as_ref();
        while let Expr::Paren(inner) = fun {
            fun = inner;
        }
        match fun {
            Expr::Ident(ident) => Some(ident),
            Expr::Selector { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FuncLit {
    pub body: Block,
    pub span: Span,
}
