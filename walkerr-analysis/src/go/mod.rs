//! Go frontend: tree-sitter-go parsing, lowering and name resolution.

mod lower;
mod scope;
mod typing;
mod universe;

use std::cell::RefCell;
use std::path::PathBuf;

use tree_sitter::{Node, Parser, Tree};
use walkerr_core::config::FrontendConfig;
use walkerr_core::errors::ParseError;
use walkerr_core::types::collections::{FxHashMap, FxHashSet};

use crate::frontend::{Frontend, ParsedUnit};
use crate::syntax::Position;

use lower::{named_children, position, Lowerer};

thread_local! {
    static GO_PARSER: RefCell<Option<Parser>> = const { RefCell::new(None) };
}

/// Functions whose result is an `error`, keyed by import path.
#[derive(Debug, Clone, Default)]
pub struct ErrorConstructors {
    by_path: FxHashMap<String, FxHashSet<String>>,
}

impl ErrorConstructors {
    /// Parse `importpath.Func` entries; malformed entries are dropped.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        let mut by_path: FxHashMap<String, FxHashSet<String>> = FxHashMap::default();
        for name in names {
            if let Some((path, func)) = name.as_ref().rsplit_once('.') {
                if !path.is_empty() && !func.is_empty() {
                    by_path
                        .entry(path.to_string())
                        .or_default()
                        .insert(func.to_string());
                }
            }
        }
        Self { by_path }
    }

    pub fn contains(&self, path: &str, func: &str) -> bool {
        self.by_path.get(path).is_some_and(|funcs| funcs.contains(func))
    }
}

/// Parses `.go` files into compilation units with resolved identifiers.
#[derive(Debug, Clone)]
pub struct GoFrontend {
    constructors: ErrorConstructors,
    allow_syntax_errors: bool,
    max_tree_depth: usize,
}

impl Default for GoFrontend {
    fn default() -> Self {
        Self::new(&FrontendConfig::default())
    }
}

impl GoFrontend {
    pub fn new(config: &FrontendConfig) -> Self {
        Self {
            constructors: ErrorConstructors::new(config.effective_error_constructors().as_slice()),
            allow_syntax_errors: config.effective_allow_syntax_errors(),
            max_tree_depth: config.effective_max_tree_depth(),
        }
    }

    fn parse_tree(&self, path: &str, source: &[u8]) -> Result<Tree, ParseError> {
        GO_PARSER.with(|cell| {
            let mut slot = cell.borrow_mut();
            if slot.is_none() {
                let mut parser = Parser::new();
                parser
                    .set_language(&tree_sitter_go::LANGUAGE.into())
                    .map_err(|e| ParseError::GrammarLoad {
                        message: e.to_string(),
                    })?;
                *slot = Some(parser);
            }
            let parser = slot.as_mut().ok_or_else(|| ParseError::GrammarLoad {
                message: "Go parser unavailable".to_string(),
            })?;
            parser
                .parse(source, None)
                .ok_or_else(|| ParseError::TreeSitterError {
                    path: PathBuf::from(path),
                    message: "parse returned no tree".to_string(),
                })
        })
    }
}

impl Frontend for GoFrontend {
    fn extensions(&self) -> &[&str] {
        &["go"]
    }

    fn parse_unit(&self, path: &str, source: &[u8]) -> Result<ParsedUnit, ParseError> {
        let tree = self.parse_tree(path, source)?;
        let root = tree.root_node();

        if root.has_error() {
            let (count, first) = count_errors(root);
            if !self.allow_syntax_errors {
                let first = first.unwrap_or_default();
                return Err(ParseError::SyntaxErrors {
                    path: PathBuf::from(path),
                    count,
                    line: first.line,
                    column: first.column,
                });
            }
            tracing::debug!(path, errors = count, "lowering unit with syntax errors");
        }

        // Lowering recurses along the tree.
        if let Some(at) = first_below_depth(root, self.max_tree_depth) {
            return Err(ParseError::TreeTooDeep {
                path: PathBuf::from(path),
                line: at.line,
                column: at.column,
                limit: self.max_tree_depth,
            });
        }

        let package = named_children(root)
            .into_iter()
            .find(|node| node.kind() == "package_clause")
            .and_then(|clause| named_children(clause).into_iter().next())
            .and_then(|name| name.utf8_text(source).ok())
            .ok_or_else(|| ParseError::MissingPackageClause {
                path: PathBuf::from(path),
            })?;

        Ok(Lowerer::new(source, package, &self.constructors).lower_file(root, path))
    }
}

/// The package name a Go import path conventionally declares: its last
/// element, skipping a trailing major-version element such as `v2`.
pub fn package_name_from_path(path: &str) -> &str {
    let mut elements = path.rsplit('/');
    let last = elements.next().unwrap_or(path);
    let is_version = last.len() > 1
        && last.starts_with('v')
        && last[1..].chars().all(|c| c.is_ascii_digit());
    match elements.next() {
        Some(parent) if is_version => parent,
        _ => last,
    }
}

/// Number of ERROR and MISSING nodes, and where the first one starts.
fn count_errors(root: Node<'_>) -> (u32, Option<Position>) {
    let mut count = 0u32;
    let mut first = None;
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            count += 1;
            first.get_or_insert_with(|| position(node.start_position()));
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return (count, first);
            }
        }
    }
}

/// Where the first node deeper than `limit` starts, if there is one.
fn first_below_depth(root: Node<'_>, limit: usize) -> Option<Position> {
    let mut cursor = root.walk();
    let mut depth = 0usize;
    loop {
        if depth > limit {
            return Some(position(cursor.node().start_position()));
        }
        if cursor.goto_first_child() {
            depth += 1;
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
            depth -= 1;
        }
    }
}
