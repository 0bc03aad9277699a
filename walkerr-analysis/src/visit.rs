//! Generic pre-order tree walk with a per-node descend/skip/stop signal.

use std::ops::ControlFlow;

use crate::syntax::{Block, CaseClause, Expr, Stmt};

/// A borrowed node of the syntax model.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Block(&'a Block),
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

/// What the walk does after the callback has seen a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Visit the node's children.
    Descend,
    /// Leave the node's children unvisited; continue with its siblings.
    Skip,
    /// Abandon the whole walk.
    Stop,
}

/// Walk `node` and everything below it in source order.
///
/// `visit` receives each node with its depth (the starting node is depth 0).
/// Returns `ControlFlow::Break` when a callback asked to stop.
pub fn inspect<'a, F>(node: NodeRef<'a>, visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(NodeRef<'a>, usize) -> Walk,
{
    inspect_at(node, 0, visit)
}

/// Walk every statement of `stmts` as a sibling at depth 0.
pub fn inspect_stmts<'a, F>(stmts: &'a [Stmt], visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(NodeRef<'a>, usize) -> Walk,
{
    for stmt in stmts {
        inspect_at(NodeRef::Stmt(stmt), 0, visit)?;
    }
    ControlFlow::Continue(())
}

fn inspect_at<'a, F>(node: NodeRef<'a>, depth: usize, visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(NodeRef<'a>, usize) -> Walk,
{
    match visit(node, depth) {
        Walk::Stop => return ControlFlow::Break(()),
        Walk::Skip => return ControlFlow::Continue(()),
        Walk::Descend => {}
    }

    let child = depth + 1;
    match node {
        NodeRef::Block(block) => {
            for stmt in &block.stmts {
                inspect_at(NodeRef::Stmt(stmt), child, visit)?;
            }
        }
        NodeRef::Stmt(stmt) => match stmt {
            Stmt::Return(ret) => {
                for expr in &ret.results {
                    inspect_at(NodeRef::Expr(expr), child, visit)?;
                }
            }
            Stmt::Block(block) => inspect_at(NodeRef::Block(block), child, visit)?,
            Stmt::If(if_stmt) => {
                if let Some(init) = &if_stmt.init {
                    inspect_at(NodeRef::Stmt(init), child, visit)?;
                }
                if let Some(cond) = &if_stmt.cond {
                    inspect_at(NodeRef::Expr(cond), child, visit)?;
                }
                inspect_at(NodeRef::Block(&if_stmt.then), child, visit)?;
                if let Some(otherwise) = &if_stmt.otherwise {
                    inspect_at(NodeRef::Stmt(otherwise), child, visit)?;
                }
            }
            Stmt::For(for_stmt) => {
                for stmt in &for_stmt.header {
                    inspect_at(NodeRef::Stmt(stmt), child, visit)?;
                }
                inspect_at(NodeRef::Block(&for_stmt.body), child, visit)?;
            }
            Stmt::Switch(switch) => {
                if let Some(init) = &switch.init {
                    inspect_at(NodeRef::Stmt(init), child, visit)?;
                }
                for expr in &switch.tag {
                    inspect_at(NodeRef::Expr(expr), child, visit)?;
                }
                for clause in &switch.clauses {
                    inspect_clause(clause, child, visit)?;
                }
            }
            Stmt::Labeled { stmt, .. } => inspect_at(NodeRef::Stmt(stmt), child, visit)?,
            Stmt::Simple(exprs) => {
                for expr in exprs {
                    inspect_at(NodeRef::Expr(expr), child, visit)?;
                }
            }
        },
        NodeRef::Expr(expr) => match expr {
            Expr::Ident(_) | Expr::Literal(_) => {}
            Expr::Call(call) => {
                inspect_at(NodeRef::Expr(&call.fun), child, visit)?;
                for arg in &call.args {
                    inspect_at(NodeRef::Expr(arg), child, visit)?;
                }
            }
            Expr::Selector { operand, .. } => inspect_at(NodeRef::Expr(operand), child, visit)?,
            Expr::FuncLit(lit) => inspect_at(NodeRef::Block(&lit.body), child, visit)?,
            Expr::Paren(inner) => inspect_at(NodeRef::Expr(inner), child, visit)?,
            Expr::Other(children) => {
                for expr in children {
                    inspect_at(NodeRef::Expr(expr), child, visit)?;
                }
            }
        },
    }
    ControlFlow::Continue(())
}

// Case clauses are not nodes of their own; their parts sit one level below the switch.
fn inspect_clause<'a, F>(clause: &'a CaseClause, depth: usize, visit: &mut F) -> ControlFlow<()>
where
    F: FnMut(NodeRef<'a>, usize) -> Walk,
{
    for expr in &clause.exprs {
        inspect_at(NodeRef::Expr(expr), depth, visit)?;
    }
    for stmt in &clause.body {
        inspect_at(NodeRef::Stmt(stmt), depth, visit)?;
    }
    ControlFlow::Continue(())
}
