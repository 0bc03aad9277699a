//! Lowers a tree-sitter-go CST into the host syntax model, resolving every
//! identifier occurrence through lexical scopes as it goes.
//!
//! Package-level names (imports, types, functions, methods, vars, consts)
//! are declared up front so bodies may refer to them in any order. Inside
//! bodies, declarations take effect in source order.

use std::sync::Arc;

use tree_sitter::{Node, Point};
use walkerr_core::types::collections::FxHashMap;

use crate::frontend::ParsedUnit;
use crate::symbols::{SymbolId, SymbolKind, SymbolResolver, SymbolTable};
use crate::syntax::{
    Block, CallExpr, CaseClause, CompilationUnit, Decl, Expr, ForStmt, FuncDecl, FuncLit, Ident,
    IfStmt, NodeId, Position, ReturnStmt, Span, Stmt, SwitchStmt, TypeExpr,
};
use crate::types::{NamedType, Type};

use super::scope::Scopes;
use super::{package_name_from_path, universe, ErrorConstructors};

pub(super) struct Lowerer<'a> {
    pub(super) src: &'a [u8],
    pub(super) package: String,
    pub(super) symbols: SymbolTable,
    pub(super) scopes: Scopes,
    pub(super) constructors: &'a ErrorConstructors,
    next_node: u32,
    /// `(receiver type, method)` to the method's symbol.
    methods: FxHashMap<(String, String), SymbolId>,
    /// `(package, member)` to the symbol standing in for an imported member.
    imported: FxHashMap<(String, String), SymbolId>,
}

impl<'a> Lowerer<'a> {
    pub(super) fn new(src: &'a [u8], package: &str, constructors: &'a ErrorConstructors) -> Self {
        let mut symbols = SymbolTable::new();
        let universe = universe::populate(&mut symbols);
        Self {
            src,
            package: package.to_string(),
            symbols,
            scopes: Scopes::new(universe),
            constructors,
            next_node: 0,
            methods: FxHashMap::default(),
            imported: FxHashMap::default(),
        }
    }

    pub(super) fn lower_file(mut self, root: Node<'_>, path: &str) -> ParsedUnit {
        let top = named_children(root);

        for node in &top {
            if node.kind() == "import_declaration" {
                self.declare_imports(*node);
            }
        }
        self.declare_types(&top);
        self.declare_funcs(&top);
        self.declare_package_values(&top);

        let decls = top
            .iter()
            .filter(|node| node.kind() != "package_clause")
            .map(|node| self.lower_decl(*node))
            .collect();

        ParsedUnit {
            unit: CompilationUnit {
                path: path.to_string(),
                package: self.package,
                decls,
            },
            symbols: self.symbols,
        }
    }

    // ---- package-level declarations ----

    fn declare_imports(&mut self, decl: Node<'_>) {
        let mut specs = Vec::new();
        for child in named_children(decl) {
            match child.kind() {
                "import_spec" => specs.push(child),
                "import_spec_list" => specs.extend(
                    named_children(child)
                        .into_iter()
                        .filter(|spec| spec.kind() == "import_spec"),
                ),
                _ => {}
            }
        }

        for spec in specs {
            let Some(path_node) = spec.child_by_field_name("path") else {
                continue;
            };
            let path = self.text(path_node).trim_matches(|c| c == '"' || c == '`');
            let local = match spec.child_by_field_name("name") {
                Some(alias) if alias.kind() == "package_identifier" => self.text(alias),
                // Blank and dot imports bind no package name.
                Some(_) => continue,
                None => package_name_from_path(path),
            };
            let id = self.symbols.declare(
                local,
                None,
                SymbolKind::Package {
                    path: path.to_string(),
                },
                Type::Unknown,
            );
            self.scopes.insert_package(local, id);
        }
    }

    fn declare_types(&mut self, top: &[Node<'_>]) {
        let specs: Vec<Node<'_>> = top
            .iter()
            .filter(|node| node.kind() == "type_declaration")
            .flat_map(|node| named_children(*node))
            .filter(|spec| matches!(spec.kind(), "type_spec" | "type_alias"))
            .collect();

        // Names first so types may refer to each other.
        let mut declared = Vec::with_capacity(specs.len());
        for spec in specs {
            let Some(name) = spec.child_by_field_name("name") else {
                continue;
            };
            let name = self.text(name);
            let id = self.declare(name, SymbolKind::TypeName, Type::Unknown);
            declared.push((id, name, spec));
        }

        let mut methods = self.collect_methods(top);
        for (id, name, spec) in declared {
            let written = spec
                .child_by_field_name("type")
                .map(|ty| self.resolve_type(ty))
                .unwrap_or(Type::Unknown);
            let ty = if spec.kind() == "type_alias" {
                written
            } else {
                Type::Named(Arc::new(NamedType {
                    package: Some(self.package.clone()),
                    name: name.to_string(),
                    underlying: underlying(written),
                    methods: methods.remove(name).unwrap_or_default(),
                }))
            };
            if let Some(symbol) = self.symbols.get_mut(id) {
                symbol.ty = ty;
            }
        }
    }

    fn declare_funcs(&mut self, top: &[Node<'_>]) {
        for node in top {
            let Some(name_node) = node.child_by_field_name("name") else {
                continue;
            };
            let name = self.text(name_node);
            let results = self.result_types(node.child_by_field_name("result"));
            match node.kind() {
                "function_declaration" => {
                    self.declare(name, SymbolKind::Func, Type::Signature(results));
                }
                "method_declaration" => {
                    let Some((receiver, _)) = node
                        .child_by_field_name("receiver")
                        .and_then(|list| self.receiver_base(list))
                    else {
                        continue;
                    };
                    // Methods are reachable only through selectors.
                    let id = self.symbols.declare(
                        name,
                        Some(&self.package),
                        SymbolKind::Func,
                        Type::Signature(results),
                    );
                    self.methods.insert((receiver.to_string(), name.to_string()), id);
                }
                _ => {}
            }
        }
    }

    fn declare_package_values(&mut self, top: &[Node<'_>]) {
        let mut pending = Vec::new();
        for decl in top {
            let kind = match decl.kind() {
                "var_declaration" => SymbolKind::Var,
                "const_declaration" => SymbolKind::Const,
                _ => continue,
            };
            for spec in value_specs(*decl) {
                let ids: Vec<SymbolId> = field_children(spec, "name")
                    .into_iter()
                    .map(|name| self.declare(self.text(name), kind.clone(), Type::Unknown))
                    .collect();
                pending.push((spec, ids));
            }
        }

        // Initializers may mention package-level names declared after them.
        // A pass only fills in unknown types; stop once one changes nothing.
        loop {
            let mut changed = false;
            for (spec, ids) in &pending {
                let types = self.spec_types(*spec, ids.len());
                for (id, ty) in ids.iter().zip(types) {
                    if matches!(ty, Type::Unknown) {
                        continue;
                    }
                    if let Some(symbol) = self.symbols.get_mut(*id) {
                        if matches!(symbol.ty, Type::Unknown) {
                            symbol.ty = ty;
                            changed = true;
                        }
                    }
                }
            }
            if !changed {
                break;
            }
        }
    }

    // ---- functions ----

    fn lower_decl(&mut self, node: Node<'_>) -> Decl {
        let func = match node.kind() {
            "function_declaration" => self.lower_func(node, false),
            "method_declaration" => self.lower_func(node, true),
            _ => None,
        };
        match func {
            Some(func) => Decl::Func(func),
            None => Decl::Other(span(node)),
        }
    }

    fn lower_func(&mut self, node: Node<'_>, is_method: bool) -> Option<FuncDecl> {
        let name = self.ident(node.child_by_field_name("name")?);
        let receiver_list = node.child_by_field_name("receiver");

        let symbol = if is_method {
            receiver_list
                .and_then(|list| self.receiver_base(list))
                .and_then(|(receiver, _)| {
                    self.methods
                        .get(&(receiver.to_string(), name.name.clone()))
                        .copied()
                })
        } else {
            self.scopes
                .lookup(&name.name)
                .filter(|id| self.symbols.get(*id).is_some_and(|s| s.kind == SymbolKind::Func))
        };
        if let Some(symbol) = symbol {
            self.symbols.bind(name.id, symbol);
        }

        let receiver = receiver_list
            .and_then(first_param_type)
            .map(|ty| self.type_expr(ty));
        let results = self.result_type_exprs(node.child_by_field_name("result"));

        let body = node.child_by_field_name("body").map(|body| {
            // Parameters, results and the outermost body statements share a scope.
            self.scopes.push();
            if let Some(list) = receiver_list {
                self.declare_params(list);
            }
            if let Some(params) = node.child_by_field_name("parameters") {
                self.declare_params(params);
            }
            if let Some(result) = node.child_by_field_name("result") {
                if result.kind() == "parameter_list" {
                    self.declare_params(result);
                }
            }
            let block = self.lower_block_body(body);
            self.scopes.pop();
            block
        });

        Some(FuncDecl {
            name,
            receiver,
            results,
            body,
            span: span(node),
        })
    }

    fn result_type_exprs(&mut self, result: Option<Node<'_>>) -> Vec<TypeExpr> {
        let Some(result) = result else {
            return Vec::new();
        };
        if result.kind() != "parameter_list" {
            return vec![self.type_expr(result)];
        }

        let mut exprs = Vec::new();
        for decl in named_children(result) {
            let Some(ty) = decl.child_by_field_name("type") else {
                continue;
            };
            let count = field_children(decl, "name").len().max(1);
            for _ in 0..count {
                let expr = self.type_expr(ty);
                exprs.push(expr);
            }
        }
        exprs
    }

    fn type_expr(&mut self, node: Node<'_>) -> TypeExpr {
        match node.kind() {
            "type_identifier" => TypeExpr::Name(self.use_ident(node)),
            "qualified_type" => match (
                node.child_by_field_name("package"),
                node.child_by_field_name("name"),
            ) {
                (Some(package), Some(name)) => TypeExpr::Qualified {
                    package: self.text(package).to_string(),
                    name: self.text(name).to_string(),
                },
                _ => TypeExpr::Other,
            },
            "pointer_type" => match named_children(node).first() {
                Some(inner) => TypeExpr::Pointer(Box::new(self.type_expr(*inner))),
                None => TypeExpr::Other,
            },
            "parenthesized_type" => match named_children(node).first() {
                Some(inner) => self.type_expr(*inner),
                None => TypeExpr::Other,
            },
            _ => TypeExpr::Other,
        }
    }

    fn declare_params(&mut self, list: Node<'_>) {
        for decl in named_children(list) {
            let ty = match decl.kind() {
                "parameter_declaration" => decl
                    .child_by_field_name("type")
                    .map(|ty| self.resolve_type(ty))
                    .unwrap_or(Type::Unknown),
                // `xs ...T` is a slice.
                "variadic_parameter_declaration" => Type::Unknown,
                _ => continue,
            };
            for name in field_children(decl, "name") {
                let ident = self.ident(name);
                let id = self.declare(&ident.name, SymbolKind::Var, ty.clone());
                self.symbols.bind(ident.id, id);
            }
        }
    }

    // ---- statements ----

    fn lower_block(&mut self, node: Node<'_>) -> Block {
        self.scopes.push();
        let block = self.lower_block_body(node);
        self.scopes.pop();
        block
    }

    fn lower_block_body(&mut self, node: Node<'_>) -> Block {
        Block {
            stmts: self.lower_stmts(named_children(node)),
            span: span(node),
        }
    }

    fn lower_stmts(&mut self, nodes: Vec<Node<'_>>) -> Vec<Stmt> {
        let mut stmts = Vec::with_capacity(nodes.len());
        for node in nodes {
            if node.kind() == "statement_list" {
                stmts.extend(self.lower_stmts(named_children(node)));
            } else if let Some(stmt) = self.lower_stmt(node) {
                stmts.push(stmt);
            }
        }
        stmts
    }

    fn lower_stmt(&mut self, node: Node<'_>) -> Option<Stmt> {
        let stmt = match node.kind() {
            "return_statement" => {
                let results = named_children(node)
                    .into_iter()
                    .flat_map(expr_list_items)
                    .map(|expr| self.lower_expr(expr))
                    .collect();
                Stmt::Return(ReturnStmt {
                    results,
                    span: span(node),
                })
            }
            "block" => Stmt::Block(self.lower_block(node)),
            "if_statement" => self.lower_if(node),
            "for_statement" => self.lower_for(node),
            "expression_switch_statement" => self.lower_expr_switch(node),
            "type_switch_statement" => self.lower_type_switch(node),
            "select_statement" => self.lower_select(node),
            "labeled_statement" => {
                let label = node.child_by_field_name("label");
                let label_id = label.map(|l| l.id());
                let inner = named_children(node)
                    .into_iter()
                    .find(|child| Some(child.id()) != label_id)
                    .and_then(|child| self.lower_stmt(child))
                    .unwrap_or(Stmt::Simple(Vec::new()));
                Stmt::Labeled {
                    label: label.map(|l| self.text(l).to_string()).unwrap_or_default(),
                    stmt: Box::new(inner),
                }
            }
            "short_var_declaration" => self.lower_short_var(node),
            "var_declaration" => self.lower_local_values(node, SymbolKind::Var),
            "const_declaration" => self.lower_local_values(node, SymbolKind::Const),
            "type_declaration" => {
                self.declare_local_types(node);
                return None;
            }
            "empty_statement" | "break_statement" | "continue_statement" | "goto_statement"
            | "fallthrough_statement" | "comment" => return None,
            _ => Stmt::Simple(self.lower_exprs_within(node)),
        };
        Some(stmt)
    }

    fn lower_if(&mut self, node: Node<'_>) -> Stmt {
        self.scopes.push();
        let init = node
            .child_by_field_name("initializer")
            .and_then(|init| self.lower_stmt(init))
            .map(Box::new);
        let cond = node
            .child_by_field_name("condition")
            .map(|cond| self.lower_expr(cond));
        let then = node
            .child_by_field_name("consequence")
            .map(|block| self.lower_block(block))
            .unwrap_or_default();
        let otherwise = node
            .child_by_field_name("alternative")
            .and_then(|alt| self.lower_stmt(alt))
            .map(Box::new);
        self.scopes.pop();

        Stmt::If(IfStmt {
            init,
            cond,
            then,
            otherwise,
        })
    }

    fn lower_for(&mut self, node: Node<'_>) -> Stmt {
        self.scopes.push();
        let body_node = node.child_by_field_name("body");
        let body_id = body_node.map(|b| b.id());

        let mut header = Vec::new();
        for child in named_children(node) {
            if Some(child.id()) == body_id {
                continue;
            }
            match child.kind() {
                "for_clause" => {
                    if let Some(init) = child.child_by_field_name("initializer") {
                        header.extend(self.lower_stmt(init));
                    }
                    if let Some(cond) = child.child_by_field_name("condition") {
                        header.push(Stmt::Simple(vec![self.lower_expr(cond)]));
                    }
                    if let Some(update) = child.child_by_field_name("update") {
                        header.extend(self.lower_stmt(update));
                    }
                }
                "range_clause" => header.push(self.lower_assign_like(child)),
                _ => header.push(Stmt::Simple(vec![self.lower_expr(child)])),
            }
        }

        let body = body_node
            .map(|b| self.lower_block(b))
            .unwrap_or_default();
        self.scopes.pop();
        Stmt::For(ForStmt { header, body })
    }

    fn lower_expr_switch(&mut self, node: Node<'_>) -> Stmt {
        self.scopes.push();
        let init = node
            .child_by_field_name("initializer")
            .and_then(|init| self.lower_stmt(init))
            .map(Box::new);
        let tag = node
            .child_by_field_name("value")
            .map(|value| vec![self.lower_expr(value)])
            .unwrap_or_default();

        let mut clauses = Vec::new();
        for clause in named_children(node) {
            match clause.kind() {
                "expression_case" => {
                    let header = clause.child_by_field_name("value");
                    let exprs = header
                        .map(expr_list_items)
                        .unwrap_or_default()
                        .into_iter()
                        .map(|expr| self.lower_expr(expr))
                        .collect();
                    let skip: Vec<usize> = header.map(|h| h.id()).into_iter().collect();
                    self.scopes.push();
                    let body = self.lower_clause_body(clause, &skip);
                    self.scopes.pop();
                    clauses.push(CaseClause { exprs, body });
                }
                "default_case" => clauses.push(self.lower_default_clause(clause)),
                _ => {}
            }
        }
        self.scopes.pop();

        Stmt::Switch(SwitchStmt { init, tag, clauses })
    }

    fn lower_type_switch(&mut self, node: Node<'_>) -> Stmt {
        self.scopes.push();
        let init = node
            .child_by_field_name("initializer")
            .and_then(|init| self.lower_stmt(init))
            .map(Box::new);
        let value = node.child_by_field_name("value");
        let tag = value
            .map(|value| vec![self.lower_expr(value)])
            .unwrap_or_default();
        let value_ty = value
            .and_then(|value| self.infer(value).into_iter().next())
            .unwrap_or(Type::Unknown);
        let alias = node
            .child_by_field_name("alias")
            .map(expr_list_items)
            .unwrap_or_default();

        let mut clauses = Vec::new();
        for clause in named_children(node) {
            let types = match clause.kind() {
                "type_case" => field_children(clause, "type"),
                "default_case" => Vec::new(),
                _ => continue,
            };
            // A single-type case narrows the alias to that type.
            let alias_ty = match types.as_slice() {
                [only] => self.resolve_type(*only),
                _ => value_ty.clone(),
            };
            let header: Vec<usize> = types.iter().map(|t| t.id()).collect();

            self.scopes.push();
            let mut exprs = Vec::new();
            for name in &alias {
                exprs.push(self.define(*name, alias_ty.clone()));
            }
            let body = self.lower_clause_body(clause, &header);
            self.scopes.pop();
            clauses.push(CaseClause { exprs, body });
        }
        self.scopes.pop();

        Stmt::Switch(SwitchStmt { init, tag, clauses })
    }

    fn lower_select(&mut self, node: Node<'_>) -> Stmt {
        let mut clauses = Vec::new();
        for clause in named_children(node) {
            match clause.kind() {
                "communication_case" => {
                    let header = clause.child_by_field_name("communication");
                    let skip: Vec<usize> = header.map(|h| h.id()).into_iter().collect();
                    self.scopes.push();
                    let exprs = match header.map(|comm| self.lower_assign_like(comm)) {
                        Some(Stmt::Simple(exprs)) => exprs,
                        _ => Vec::new(),
                    };
                    let body = self.lower_clause_body(clause, &skip);
                    self.scopes.pop();
                    clauses.push(CaseClause { exprs, body });
                }
                "default_case" => clauses.push(self.lower_default_clause(clause)),
                _ => {}
            }
        }
        Stmt::Switch(SwitchStmt {
            init: None,
            tag: Vec::new(),
            clauses,
        })
    }

    fn lower_default_clause(&mut self, clause: Node<'_>) -> CaseClause {
        self.scopes.push();
        let body = self.lower_clause_body(clause, &[]);
        self.scopes.pop();
        CaseClause {
            exprs: Vec::new(),
            body,
        }
    }

    fn lower_clause_body(&mut self, clause: Node<'_>, header: &[usize]) -> Vec<Stmt> {
        let stmts = named_children(clause)
            .into_iter()
            .filter(|child| !header.contains(&child.id()))
            .collect();
        self.lower_stmts(stmts)
    }

    /// `x, err := f()`: the right side is lowered and typed before the left
    /// side's new names come into scope. Names already declared in the
    /// innermost scope are reused.
    fn lower_short_var(&mut self, node: Node<'_>) -> Stmt {
        let right = node
            .child_by_field_name("right")
            .map(expr_list_items)
            .unwrap_or_default();
        let left = node
            .child_by_field_name("left")
            .map(expr_list_items)
            .unwrap_or_default();

        let types = self.infer_list(&right, left.len());
        let mut exprs: Vec<Expr> = right.iter().map(|expr| self.lower_expr(*expr)).collect();
        for (name, ty) in left.into_iter().zip(types) {
            exprs.push(self.define(name, ty));
        }
        Stmt::Simple(exprs)
    }

    /// Range clauses and receive statements: `:=` defines, `=` assigns.
    fn lower_assign_like(&mut self, node: Node<'_>) -> Stmt {
        let mut exprs = Vec::new();
        if let Some(right) = node.child_by_field_name("right") {
            exprs.push(self.lower_expr(right));
        }
        let left = node
            .child_by_field_name("left")
            .map(expr_list_items)
            .unwrap_or_default();
        let defines = has_token(node, ":=");
        for name in left {
            let expr = if defines {
                self.define(name, Type::Unknown)
            } else {
                self.lower_expr(name)
            };
            exprs.push(expr);
        }
        if exprs.is_empty() {
            // Send statements carry no fields we care about.
            exprs = self.lower_exprs_within(node);
        }
        Stmt::Simple(exprs)
    }

    fn lower_local_values(&mut self, node: Node<'_>, kind: SymbolKind) -> Stmt {
        let mut exprs = Vec::new();
        for spec in value_specs(node) {
            let names = field_children(spec, "name");
            let types = self.spec_types(spec, names.len());
            let values = spec
                .child_by_field_name("value")
                .map(expr_list_items)
                .unwrap_or_default();
            for value in values {
                exprs.push(self.lower_expr(value));
            }
            for (name, ty) in names.into_iter().zip(types) {
                let ident = self.ident(name);
                let id = self.declare(&ident.name, kind.clone(), ty);
                self.symbols.bind(ident.id, id);
                exprs.push(Expr::Ident(ident));
            }
        }
        Stmt::Simple(exprs)
    }

    fn declare_local_types(&mut self, node: Node<'_>) {
        for spec in named_children(node) {
            if !matches!(spec.kind(), "type_spec" | "type_alias") {
                continue;
            }
            let Some(name) = spec.child_by_field_name("name") else {
                continue;
            };
            let name = self.text(name);
            let written = spec
                .child_by_field_name("type")
                .map(|ty| self.resolve_type(ty))
                .unwrap_or(Type::Unknown);
            let ty = if spec.kind() == "type_alias" {
                written
            } else {
                Type::Named(Arc::new(NamedType {
                    package: Some(self.package.clone()),
                    name: name.to_string(),
                    underlying: underlying(written),
                    methods: Vec::new(),
                }))
            };
            self.declare(name, SymbolKind::TypeName, ty);
        }
    }

    // ---- expressions ----

    fn lower_exprs_within(&mut self, node: Node<'_>) -> Vec<Expr> {
        named_children(node)
            .into_iter()
            .flat_map(expr_list_items)
            .map(|expr| self.lower_expr(expr))
            .collect()
    }

    fn lower_expr(&mut self, node: Node<'_>) -> Expr {
        match node.kind() {
            "identifier" | "type_identifier" | "nil" | "true" | "false" | "iota" => {
                Expr::Ident(self.use_ident(node))
            }
            "call_expression" => {
                let fun = node
                    .child_by_field_name("function")
                    .map(|fun| self.lower_expr(fun))
                    .unwrap_or(Expr::Other(Vec::new()));
                let args = node
                    .child_by_field_name("arguments")
                    .map(|args| self.lower_exprs_within(args))
                    .unwrap_or_default();
                Expr::Call(CallExpr {
                    fun: Box::new(fun),
                    args,
                    span: span(node),
                })
            }
            "selector_expression" => self.lower_selector(node),
            "func_literal" => Expr::FuncLit(self.lower_func_lit(node)),
            "parenthesized_expression" => match named_children(node).first() {
                Some(inner) => Expr::Paren(Box::new(self.lower_expr(*inner))),
                None => Expr::Other(Vec::new()),
            },
            "int_literal" | "float_literal" | "imaginary_literal" | "rune_literal"
            | "interpreted_string_literal" | "raw_string_literal" => Expr::Literal(span(node)),
            _ => Expr::Other(self.lower_exprs_within(node)),
        }
    }

    fn lower_selector(&mut self, node: Node<'_>) -> Expr {
        let operand = node
            .child_by_field_name("operand")
            .map(|operand| self.lower_expr(operand))
            .unwrap_or(Expr::Other(Vec::new()));
        let Some(field_node) = node.child_by_field_name("field") else {
            return Expr::Other(vec![operand]);
        };

        let field = self.ident(field_node);
        if let Expr::Ident(base) = &operand {
            if let Some(target) = self.member_symbol(base, &field.name) {
                self.symbols.bind(field.id, target);
            }
        }
        Expr::Selector {
            operand: Box::new(operand),
            field,
        }
    }

    /// The symbol `base.member` denotes: an imported package member, or a
    /// method of a type declared in this unit.
    fn member_symbol(&mut self, base: &Ident, member: &str) -> Option<SymbolId> {
        let (kind, ty) = {
            let symbol = self.symbols.resolve(base)?;
            (symbol.kind.clone(), symbol.ty.clone())
        };
        if let SymbolKind::Package { path } = kind {
            return Some(self.imported_member(package_name_from_path(&path), member));
        }

        let named = match &ty {
            Type::Named(named) => named,
            Type::Pointer(inner) => match inner.as_ref() {
                Type::Named(named) => named,
                _ => return None,
            },
            _ => return None,
        };
        if named.package.as_deref() != Some(self.package.as_str()) {
            return None;
        }
        self.methods
            .get(&(named.name.clone(), member.to_string()))
            .copied()
    }

    fn imported_member(&mut self, package: &str, member: &str) -> SymbolId {
        let key = (package.to_string(), member.to_string());
        if let Some(id) = self.imported.get(&key) {
            return *id;
        }
        let id = self
            .symbols
            .declare(member, Some(package), SymbolKind::Imported, Type::Unknown);
        self.imported.insert(key, id);
        id
    }

    fn lower_func_lit(&mut self, node: Node<'_>) -> FuncLit {
        self.scopes.push();
        if let Some(params) = node.child_by_field_name("parameters") {
            self.declare_params(params);
        }
        if let Some(result) = node.child_by_field_name("result") {
            if result.kind() == "parameter_list" {
                self.declare_params(result);
            }
        }
        let body = node
            .child_by_field_name("body")
            .map(|body| self.lower_block_body(body))
            .unwrap_or_default();
        self.scopes.pop();
        FuncLit {
            body,
            span: span(node),
        }
    }

    // ---- identifiers ----

    pub(super) fn text(&self, node: Node<'_>) -> &'a str {
        node.utf8_text(self.src).unwrap_or("")
    }

    fn ident(&mut self, node: Node<'_>) -> Ident {
        self.next_node += 1;
        Ident {
            id: NodeId(self.next_node),
            name: self.text(node).to_string(),
            span: span(node),
        }
    }

    /// A use of a name: bound to whatever is in scope right now.
    fn use_ident(&mut self, node: Node<'_>) -> Ident {
        let ident = self.ident(node);
        if let Some(symbol) = self.scopes.lookup(&ident.name) {
            self.symbols.bind(ident.id, symbol);
        }
        ident
    }

    /// Declare `name` in the current scope.
    fn declare(&mut self, name: &str, kind: SymbolKind, ty: Type) -> SymbolId {
        let id = self.symbols.declare(name, Some(&self.package), kind, ty);
        self.scopes.insert(name, id);
        id
    }

    /// Bind the left side of a `:=`.
    fn define(&mut self, node: Node<'_>, ty: Type) -> Expr {
        if node.kind() != "identifier" {
            return self.lower_expr(node);
        }
        let ident = self.ident(node);
        if ident.name == "_" {
            return Expr::Ident(ident);
        }
        let id = match self.scopes.lookup_local(&ident.name) {
            Some(existing) => existing,
            None => self.declare(&ident.name, SymbolKind::Var, ty),
        };
        self.symbols.bind(ident.id, id);
        Expr::Ident(ident)
    }
}

/// Named children without comments.
pub(super) fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    children
}

pub(super) fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children = node.children_by_field_name(field, &mut cursor).collect();
    children
}

/// The items of an `expression_list`, or the node itself.
fn expr_list_items(node: Node<'_>) -> Vec<Node<'_>> {
    if node.kind() == "expression_list" {
        named_children(node)
    } else {
        vec![node]
    }
}

/// `var_spec`/`const_spec` children, looking through `var_spec_list`.
fn value_specs(decl: Node<'_>) -> Vec<Node<'_>> {
    let mut specs = Vec::new();
    for child in named_children(decl) {
        match child.kind() {
            "var_spec" | "const_spec" => specs.push(child),
            "var_spec_list" | "const_spec_list" => specs.extend(named_children(child)),
            _ => {}
        }
    }
    specs
}

fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| child.kind() == token);
    found
}

/// The type node of the first declaration in a parameter list.
pub(super) fn first_param_type(list: Node<'_>) -> Option<Node<'_>> {
    named_children(list)
        .into_iter()
        .find(|decl| decl.kind() == "parameter_declaration")
        .and_then(|decl| decl.child_by_field_name("type"))
}

/// A declared type's underlying type: named types collapse to theirs.
fn underlying(ty: Type) -> Type {
    match ty {
        Type::Named(named) => named.underlying.clone(),
        other => other,
    }
}

pub(super) fn position(point: Point) -> Position {
    Position::new(point.row as u32 + 1, point.column as u32 + 1)
}

pub(super) fn span(node: Node<'_>) -> Span {
    Span::new(position(node.start_position()), position(node.end_position()))
}
