//! Static typing for the frontend: written types, method sets, and a small
//! expression type inference good enough to tell error values apart.
//!
//! Anything not covered here types as [`Type::Unknown`], which is never
//! error-capable.

use tree_sitter::Node;
use walkerr_core::types::collections::FxHashMap;

use crate::symbols::{Symbol, SymbolKind};
use crate::types::{MethodSig, Type};

use super::lower::{field_children, first_param_type, named_children, Lowerer};

impl<'a> Lowerer<'a> {
    /// The type a type node denotes in the current scope.
    pub(super) fn resolve_type(&self, node: Node<'_>) -> Type {
        match node.kind() {
            "type_identifier" | "identifier" => self
                .lookup(self.text(node))
                .filter(|symbol| symbol.is_type())
                .map(|symbol| symbol.ty.clone())
                .unwrap_or(Type::Unknown),
            "pointer_type" => match named_children(node).first() {
                Some(inner) => Type::Pointer(Box::new(self.resolve_type(*inner))),
                None => Type::Unknown,
            },
            "parenthesized_type" => named_children(node)
                .first()
                .map(|inner| self.resolve_type(*inner))
                .unwrap_or(Type::Unknown),
            "generic_type" => node
                .child_by_field_name("type")
                .map(|base| self.resolve_type(base))
                .unwrap_or(Type::Unknown),
            "interface_type" => Type::Interface(self.interface_methods(node)),
            "struct_type" => Type::Struct,
            "function_type" => Type::Signature(self.result_types(node.child_by_field_name("result"))),
            _ => Type::Unknown,
        }
    }

    /// One type per declared result; `(a, b error)` yields two.
    pub(super) fn result_types(&self, result: Option<Node<'_>>) -> Vec<Type> {
        let Some(result) = result else {
            return Vec::new();
        };
        if result.kind() != "parameter_list" {
            return vec![self.resolve_type(result)];
        }

        let mut types = Vec::new();
        for decl in named_children(result) {
            let ty = decl
                .child_by_field_name("type")
                .map(|ty| self.resolve_type(ty))
                .unwrap_or(Type::Unknown);
            let count = field_children(decl, "name").len().max(1);
            types.extend(std::iter::repeat(ty).take(count));
        }
        types
    }

    fn param_count(&self, params: Option<Node<'_>>) -> usize {
        params
            .map(|list| {
                named_children(list)
                    .into_iter()
                    .map(|decl| field_children(decl, "name").len().max(1))
                    .sum()
            })
            .unwrap_or(0)
    }

    fn interface_methods(&self, node: Node<'_>) -> Vec<MethodSig> {
        let mut methods = Vec::new();
        for elem in named_children(node) {
            match elem.kind() {
                "method_elem" | "method_spec" => {
                    let Some(name) = elem.child_by_field_name("name") else {
                        continue;
                    };
                    methods.push(MethodSig::new(
                        self.text(name),
                        self.param_count(elem.child_by_field_name("parameters")),
                        self.result_types(elem.child_by_field_name("result")),
                    ));
                }
                "type_identifier" | "qualified_type" => {
                    methods.extend(embedded_methods(self.resolve_type(elem)));
                }
                // Embedded interfaces, e.g. `interface { error; Code() int }`.
                _ => {
                    for inner in named_children(elem) {
                        methods.extend(embedded_methods(self.resolve_type(inner)));
                    }
                }
            }
        }
        methods
    }

    /// Methods declared in this unit, grouped by receiver base type.
    pub(super) fn collect_methods(&self, top: &[Node<'_>]) -> FxHashMap<String, Vec<MethodSig>> {
        let mut methods: FxHashMap<String, Vec<MethodSig>> = FxHashMap::default();
        for node in top {
            if node.kind() != "method_declaration" {
                continue;
            }
            let (Some((receiver, pointer)), Some(name)) = (
                node.child_by_field_name("receiver")
                    .and_then(|list| self.receiver_base(list)),
                node.child_by_field_name("name"),
            ) else {
                continue;
            };
            let mut sig = MethodSig::new(
                self.text(name),
                self.param_count(node.child_by_field_name("parameters")),
                self.result_types(node.child_by_field_name("result")),
            );
            sig.pointer_receiver = pointer;
            methods.entry(receiver.to_string()).or_default().push(sig);
        }
        methods
    }

    /// Receiver base type name and whether the receiver is a pointer.
    pub(super) fn receiver_base(&self, list: Node<'_>) -> Option<(&'a str, bool)> {
        let mut node = first_param_type(list)?;
        let mut pointer = false;
        loop {
            match node.kind() {
                "pointer_type" => {
                    pointer = true;
                    node = *named_children(node).first()?;
                }
                "parenthesized_type" => node = *named_children(node).first()?,
                "generic_type" => node = node.child_by_field_name("type")?,
                "type_identifier" => return Some((self.text(node), pointer)),
                _ => return None,
            }
        }
    }

    /// Types of a var/const spec's names, from the written type or the
    /// initializers.
    pub(super) fn spec_types(&self, spec: Node<'_>, count: usize) -> Vec<Type> {
        if let Some(ty) = spec.child_by_field_name("type") {
            return vec![self.resolve_type(ty); count];
        }
        let values = spec
            .child_by_field_name("value")
            .map(named_children)
            .unwrap_or_default();
        self.infer_list(&values, count)
    }

    /// Types for `count` names assigned from `values`: either one value per
    /// name, or a single multi-valued call.
    pub(super) fn infer_list(&self, values: &[Node<'_>], count: usize) -> Vec<Type> {
        if let [single] = values {
            if count > 1 {
                let mut types = self.infer(*single);
                types.resize(count, Type::Unknown);
                return types;
            }
        }
        (0..count)
            .map(|i| {
                values
                    .get(i)
                    .and_then(|value| self.infer(*value).into_iter().next())
                    .unwrap_or(Type::Unknown)
            })
            .collect()
    }

    /// The value types an expression produces.
    pub(super) fn infer(&self, node: Node<'_>) -> Vec<Type> {
        let ty = match node.kind() {
            "identifier" | "nil" | "true" | "false" | "iota" => self
                .lookup(self.text(node))
                .filter(|symbol| !symbol.is_type())
                .map(|symbol| symbol.ty.clone())
                .unwrap_or(Type::Unknown),
            "interpreted_string_literal" | "raw_string_literal" => Type::basic("string"),
            "int_literal" => Type::basic("int"),
            "float_literal" => Type::basic("float64"),
            "imaginary_literal" => Type::basic("complex128"),
            "rune_literal" => Type::basic("rune"),
            "parenthesized_expression" => {
                return named_children(node)
                    .first()
                    .map(|inner| self.infer(*inner))
                    .unwrap_or_else(|| vec![Type::Unknown]);
            }
            "call_expression" => return self.infer_call(node),
            "type_conversion_expression" | "composite_literal" => node
                .child_by_field_name("type")
                .map(|ty| self.resolve_type(ty))
                .unwrap_or(Type::Unknown),
            "unary_expression" => {
                let is_address = node
                    .child_by_field_name("operator")
                    .is_some_and(|op| op.kind() == "&");
                match node.child_by_field_name("operand") {
                    Some(operand) if is_address => match self.infer(operand).into_iter().next() {
                        Some(Type::Unknown) | None => Type::Unknown,
                        Some(inner) => Type::Pointer(Box::new(inner)),
                    },
                    _ => Type::Unknown,
                }
            }
            "type_assertion_expression" => {
                let asserted = node
                    .child_by_field_name("type")
                    .map(|ty| self.resolve_type(ty))
                    .unwrap_or(Type::Unknown);
                return vec![asserted, Type::basic("bool")];
            }
            "func_literal" => Type::Signature(self.result_types(node.child_by_field_name("result"))),
            _ => Type::Unknown,
        };
        vec![ty]
    }

    fn infer_call(&self, node: Node<'_>) -> Vec<Type> {
        let unknown = || vec![Type::Unknown];
        let Some(fun) = node.child_by_field_name("function") else {
            return unknown();
        };

        match fun.kind() {
            "identifier" => {
                let Some(symbol) = self.lookup(self.text(fun)) else {
                    return unknown();
                };
                match &symbol.kind {
                    SymbolKind::TypeName => vec![symbol.ty.clone()],
                    SymbolKind::Builtin if symbol.name == "new" => {
                        let arg = node
                            .child_by_field_name("arguments")
                            .and_then(|args| named_children(args).first().copied());
                        match arg {
                            Some(arg) => vec![Type::Pointer(Box::new(self.resolve_type(arg)))],
                            None => unknown(),
                        }
                    }
                    _ => symbol
                        .ty
                        .results()
                        .map(<[Type]>::to_vec)
                        .unwrap_or_else(unknown),
                }
            }
            "selector_expression" => {
                let (Some(operand), Some(field)) = (
                    fun.child_by_field_name("operand"),
                    fun.child_by_field_name("field"),
                ) else {
                    return unknown();
                };
                if operand.kind() != "identifier" {
                    return unknown();
                }
                match self.lookup(self.text(operand)).map(|symbol| &symbol.kind) {
                    Some(SymbolKind::Package { path })
                        if self.constructors.contains(path, self.text(field)) =>
                    {
                        vec![Type::universe_error()]
                    }
                    _ => unknown(),
                }
            }
            "func_literal" => self.result_types(fun.child_by_field_name("result")),
            _ => unknown(),
        }
    }

    fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.scopes.lookup(name).and_then(|id| self.symbols.get(id))
    }
}

fn embedded_methods(ty: Type) -> Vec<MethodSig> {
    match ty {
        Type::Interface(methods) => methods,
        Type::Named(named) => match &named.underlying {
            Type::Interface(methods) => methods.clone(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
