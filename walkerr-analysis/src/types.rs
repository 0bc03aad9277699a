//! Static types as seen by the engine, and the Error-Capability Test.

use std::sync::Arc;

/// A method signature in a method set.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSig {
    pub name: String,
    pub params: usize,
    pub results: Vec<Type>,
    /// Declared on `*T` rather than `T`. Interface methods are never pointer methods.
    pub pointer_receiver: bool,
}

impl MethodSig {
    pub fn new(name: impl Into<String>, params: usize, results: Vec<Type>) -> Self {
        Self {
            name: name.into(),
            params,
            results,
            pointer_receiver: false,
        }
    }
}

/// A declared (named) type with its method set.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedType {
    /// Owning package; `None` for predeclared types like `error`.
    pub package: Option<String>,
    pub name: String,
    pub underlying: Type,
    pub methods: Vec<MethodSig>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Predeclared non-interface types: `string`, `int`, `bool`, ...
    Basic(String),
    Named(Arc<NamedType>),
    Interface(Vec<MethodSig>),
    Pointer(Box<Type>),
    Struct,
    /// A function's result list.
    Signature(Vec<Type>),
    /// The type of the predeclared `nil`.
    Nil,
    /// Anything the resolver could not type. Never error-capable.
    Unknown,
}

impl Type {
    pub fn basic(name: &str) -> Self {
        Self::Basic(name.to_string())
    }

    pub fn is_basic(&self, name: &str) -> bool {
        matches!(self, Self::Basic(n) if n == name)
    }

    /// The predeclared `error` interface: `interface { Error() string }`.
    pub fn universe_error() -> Self {
        Self::Named(Arc::new(NamedType {
            package: None,
            name: "error".to_string(),
            underlying: Type::Interface(vec![error_method()]),
            methods: Vec::new(),
        }))
    }

    /// Result types when this is a function signature.
    pub fn results(&self) -> Option<&[Type]> {
        match self {
            Self::Signature(results) => Some(results),
            _ => None,
        }
    }

    /// Method set of the type. `*T` sees methods declared on both `T` and `*T`;
    /// `T` only sees value-receiver methods.
    pub fn method_set(&self) -> Vec<&MethodSig> {
        match self {
            Self::Interface(methods) => methods.iter().collect(),
            Self::Named(named) => match &named.underlying {
                Self::Interface(methods) => methods.iter().collect(),
                _ => named.methods.iter().filter(|m| !m.pointer_receiver).collect(),
            },
            Self::Pointer(inner) => match inner.as_ref() {
                Self::Named(named) if !matches!(named.underlying, Self::Interface(_)) => {
                    named.methods.iter().collect()
                }
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }
}

fn error_method() -> MethodSig {
    MethodSig::new("Error", 0, vec![Type::basic("string")])
}

/// Decides whether a static type structurally implements the built-in
/// error interface. Built once per analyzer and shared.
#[derive(Debug, Clone)]
pub struct ErrorCapability {
    required: MethodSig,
}

impl ErrorCapability {
    pub fn new() -> Self {
        Self {
            required: error_method(),
        }
    }

    /// True if `ty`'s method set contains `Error() string`.
    pub fn is_satisfied_by(&self, ty: &Type) -> bool {
        ty.method_set().into_iter().any(|m| {
            m.name == self.required.name
                && m.params == self.required.params
                && m.results == self.required.results
        })
    }
}

impl Default for ErrorCapability {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, underlying: Type, methods: Vec<MethodSig>) -> Type {
        Type::Named(Arc::new(NamedType {
            package: Some("p".to_string()),
            name: name.to_string(),
            underlying,
            methods,
        }))
    }

    #[test]
    fn test_universe_error_is_capable() {
        assert!(ErrorCapability::new().is_satisfied_by(&Type::universe_error()));
    }

    #[test]
    fn test_basic_nil_unknown_are_not_capable() {
        let cap = ErrorCapability::new();
        assert!(!cap.is_satisfied_by(&Type::basic("string")));
        assert!(!cap.is_satisfied_by(&Type::Nil));
        assert!(!cap.is_satisfied_by(&Type::Unknown));
    }

    #[test]
    fn test_pointer_receiver_only_on_pointer() {
        let cap = ErrorCapability::new();
        let mut method = MethodSig::new("Error", 0, vec![Type::basic("string")]);
        method.pointer_receiver = true;
        let my_err = named("MyErr", Type::Struct, vec![method]);
        assert!(!cap.is_satisfied_by(&my_err));
        assert!(cap.is_satisfied_by(&Type::Pointer(Box::new(my_err))));
    }

    #[test]
    fn test_value_receiver_on_both() {
        let cap = ErrorCapability::new();
        let my_err = named(
            "MyErr",
            Type::Struct,
            vec![MethodSig::new("Error", 0, vec![Type::basic("string")])],
        );
        assert!(cap.is_satisfied_by(&my_err));
        assert!(cap.is_satisfied_by(&Type::Pointer(Box::new(my_err))));
    }

    #[test]
    fn test_wrong_signature_rejected() {
        let cap = ErrorCapability::new();
        let takes_arg = named(
            "E",
            Type::Struct,
            vec![MethodSig::new("Error", 1, vec![Type::basic("string")])],
        );
        let returns_int = named(
            "F",
            Type::Struct,
            vec![MethodSig::new("Error", 0, vec![Type::basic("int")])],
        );
        assert!(!cap.is_satisfied_by(&takes_arg));
        assert!(!cap.is_satisfied_by(&returns_int));
    }

    #[test]
    fn test_custom_interface_embedding_error_shape() {
        let cap = ErrorCapability::new();
        let iface = named(
            "Coded",
            Type::Interface(vec![
                MethodSig::new("Error", 0, vec![Type::basic("string")]),
                MethodSig::new("Code", 0, vec![Type::basic("int")]),
            ]),
            Vec::new(),
        );
        assert!(cap.is_satisfied_by(&iface));
    }
}
