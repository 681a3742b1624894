//! Syntax tree for Go expressions.
//!
//! The tree covers what a value literal can contain: identifiers, basic
//! literals, composite literals, conversions, helper calls and type
//! expressions. It is rendered to text by a [`Renderer`](crate::Renderer).

pub use golit_ir::ChanDir;

/// Kind of a basic literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LitKind {
    Int,
    Float,
    /// A parenthesized complex constant such as `(1+2i)`.
    Complex,
    String,
}

impl LitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LitKind::Int => "int",
            LitKind::Float => "float",
            LitKind::Complex => "complex",
            LitKind::String => "string",
        }
    }
}

/// A field of a struct type expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// `None` for an embedded field.
    pub name: Option<String>,
    pub ty: Expr,
}

/// A method of an interface type expression.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub sig: Signature,
}

/// Parameter and result types of a function. Names are never known.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    pub params: Vec<Expr>,
    pub results: Vec<Expr>,
    /// The last parameter is `...T`; it holds `T` itself.
    pub variadic: bool,
}

/// An element of a composite literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Positional(Expr),
    KeyValue { key: Expr, value: Expr },
}

/// A Go expression or type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),
    /// `pkg.Name`
    Selector {
        pkg: String,
        name: String,
    },
    BasicLit {
        kind: LitKind,
        value: String,
    },
    Call {
        fun: Box<Expr>,
        args: Vec<Expr>,
    },
    Paren(Box<Expr>),
    /// `&x`
    AddressOf(Box<Expr>),
    /// `x.(T)`
    TypeAssert {
        expr: Box<Expr>,
        ty: Box<Expr>,
    },
    Composite {
        ty: Box<Expr>,
        elems: Vec<Element>,
    },
    /// `[N]T`, or `[]T` when `len` is `None`.
    ArrayType {
        len: Option<u64>,
        elem: Box<Expr>,
    },
    MapType {
        key: Box<Expr>,
        value: Box<Expr>,
    },
    /// `*T`
    Star(Box<Expr>),
    StructType(Vec<FieldDecl>),
    InterfaceType(Vec<MethodDecl>),
    FuncType(Signature),
    ChanType {
        dir: ChanDir,
        elem: Box<Expr>,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident(name.into())
    }

    pub fn nil() -> Self {
        Expr::ident("nil")
    }

    pub fn selector(pkg: impl Into<String>, name: impl Into<String>) -> Self {
        Expr::Selector {
            pkg: pkg.into(),
            name: name.into(),
        }
    }

    /// `pkg.name`, or `name` alone when there is no qualifier.
    pub fn qualified(pkg: Option<&str>, name: impl Into<String>) -> Self {
        match pkg {
            Some(pkg) => Expr::selector(pkg, name),
            None => Expr::ident(name),
        }
    }

    pub fn lit(kind: LitKind, value: impl Into<String>) -> Self {
        Expr::BasicLit {
            kind,
            value: value.into(),
        }
    }

    pub fn call(fun: Expr, args: Vec<Expr>) -> Self {
        Expr::Call {
            fun: Box::new(fun),
            args,
        }
    }

    /// A conversion `T(arg)`.
    ///
    /// The type is parenthesized where Go would otherwise misparse it, as in
    /// `(*T)(nil)`, `(func())(nil)` and `(<-chan int)(nil)`.
    pub fn convert(ty: Expr, arg: Expr) -> Self {
        let fun = if ty.needs_parens_in_conversion() {
            Expr::Paren(Box::new(ty))
        } else {
            ty
        };
        Expr::call(fun, vec![arg])
    }

    pub fn address_of(expr: Expr) -> Self {
        Expr::AddressOf(Box::new(expr))
    }

    pub fn type_assert(expr: Expr, ty: Expr) -> Self {
        Expr::TypeAssert {
            expr: Box::new(expr),
            ty: Box::new(ty),
        }
    }

    pub fn composite(ty: Expr, elems: Vec<Element>) -> Self {
        Expr::Composite {
            ty: Box::new(ty),
            elems,
        }
    }

    pub fn slice_of(elem: Expr) -> Self {
        Expr::ArrayType {
            len: None,
            elem: Box::new(elem),
        }
    }

    pub fn array_of(len: u64, elem: Expr) -> Self {
        Expr::ArrayType {
            len: Some(len),
            elem: Box::new(elem),
        }
    }

    pub fn map_of(key: Expr, value: Expr) -> Self {
        Expr::MapType {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn star(elem: Expr) -> Self {
        Expr::Star(Box::new(elem))
    }

    pub fn chan_of(dir: ChanDir, elem: Expr) -> Self {
        Expr::ChanType {
            dir,
            elem: Box::new(elem),
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Expr::Composite { .. })
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Expr::Ident(name) if name == "nil")
    }

    fn needs_parens_in_conversion(&self) -> bool {
        matches!(
            self,
            Expr::Star(_)
                | Expr::FuncType(_)
                | Expr::ChanType {
                    dir: ChanDir::Recv,
                    ..
                }
        )
    }
}

impl Element {
    pub fn key_value(key: Expr, value: Expr) -> Self {
        Element::KeyValue { key, value }
    }
}

impl From<Expr> for Element {
    fn from(expr: Expr) -> Self {
        Element::Positional(expr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_parenthesizes_pointer_types() {
        let expr = Expr::convert(Expr::star(Expr::ident("T")), Expr::nil());
        let Expr::Call { fun, args } = expr else {
            panic!("expected call");
        };
        assert!(matches!(*fun, Expr::Paren(_)));
        assert_eq!(args, vec![Expr::nil()]);
    }

    #[test]
    fn test_convert_leaves_named_types() {
        let expr = Expr::convert(Expr::ident("int32"), Expr::lit(LitKind::Int, "1"));
        let Expr::Call { fun, .. } = expr else {
            panic!("expected call");
        };
        assert_eq!(*fun, Expr::ident("int32"));
    }

    #[test]
    fn test_convert_channel_directions() {
        let recv = Expr::convert(Expr::chan_of(ChanDir::Recv, Expr::ident("int")), Expr::nil());
        let send = Expr::convert(Expr::chan_of(ChanDir::Send, Expr::ident("int")), Expr::nil());
        assert!(matches!(recv, Expr::Call { fun, .. } if matches!(*fun, Expr::Paren(_))));
        assert!(matches!(send, Expr::Call { fun, .. } if matches!(*fun, Expr::ChanType { .. })));
    }

    #[test]
    fn test_qualified() {
        assert_eq!(Expr::qualified(None, "foo"), Expr::ident("foo"));
        assert_eq!(
            Expr::qualified(Some("pkg"), "Foo"),
            Expr::selector("pkg", "Foo")
        );
    }
}
