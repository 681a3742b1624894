//! Go type descriptors and the interning type table.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index of a type in a [`TypeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of a Go type, as reported by `reflect.Kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UnsafePointer,
    Array,
    Slice,
    Map,
    Pointer,
    Struct,
    Interface,
    Func,
    Chan,
}

impl Kind {
    /// Go spelling of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Int8 => "int8",
            Kind::Int16 => "int16",
            Kind::Int32 => "int32",
            Kind::Int64 => "int64",
            Kind::Uint => "uint",
            Kind::Uint8 => "uint8",
            Kind::Uint16 => "uint16",
            Kind::Uint32 => "uint32",
            Kind::Uint64 => "uint64",
            Kind::Uintptr => "uintptr",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::Complex64 => "complex64",
            Kind::Complex128 => "complex128",
            Kind::String => "string",
            Kind::UnsafePointer => "unsafe.Pointer",
            Kind::Array => "array",
            Kind::Slice => "slice",
            Kind::Map => "map",
            Kind::Pointer => "ptr",
            Kind::Struct => "struct",
            Kind::Interface => "interface",
            Kind::Func => "func",
            Kind::Chan => "chan",
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            Kind::Int | Kind::Int8 | Kind::Int16 | Kind::Int32 | Kind::Int64
        )
    }

    pub fn is_unsigned(&self) -> bool {
        matches!(
            self,
            Kind::Uint | Kind::Uint8 | Kind::Uint16 | Kind::Uint32 | Kind::Uint64 | Kind::Uintptr
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Kind::Float32 | Kind::Float64)
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Kind::Complex64 | Kind::Complex128)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

/// A struct field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: TypeId,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub embedded: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
            embedded: false,
        }
    }

    /// An embedded field. Its name is the type's name.
    pub fn embedded(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            embedded: true,
            ..Self::new(name, ty)
        }
    }
}

/// An interface method. `ty` must be a func type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub ty: TypeId,
}

impl Method {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Underlying structure of a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UnsafePointer,
    Array {
        len: u64,
        elem: TypeId,
    },
    Slice {
        elem: TypeId,
    },
    Map {
        key: TypeId,
        value: TypeId,
    },
    Pointer {
        elem: TypeId,
    },
    Struct {
        #[serde(default)]
        fields: Vec<Field>,
    },
    Interface {
        #[serde(default)]
        methods: Vec<Method>,
    },
    Func {
        #[serde(default)]
        params: Vec<TypeId>,
        #[serde(default)]
        results: Vec<TypeId>,
        #[serde(default)]
        variadic: bool,
    },
    Chan {
        #[serde(default)]
        dir: ChanDir,
        elem: TypeId,
    },
}

impl Shape {
    pub fn kind(&self) -> Kind {
        match self {
            Shape::Bool => Kind::Bool,
            Shape::Int => Kind::Int,
            Shape::Int8 => Kind::Int8,
            Shape::Int16 => Kind::Int16,
            Shape::Int32 => Kind::Int32,
            Shape::Int64 => Kind::Int64,
            Shape::Uint => Kind::Uint,
            Shape::Uint8 => Kind::Uint8,
            Shape::Uint16 => Kind::Uint16,
            Shape::Uint32 => Kind::Uint32,
            Shape::Uint64 => Kind::Uint64,
            Shape::Uintptr => Kind::Uintptr,
            Shape::Float32 => Kind::Float32,
            Shape::Float64 => Kind::Float64,
            Shape::Complex64 => Kind::Complex64,
            Shape::Complex128 => Kind::Complex128,
            Shape::String => Kind::String,
            Shape::UnsafePointer => Kind::UnsafePointer,
            Shape::Array { .. } => Kind::Array,
            Shape::Slice { .. } => Kind::Slice,
            Shape::Map { .. } => Kind::Map,
            Shape::Pointer { .. } => Kind::Pointer,
            Shape::Struct { .. } => Kind::Struct,
            Shape::Interface { .. } => Kind::Interface,
            Shape::Func { .. } => Kind::Func,
            Shape::Chan { .. } => Kind::Chan,
        }
    }

    /// Types this shape refers to directly.
    pub fn refs(&self) -> Vec<TypeId> {
        match self {
            Shape::Array { elem, .. }
            | Shape::Slice { elem }
            | Shape::Pointer { elem }
            | Shape::Chan { elem, .. } => vec![*elem],
            Shape::Map { key, value } => vec![*key, *value],
            Shape::Struct { fields } => fields.iter().map(|f| f.ty).collect(),
            Shape::Interface { methods } => methods.iter().map(|m| m.ty).collect(),
            Shape::Func {
                params, results, ..
            } => params.iter().chain(results).copied().collect(),
            _ => Vec::new(),
        }
    }
}

/// A type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Type {
    /// Type name, empty for anonymous types.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Import path of the declaring package, empty for predeclared and anonymous types.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pkg_path: String,
    #[serde(flatten)]
    pub shape: Shape,
}

impl Type {
    pub fn anonymous(shape: Shape) -> Self {
        Self {
            name: String::new(),
            pkg_path: String::new(),
            shape,
        }
    }

    pub fn named(pkg_path: impl Into<String>, name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            pkg_path: pkg_path.into(),
            shape,
        }
    }

    pub fn kind(&self) -> Kind {
        self.shape.kind()
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    /// True for the language's own named types such as `int` or `error`.
    pub fn is_predeclared(&self) -> bool {
        self.is_named() && self.pkg_path.is_empty()
    }

    fn key(&self) -> TypeKey {
        if self.is_named() {
            TypeKey::Named {
                pkg_path: self.pkg_path.clone(),
                name: self.name.clone(),
            }
        } else {
            TypeKey::Anonymous(self.shape.clone())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum TypeKey {
    Named { pkg_path: String, name: String },
    Anonymous(Shape),
}

/// Error rebuilding a [`TypeTable`] from its serialized form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeTableError {
    #[error("type #{index} duplicates an earlier type")]
    Duplicate { index: usize },

    /// Only named types may be recursive, so an anonymous type must be
    /// declared after every type it refers to.
    #[error("anonymous type #{index} refers to {target}, which is not declared before it")]
    ForwardReference { index: usize, target: TypeId },
}

/// Interning table of type descriptors.
///
/// Interning makes type identity a matter of comparing [`TypeId`]s: named
/// types are keyed by package path and name, anonymous types by their shape.
///
/// ```
/// use golit_ir::{Shape, TypeTable};
///
/// let mut types = TypeTable::new();
/// let int = types.int();
/// let a = types.slice(int);
/// let b = types.slice(int);
/// assert_eq!(a, b);
/// assert_eq!(types.display(a), "[]int");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Type>", into = "Vec<Type>")]
pub struct TypeTable {
    types: IndexMap<TypeKey, Type>,
}

const PREDECLARED: &[(&str, Shape)] = &[
    ("bool", Shape::Bool),
    ("int", Shape::Int),
    ("int8", Shape::Int8),
    ("int16", Shape::Int16),
    ("int32", Shape::Int32),
    ("int64", Shape::Int64),
    ("uint", Shape::Uint),
    ("uint8", Shape::Uint8),
    ("uint16", Shape::Uint16),
    ("uint32", Shape::Uint32),
    ("uint64", Shape::Uint64),
    ("uintptr", Shape::Uintptr),
    ("float32", Shape::Float32),
    ("float64", Shape::Float64),
    ("complex64", Shape::Complex64),
    ("complex128", Shape::Complex128),
    ("string", Shape::String),
];

impl TypeTable {
    /// Create a table holding the predeclared types.
    pub fn new() -> Self {
        let mut table = Self {
            types: IndexMap::new(),
        };
        for (name, shape) in PREDECLARED {
            table.predeclared(name, shape.clone());
        }
        table.error();
        table.unsafe_pointer();
        table
    }

    /// Intern `ty`, returning the id of an identical existing type if present.
    ///
    /// A named type is identified by its package path and name alone; if one
    /// is already interned its shape is kept.
    pub fn intern(&mut self, ty: Type) -> TypeId {
        let entry = self.types.entry(ty.key());
        let index = entry.index();
        entry.or_insert(ty);
        TypeId::from_index(index)
    }

    pub fn get(&self, id: TypeId) -> Option<&Type> {
        self.types.get_index(id.index()).map(|(_, ty)| ty)
    }

    /// Look up a named type.
    pub fn lookup(&self, pkg_path: &str, name: &str) -> Option<TypeId> {
        let key = TypeKey::Named {
            pkg_path: pkg_path.to_string(),
            name: name.to_string(),
        };
        self.types.get_index_of(&key).map(TypeId::from_index)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &Type)> {
        self.types
            .values()
            .enumerate()
            .map(|(i, ty)| (TypeId::from_index(i), ty))
    }

    fn predeclared(&mut self, name: &str, shape: Shape) -> TypeId {
        self.intern(Type::named("", name, shape))
    }

    pub fn bool(&mut self) -> TypeId {
        self.predeclared("bool", Shape::Bool)
    }

    pub fn int(&mut self) -> TypeId {
        self.predeclared("int", Shape::Int)
    }

    pub fn int8(&mut self) -> TypeId {
        self.predeclared("int8", Shape::Int8)
    }

    pub fn int16(&mut self) -> TypeId {
        self.predeclared("int16", Shape::Int16)
    }

    pub fn int32(&mut self) -> TypeId {
        self.predeclared("int32", Shape::Int32)
    }

    pub fn int64(&mut self) -> TypeId {
        self.predeclared("int64", Shape::Int64)
    }

    pub fn uint(&mut self) -> TypeId {
        self.predeclared("uint", Shape::Uint)
    }

    pub fn uint8(&mut self) -> TypeId {
        self.predeclared("uint8", Shape::Uint8)
    }

    pub fn uint16(&mut self) -> TypeId {
        self.predeclared("uint16", Shape::Uint16)
    }

    pub fn uint32(&mut self) -> TypeId {
        self.predeclared("uint32", Shape::Uint32)
    }

    pub fn uint64(&mut self) -> TypeId {
        self.predeclared("uint64", Shape::Uint64)
    }

    pub fn uintptr(&mut self) -> TypeId {
        self.predeclared("uintptr", Shape::Uintptr)
    }

    pub fn float32(&mut self) -> TypeId {
        self.predeclared("float32", Shape::Float32)
    }

    pub fn float64(&mut self) -> TypeId {
        self.predeclared("float64", Shape::Float64)
    }

    pub fn complex64(&mut self) -> TypeId {
        self.predeclared("complex64", Shape::Complex64)
    }

    pub fn complex128(&mut self) -> TypeId {
        self.predeclared("complex128", Shape::Complex128)
    }

    pub fn string(&mut self) -> TypeId {
        self.predeclared("string", Shape::String)
    }

    /// The predeclared `error` interface.
    pub fn error(&mut self) -> TypeId {
        let string = self.string();
        let sig = self.func(vec![], vec![string], false);
        self.predeclared(
            "error",
            Shape::Interface {
                methods: vec![Method::new("Error", sig)],
            },
        )
    }

    /// `unsafe.Pointer`.
    pub fn unsafe_pointer(&mut self) -> TypeId {
        self.intern(Type::anonymous(Shape::UnsafePointer))
    }

    pub fn array(&mut self, len: u64, elem: TypeId) -> TypeId {
        self.intern(Type::anonymous(Shape::Array { len, elem }))
    }

    pub fn slice(&mut self, elem: TypeId) -> TypeId {
        self.intern(Type::anonymous(Shape::Slice { elem }))
    }

    pub fn map(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.intern(Type::anonymous(Shape::Map { key, value }))
    }

    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        self.intern(Type::anonymous(Shape::Pointer { elem }))
    }

    pub fn struct_of(&mut self, fields: Vec<Field>) -> TypeId {
        self.intern(Type::anonymous(Shape::Struct { fields }))
    }

    pub fn interface_of(&mut self, methods: Vec<Method>) -> TypeId {
        self.intern(Type::anonymous(Shape::Interface { methods }))
    }

    pub fn func(&mut self, params: Vec<TypeId>, results: Vec<TypeId>, variadic: bool) -> TypeId {
        self.intern(Type::anonymous(Shape::Func {
            params,
            results,
            variadic,
        }))
    }

    pub fn chan(&mut self, dir: ChanDir, elem: TypeId) -> TypeId {
        self.intern(Type::anonymous(Shape::Chan { dir, elem }))
    }

    /// Declare a named type.
    pub fn named(&mut self, pkg_path: &str, name: &str, shape: Shape) -> TypeId {
        self.intern(Type::named(pkg_path, name, shape))
    }

    /// Declare a named type whose shape refers to the type itself.
    ///
    /// ```
    /// use golit_ir::{Field, Shape, TypeTable};
    ///
    /// let mut types = TypeTable::new();
    /// let node = types.named_recursive("example.com/list", "Node", |types, node| {
    ///     let next = types.pointer(node);
    ///     Shape::Struct { fields: vec![Field::new("Next", next)] }
    /// });
    /// assert_eq!(types.display(node), "list.Node");
    /// ```
    pub fn named_recursive<F>(&mut self, pkg_path: &str, name: &str, build: F) -> TypeId
    where
        F: FnOnce(&mut Self, TypeId) -> Shape,
    {
        if let Some(id) = self.lookup(pkg_path, name) {
            return id;
        }
        let id = self.named(pkg_path, name, Shape::Struct { fields: vec![] });
        let shape = build(self, id);
        if let Some((_, ty)) = self.types.get_index_mut(id.index()) {
            ty.shape = shape;
        }
        id
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<Type>> for TypeTable {
    type Error = TypeTableError;

    fn try_from(types: Vec<Type>) -> Result<Self, Self::Error> {
        let mut map = IndexMap::with_capacity(types.len());
        for (index, ty) in types.into_iter().enumerate() {
            if !ty.is_named() {
                if let Some(target) = ty.shape.refs().into_iter().find(|t| t.index() >= index) {
                    return Err(TypeTableError::ForwardReference { index, target });
                }
            }
            if map.insert(ty.key(), ty).is_some() {
                return Err(TypeTableError::Duplicate { index });
            }
        }
        Ok(Self { types: map })
    }
}

impl From<TypeTable> for Vec<Type> {
    fn from(table: TypeTable) -> Self {
        table.types.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predeclared_are_interned_once() {
        let mut types = TypeTable::new();
        let before = types.len();
        let int = types.int();
        assert_eq!(types.int(), int);
        assert_eq!(types.len(), before);

        let ty = types.get(int).unwrap();
        assert!(ty.is_predeclared());
        assert_eq!(ty.kind(), Kind::Int);
    }

    #[test]
    fn test_named_identity_ignores_shape() {
        let mut types = TypeTable::new();
        let a = types.named("example.com/a", "T", Shape::Int);
        let b = types.named("example.com/a", "T", Shape::String);
        let c = types.named("example.com/b", "T", Shape::Int);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(types.get(a).unwrap().kind(), Kind::Int);
    }

    #[test]
    fn test_anonymous_identity_is_structural() {
        let mut types = TypeTable::new();
        let int = types.int();
        let string = types.string();
        let m1 = types.map(string, int);
        let m2 = types.map(string, int);
        let m3 = types.map(int, string);
        assert_eq!(m1, m2);
        assert_ne!(m1, m3);
    }

    #[test]
    fn test_named_recursive() {
        let mut types = TypeTable::new();
        let node = types.named_recursive("example.com/list", "Node", |types, node| {
            let next = types.pointer(node);
            Shape::Struct {
                fields: vec![Field::new("next", next)],
            }
        });
        let Shape::Struct { fields } = &types.get(node).unwrap().shape else {
            panic!("expected struct shape");
        };
        let next = types.get(fields[0].ty).unwrap();
        assert_eq!(next.shape, Shape::Pointer { elem: node });
    }

    #[test]
    fn test_serde_rebuilds_index() {
        let mut types = TypeTable::new();
        let int = types.int();
        let foo = types.named("example.com/x", "Foo", Shape::Int32);
        let slice = types.slice(foo);

        let json = serde_json::to_string(&types).unwrap();
        let mut back: TypeTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, types);
        assert_eq!(back.int(), int);
        assert_eq!(back.slice(foo), slice);
        assert_eq!(back.lookup("example.com/x", "Foo"), Some(foo));
    }

    #[test]
    fn test_serde_shape_format() {
        let ty: Type = serde_json::from_str(
            r#"{"name": "Foo", "pkg_path": "example.com/x", "kind": "slice", "elem": 0}"#,
        )
        .unwrap();
        assert_eq!(ty.shape, Shape::Slice { elem: TypeId(0) });
        assert_eq!(ty.kind(), Kind::Slice);
    }

    #[test]
    fn test_serde_rejects_self_referential_anonymous_types() {
        let types = vec![Type::anonymous(Shape::Slice { elem: TypeId(0) })];
        assert_eq!(
            TypeTable::try_from(types),
            Err(TypeTableError::ForwardReference {
                index: 0,
                target: TypeId(0),
            })
        );

        let json = r#"[{"name": "int", "kind": "int"}, {"kind": "map", "key": 0, "value": 2}, {"kind": "slice", "elem": 0}]"#;
        let err = serde_json::from_str::<TypeTable>(json).unwrap_err();
        assert!(err.to_string().contains("not declared before it"));
    }

    #[test]
    fn test_serde_keeps_recursive_named_types() {
        let mut types = TypeTable::new();
        let node = types.named_recursive("example.com/list", "Node", |types, node| {
            let next = types.pointer(node);
            Shape::Struct {
                fields: vec![Field::new("next", next)],
            }
        });

        let json = serde_json::to_string(&types).unwrap();
        let back: TypeTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.display(node), "list.Node");
    }

    #[test]
    fn test_serde_rejects_duplicates() {
        let json = r#"[{"name": "int", "kind": "int"}, {"name": "int", "kind": "int"}]"#;
        let err = serde_json::from_str::<TypeTable>(json).unwrap_err();
        assert!(err.to_string().contains("duplicates"));
    }
}
