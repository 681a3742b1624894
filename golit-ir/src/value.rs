//! Captured Go values.

use serde::{Deserialize, Serialize};

use crate::{heap::SlotId, types::TypeId};

/// A captured value.
///
/// `Nil` stands for the absence of a value, such as the untyped nil passed at
/// the root or held by a nil interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    #[default]
    Nil,
    Typed { ty: TypeId, data: Data },
}

/// Kind-specific payload of a [`Value`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Data {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex { re: f64, im: f64 },
    String(String),
    Array(Vec<Value>),
    /// `None` is a nil slice.
    Slice(Option<Vec<Value>>),
    /// `None` is a nil map.
    Map(Option<Vec<MapEntry>>),
    /// `None` is a nil pointer.
    Pointer(Option<SlotId>),
    /// Field values in declaration order.
    Struct(Vec<Value>),
    Interface(Box<Value>),
    Func { is_nil: bool },
    Chan { is_nil: bool },
    UnsafePointer(u64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEntry {
    pub key: Value,
    pub value: Value,
}

impl MapEntry {
    pub fn new(key: Value, value: Value) -> Self {
        Self { key, value }
    }
}

impl Value {
    pub fn typed(ty: TypeId, data: Data) -> Self {
        Value::Typed { ty, data }
    }

    pub fn ty(&self) -> Option<TypeId> {
        match self {
            Value::Nil => None,
            Value::Typed { ty, .. } => Some(*ty),
        }
    }

    pub fn data(&self) -> Option<&Data> {
        match self {
            Value::Nil => None,
            Value::Typed { data, .. } => Some(data),
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Reports whether the value is its type's zero value, as
    /// `reflect.Value.IsZero` does.
    ///
    /// Floats are compared bitwise, so negative zero is not zero.
    ///
    /// ```
    /// use golit_ir::{Data, TypeTable, Value};
    ///
    /// let mut types = TypeTable::new();
    /// let f = types.float64();
    /// assert!(Value::typed(f, Data::Float(0.0)).is_zero());
    /// assert!(!Value::typed(f, Data::Float(-0.0)).is_zero());
    /// ```
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Nil => true,
            Value::Typed { data, .. } => data.is_zero(),
        }
    }
}

impl Data {
    pub fn is_zero(&self) -> bool {
        match self {
            Data::Bool(b) => !b,
            Data::Int(i) => *i == 0,
            Data::Uint(u) => *u == 0,
            Data::Float(f) => f.to_bits() == 0,
            Data::Complex { re, im } => re.to_bits() == 0 && im.to_bits() == 0,
            Data::String(s) => s.is_empty(),
            Data::Array(elems) | Data::Struct(elems) => elems.iter().all(Value::is_zero),
            Data::Slice(elems) => elems.is_none(),
            Data::Map(entries) => entries.is_none(),
            Data::Pointer(slot) => slot.is_none(),
            Data::Interface(held) => held.is_nil(),
            Data::Func { is_nil } | Data::Chan { is_nil } => *is_nil,
            Data::UnsafePointer(addr) => *addr == 0,
        }
    }

    /// Short name of the payload variant, for diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Data::Bool(_) => "bool",
            Data::Int(_) => "int",
            Data::Uint(_) => "uint",
            Data::Float(_) => "float",
            Data::Complex { .. } => "complex",
            Data::String(_) => "string",
            Data::Array(_) => "array",
            Data::Slice(_) => "slice",
            Data::Map(_) => "map",
            Data::Pointer(_) => "pointer",
            Data::Struct(_) => "struct",
            Data::Interface(_) => "interface",
            Data::Func { .. } => "func",
            Data::Chan { .. } => "chan",
            Data::UnsafePointer(_) => "unsafe_pointer",
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::types::TypeTable;

    use super::*;

    #[test]
    fn test_is_zero_scalars() {
        let mut types = TypeTable::new();
        let int = types.int();
        let c = types.complex128();

        assert!(Value::Nil.is_zero());
        assert!(Value::typed(int, Data::Int(0)).is_zero());
        assert!(!Value::typed(int, Data::Int(-1)).is_zero());
        assert!(Value::typed(c, Data::Complex { re: 0.0, im: 0.0 }).is_zero());
        assert!(!Value::typed(c, Data::Complex { re: 0.0, im: -0.0 }).is_zero());
    }

    #[test]
    fn test_is_zero_containers() {
        let mut types = TypeTable::new();
        let int = types.int();
        let s = types.slice(int);
        let any = types.interface_of(vec![]);

        assert!(Value::typed(s, Data::Slice(None)).is_zero());
        assert!(!Value::typed(s, Data::Slice(Some(vec![]))).is_zero());
        assert!(Data::Struct(vec![Value::typed(int, Data::Int(0))]).is_zero());
        assert!(!Data::Array(vec![Value::typed(int, Data::Int(2))]).is_zero());
        assert!(Value::typed(any, Data::Interface(Box::new(Value::Nil))).is_zero());
        assert!(
            !Value::typed(
                any,
                Data::Interface(Box::new(Value::typed(int, Data::Int(0))))
            )
            .is_zero()
        );
        assert!(Data::Func { is_nil: true }.is_zero());
        assert!(!Data::Chan { is_nil: false }.is_zero());
    }

    #[test]
    fn test_serde_format() {
        let value: Value = serde_json::from_str(
            r#"{"typed": {"ty": 3, "data": {"slice": [{"typed": {"ty": 1, "data": {"int": 7}}}, "nil"]}}}"#,
        )
        .unwrap();
        let Value::Typed {
            data: Data::Slice(Some(elems)),
            ..
        } = value
        else {
            panic!("expected slice");
        };
        assert_eq!(elems.len(), 2);
        assert!(elems[1].is_nil());
    }
}
