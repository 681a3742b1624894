//! Go `%T`-style type strings, used in diagnostics.

use std::fmt::Write;

use crate::types::{ChanDir, Shape, TypeId, TypeTable};

impl TypeTable {
    /// Render a type the way Go's `%T` verb does, e.g. `map[string]pkg.T`.
    ///
    /// Foreign types are qualified with the last element of their import path.
    pub fn display(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, id);
        out
    }

    fn write_type(&self, out: &mut String, id: TypeId) {
        let Some(ty) = self.get(id) else {
            let _ = write!(out, "<unknown type {id}>");
            return;
        };

        if ty.is_named() {
            if !ty.pkg_path.is_empty() {
                out.push_str(package_base(&ty.pkg_path));
                out.push('.');
            }
            out.push_str(&ty.name);
            return;
        }

        match &ty.shape {
            Shape::Array { len, elem } => {
                let _ = write!(out, "[{len}]");
                self.write_type(out, *elem);
            }
            Shape::Slice { elem } => {
                out.push_str("[]");
                self.write_type(out, *elem);
            }
            Shape::Map { key, value } => {
                out.push_str("map[");
                self.write_type(out, *key);
                out.push(']');
                self.write_type(out, *value);
            }
            Shape::Pointer { elem } => {
                out.push('*');
                self.write_type(out, *elem);
            }
            Shape::Struct { fields } => {
                if fields.is_empty() {
                    out.push_str("struct {}");
                    return;
                }
                out.push_str("struct { ");
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    if !field.embedded {
                        out.push_str(&field.name);
                        out.push(' ');
                    }
                    self.write_type(out, field.ty);
                }
                out.push_str(" }");
            }
            Shape::Interface { methods } => {
                if methods.is_empty() {
                    out.push_str("interface {}");
                    return;
                }
                out.push_str("interface { ");
                for (i, method) in methods.iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    out.push_str(&method.name);
                    self.write_signature(out, method.ty);
                }
                out.push_str(" }");
            }
            Shape::Func { .. } => {
                out.push_str("func");
                self.write_signature(out, id);
            }
            Shape::Chan { dir, elem } => {
                out.push_str(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                self.write_type(out, *elem);
            }
            shape => out.push_str(shape.kind().as_str()),
        }
    }

    fn write_signature(&self, out: &mut String, id: TypeId) {
        let Some(Shape::Func {
            params,
            results,
            variadic,
        }) = self.get(id).map(|ty| &ty.shape)
        else {
            out.push_str("(?)");
            return;
        };

        out.push('(');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if *variadic && i + 1 == params.len() {
                out.push_str("...");
                match self.get(*param).map(|ty| &ty.shape) {
                    Some(Shape::Slice { elem }) => self.write_type(out, *elem),
                    _ => self.write_type(out, *param),
                }
            } else {
                self.write_type(out, *param);
            }
        }
        out.push(')');

        match results.as_slice() {
            [] => {}
            [single] => {
                out.push(' ');
                self.write_type(out, *single);
            }
            many => {
                out.push_str(" (");
                for (i, result) in many.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_type(out, *result);
                }
                out.push(')');
            }
        }
    }
}

/// Last element of an import path, the assumed package name.
pub fn package_base(pkg_path: &str) -> &str {
    pkg_path.rsplit('/').next().unwrap_or(pkg_path)
}

#[cfg(test)]
mod tests {
    use crate::types::{Field, Method};

    use super::*;

    #[test]
    fn test_display_named() {
        let mut types = TypeTable::new();
        let int = types.int();
        let t = types.named("github.com/hexops/valast", "unexportedInt", Shape::Int);
        let string = types.string();
        let m = types.map(string, t);

        assert_eq!(types.display(int), "int");
        assert_eq!(types.display(t), "valast.unexportedInt");
        assert_eq!(types.display(m), "map[string]valast.unexportedInt");
    }

    #[test]
    fn test_display_composites() {
        let mut types = TypeTable::new();
        let int = types.int();
        let string = types.string();
        let arr = types.array(3, int);
        let ptr = types.pointer(arr);
        let empty = types.struct_of(vec![]);
        let st = types.struct_of(vec![Field::new("A", int), Field::new("b", string)]);
        let any = types.interface_of(vec![]);
        let recv = types.chan(ChanDir::Recv, int);
        let unsafe_ptr = types.unsafe_pointer();

        assert_eq!(types.display(ptr), "*[3]int");
        assert_eq!(types.display(empty), "struct {}");
        assert_eq!(types.display(st), "struct { A int; b string }");
        assert_eq!(types.display(any), "interface {}");
        assert_eq!(types.display(recv), "<-chan int");
        assert_eq!(types.display(unsafe_ptr), "unsafe.Pointer");
    }

    #[test]
    fn test_display_funcs() {
        let mut types = TypeTable::new();
        let int = types.int();
        let string = types.string();
        let error = types.error();
        let strings = types.slice(string);

        let f = types.func(vec![int, strings], vec![string, error], true);
        assert_eq!(types.display(f), "func(int, ...string) (string, error)");

        let g = types.func(vec![], vec![int], false);
        let i = types.interface_of(vec![Method::new("Len", g)]);
        assert_eq!(types.display(i), "interface { Len() int }");
    }

    #[test]
    fn test_package_base() {
        assert_eq!(package_base("fmt"), "fmt");
        assert_eq!(package_base("net/http"), "http");
    }
}
