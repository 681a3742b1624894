//! Go source of the address helper package.
//!
//! Generated literals call these helpers where Go syntax cannot take an
//! address directly, e.g. `golit.Addr(int32(1)).(*int32)`.

use crate::builder::CodeBuilder;

/// Name of the helper returning a pointer to a copy of a value.
pub const ADDR: &str = "Addr";

/// Name of the helper returning a pointer to an interface-typed slot.
pub const ADDR_INTERFACE: &str = "AddrInterface";

/// Generate the helper package source for package `package_name`.
///
/// Both helpers place the value in a one-element slice, which makes it
/// addressable, and return the address of that element.
pub fn helpers_source(package_name: &str) -> String {
    CodeBuilder::go()
        .comment(&format!(
            "Package {package_name} provides the helpers used by generated Go literals."
        ))
        .line(&format!("package {package_name}"))
        .blank()
        .line("import \"reflect\"")
        .blank()
        .comment(&format!(
            "{ADDR} returns a pointer to a copy of v. Since &\"hello\" is illegal, it is written as:\n\n\t{package_name}.{ADDR}(\"hello\").(*string)"
        ))
        .block_with_close(&format!("func {ADDR}(v interface{{}}) interface{{}} {{"), "}", |b| {
            b.line("vv := reflect.ValueOf(v)")
                .line("slice := reflect.MakeSlice(reflect.SliceOf(vv.Type()), 1, 1)")
                .line("slice.Index(0).Set(vv)")
                .line("return slice.Index(0).Addr().Interface()")
        })
        .blank()
        .comment(&format!(
            "{ADDR_INTERFACE} returns a pointer to an interface slot holding v. The slot's\ntype is the element type of pointerToType, for example:\n\n\t{package_name}.{ADDR_INTERFACE}(&MyValue{{}}, (*MyInterface)(nil)).(*MyInterface)"
        ))
        .block_with_close(
            &format!("func {ADDR_INTERFACE}(v, pointerToType interface{{}}) interface{{}} {{"),
            "}",
            |b| {
                b.line("sliceType := reflect.SliceOf(reflect.TypeOf(pointerToType).Elem())")
                    .line("slice := reflect.MakeSlice(sliceType, 1, 1)")
                    .block_with_close("if v != nil {", "}", |b| {
                        b.line("slice.Index(0).Set(reflect.ValueOf(v))")
                    })
                    .line("return slice.Index(0).Addr().Interface()")
            },
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helpers_source() {
        let src = helpers_source("golit");
        insta::assert_snapshot!(src, @r#"
// Package golit provides the helpers used by generated Go literals.
package golit

import "reflect"

// Addr returns a pointer to a copy of v. Since &"hello" is illegal, it is written as:
//
// 	golit.Addr("hello").(*string)
func Addr(v interface{}) interface{} {
	vv := reflect.ValueOf(v)
	slice := reflect.MakeSlice(reflect.SliceOf(vv.Type()), 1, 1)
	slice.Index(0).Set(vv)
	return slice.Index(0).Addr().Interface()
}

// AddrInterface returns a pointer to an interface slot holding v. The slot's
// type is the element type of pointerToType, for example:
//
// 	golit.AddrInterface(&MyValue{}, (*MyInterface)(nil)).(*MyInterface)
func AddrInterface(v, pointerToType interface{}) interface{} {
	sliceType := reflect.SliceOf(reflect.TypeOf(pointerToType).Elem())
	slice := reflect.MakeSlice(sliceType, 1, 1)
	if v != nil {
		slice.Index(0).Set(reflect.ValueOf(v))
	}
	return slice.Index(0).Addr().Interface()
}
"#);
    }

    #[test]
    fn test_helpers_source_package_name() {
        let src = helpers_source("lit");
        assert!(src.contains("package lit\n"));
        assert!(src.contains("lit.Addr(\"hello\")"));
    }
}
