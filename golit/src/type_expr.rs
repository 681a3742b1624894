//! Type expressions for named and anonymous types.

use golit_codegen::{Expr, FieldDecl, MethodDecl, Signature};
use golit_core::{Options, is_exported};
use golit_ir::{Shape, Type, TypeId, TypeTable};

use crate::encoder::Encoded;
use crate::error::{Error, Result};

pub(crate) fn lookup(types: &TypeTable, id: TypeId) -> Result<&Type> {
    types
        .get(id)
        .ok_or_else(|| Error::malformed(format!("unknown type {id}")))
}

/// Build the expression naming type `id` as seen from `opt`'s package.
///
/// Named types become `Name` or `pkg.Name`; anonymous types are spelled out.
/// The result has no expression when `exported_only` is set and the type
/// cannot be written without an unexported name.
pub(crate) fn type_expr(types: &TypeTable, id: TypeId, opt: &Options) -> Result<Encoded> {
    let ty = lookup(types, id)?;
    if ty.is_named() {
        return named(ty, opt);
    }

    let mut out = Encoded::default();
    let expr = match &ty.shape {
        Shape::Array { len, elem } => {
            let Some(elem) = out.take(type_expr(types, *elem, opt)?) else {
                return Ok(out);
            };
            Expr::array_of(*len, elem)
        }
        Shape::Slice { elem } => {
            let Some(elem) = out.take(type_expr(types, *elem, opt)?) else {
                return Ok(out);
            };
            Expr::slice_of(elem)
        }
        Shape::Pointer { elem } => {
            let Some(elem) = out.take(type_expr(types, *elem, opt)?) else {
                return Ok(out);
            };
            Expr::star(elem)
        }
        Shape::Chan { dir, elem } => {
            let Some(elem) = out.take(type_expr(types, *elem, opt)?) else {
                return Ok(out);
            };
            Expr::chan_of(*dir, elem)
        }
        Shape::Map { key, value } => {
            let key = out.take(type_expr(types, *key, opt)?);
            let value = out.take(type_expr(types, *value, opt)?);
            match (key, value) {
                (Some(key), Some(value)) => Expr::map_of(key, value),
                _ => return Ok(out),
            }
        }
        Shape::Struct { fields } => {
            let mut decls = Vec::with_capacity(fields.len());
            for field in fields {
                let field_ty = type_expr(types, field.ty, opt)?;
                if opt.exported_only && field_ty.requires_unexported {
                    return Ok(Encoded::omitted());
                }
                let Some(field_ty) = out.take(field_ty) else {
                    return Ok(out);
                };
                decls.push(FieldDecl {
                    name: (!field.embedded).then(|| field.name.clone()),
                    ty: field_ty,
                });
            }
            Expr::StructType(decls)
        }
        Shape::Interface { methods } => {
            let mut decls = Vec::with_capacity(methods.len());
            for method in methods {
                let Some(sig) = signature(types, method.ty, opt, &mut out)? else {
                    return Ok(out);
                };
                decls.push(MethodDecl {
                    name: method.name.clone(),
                    sig,
                });
            }
            Expr::InterfaceType(decls)
        }
        Shape::Func { .. } => match signature(types, id, opt, &mut out)? {
            Some(sig) => Expr::FuncType(sig),
            None => return Ok(out),
        },
        Shape::UnsafePointer => {
            out.imports.add("unsafe", "unsafe");
            Expr::selector("unsafe", "Pointer")
        }
        // Anonymous basic types do not occur in practice; spell the kind.
        shape => Expr::ident(shape.kind().as_str()),
    };
    out.expr = Some(expr);
    Ok(out)
}

fn named(ty: &Type, opt: &Options) -> Result<Encoded> {
    let mut out = Encoded::default();
    let expr = match opt.qualifier(&ty.pkg_path)? {
        Some(qualifier) => {
            out.imports.add(&ty.pkg_path, &qualifier);
            out.requires_unexported = !is_exported(&ty.name);
            Expr::selector(qualifier, &ty.name)
        }
        None => Expr::ident(&ty.name),
    };
    out.expr = Some(expr);
    Ok(out)
}

/// Signature of func type `id`, with flags and imports collected into `out`.
fn signature(
    types: &TypeTable,
    id: TypeId,
    opt: &Options,
    out: &mut Encoded,
) -> Result<Option<Signature>> {
    let Shape::Func {
        params,
        results,
        variadic,
    } = &lookup(types, id)?.shape
    else {
        return Err(Error::malformed(format!(
            "method type {} is not a function",
            types.display(id)
        )));
    };

    let mut sig = Signature {
        variadic: *variadic,
        ..Signature::default()
    };
    for (i, param) in params.iter().enumerate() {
        let mut param = *param;
        if *variadic && i + 1 == params.len() {
            if let Shape::Slice { elem } = lookup(types, param)?.shape {
                param = elem;
            }
        }
        let Some(expr) = out.take(type_expr(types, param, opt)?) else {
            return Ok(None);
        };
        sig.params.push(expr);
    }
    for result in results {
        let Some(expr) = out.take(type_expr(types, *result, opt)?) else {
            return Ok(None);
        };
        sig.results.push(expr);
    }
    Ok(Some(sig))
}
