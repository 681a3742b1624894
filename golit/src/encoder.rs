//! Value to expression conversion.

use golit_codegen::helpers::{ADDR, ADDR_INTERFACE};
use golit_codegen::literal::{format_complex, format_float, prefers_raw, quote, raw};
use golit_codegen::{Element, Expr, GoRenderer, Imports, LitKind, RenderOptions, Renderer};
use golit_core::{Options, is_exported};
use golit_ir::{Data, Field, Kind, MapEntry, Shape, SlotId, Snapshot, Type, TypeId, Value};

use crate::cycle::CycleGuard;
use crate::error::{Error, Result};
use crate::ordering::KeyOrder;
use crate::type_expr::{lookup, type_expr};

/// Result of converting a value or a type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Encoded {
    /// The expression, absent when the value was omitted.
    pub expr: Option<Expr>,
    /// The expression names an identifier not exported to the target package.
    pub requires_unexported: bool,
    /// Some part of the value was dropped because it was not exported.
    pub omitted_unexported: bool,
    /// Packages the expression refers to.
    pub imports: Imports,
}

impl Encoded {
    pub(crate) fn new(expr: Expr) -> Self {
        Self {
            expr: Some(expr),
            ..Self::default()
        }
    }

    /// An omitted value: no expression, flagged as needing unexported names.
    pub(crate) fn omitted() -> Self {
        Self {
            requires_unexported: true,
            omitted_unexported: true,
            ..Self::default()
        }
    }

    /// Fold the flags and imports of `child` into `self` and hand back its
    /// expression.
    pub(crate) fn take(&mut self, child: Encoded) -> Option<Expr> {
        self.requires_unexported |= child.requires_unexported;
        self.omitted_unexported |= child.omitted_unexported;
        self.imports.merge(&child.imports);
        child.expr
    }

    fn with_expr(mut self, expr: Expr) -> Self {
        self.expr = Some(expr);
        self
    }
}

/// Converts values of one snapshot into Go expressions.
///
/// The encoder tracks the pointers on the current path to cut cycles, so a
/// single encoder must not be shared between threads; create one per call.
#[derive(Debug)]
pub struct Encoder<'a> {
    snapshot: &'a Snapshot,
    guard: CycleGuard,
}

impl<'a> Encoder<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self {
            snapshot,
            guard: CycleGuard::new(),
        }
    }

    /// Convert `value` to an expression as seen from the package in `opt`.
    pub fn encode(&mut self, value: &Value, opt: &Options) -> Result<Encoded> {
        let Value::Typed { ty: id, data } = value else {
            return Ok(Encoded::new(Expr::nil()));
        };
        let ty = self.ty(*id)?;

        match (&ty.shape, data) {
            (Shape::Bool, Data::Bool(b)) => {
                let lit = Expr::ident(if *b { "true" } else { "false" });
                self.scalar(*id, ty, lit, opt)
            }
            (shape, Data::Int(i)) if shape.kind().is_signed() => {
                self.scalar(*id, ty, Expr::lit(LitKind::Int, i.to_string()), opt)
            }
            (shape, Data::Uint(u)) if shape.kind().is_unsigned() => {
                self.scalar(*id, ty, Expr::lit(LitKind::Int, u.to_string()), opt)
            }
            (shape, Data::Float(f)) if shape.kind().is_float() => {
                let bits = if *shape == Shape::Float32 { 32 } else { 64 };
                if f.is_finite() {
                    let lit = Expr::lit(LitKind::Float, format_float(*f, bits));
                    self.scalar(*id, ty, lit, opt)
                } else {
                    let mut math = Imports::new();
                    let lit = non_finite(*f, bits, &mut math);
                    self.conversion(*id, lit, math, opt)
                }
            }
            (shape, Data::Complex { re, im }) if shape.kind().is_complex() => {
                let bits = if *shape == Shape::Complex64 { 64 } else { 128 };
                if re.is_finite() && im.is_finite() {
                    let lit = Expr::lit(LitKind::Complex, format_complex(*re, *im, bits));
                    self.scalar(*id, ty, lit, opt)
                } else {
                    let mut math = Imports::new();
                    let lit = Expr::call(
                        Expr::ident("complex"),
                        vec![
                            non_finite(*re, bits / 2, &mut math),
                            non_finite(*im, bits / 2, &mut math),
                        ],
                    );
                    self.conversion(*id, lit, math, opt)
                }
            }
            (Shape::String, Data::String(s)) => {
                let text = if prefers_raw(s) { raw(s) } else { quote(s) };
                self.scalar(*id, ty, Expr::lit(LitKind::String, text), opt)
            }
            (Shape::Array { len, .. }, Data::Array(elems)) => {
                if elems.len() as u64 != *len {
                    return Err(Error::malformed(format!(
                        "array of type {} holds {} elements",
                        self.type_name(*id),
                        elems.len()
                    )));
                }
                self.sequence(*id, elems, opt)
            }
            (Shape::Slice { .. }, Data::Slice(elems)) => match elems {
                Some(elems) => self.sequence(*id, elems, opt),
                None => self.nil_of(*id, opt),
            },
            (Shape::Map { .. }, Data::Map(entries)) => match entries {
                Some(entries) => self.map(*id, entries, opt),
                None => self.nil_of(*id, opt),
            },
            (Shape::Pointer { elem }, Data::Pointer(slot)) => self.pointer(*id, *elem, *slot, opt),
            (Shape::Interface { .. }, Data::Interface(held)) => self.interface(*id, held, opt),
            (Shape::Struct { fields }, Data::Struct(values)) => {
                self.structure(*id, ty, fields, values, opt)
            }
            (Shape::UnsafePointer, Data::UnsafePointer(addr)) => {
                let lit = Expr::call(
                    Expr::ident("uintptr"),
                    vec![Expr::lit(LitKind::Int, format!("0x{addr:x}"))],
                );
                self.conversion(*id, lit, Imports::new(), opt)
            }
            (Shape::Func { .. }, Data::Func { .. }) | (Shape::Chan { .. }, Data::Chan { .. }) => {
                Err(Error::UnsupportedKind {
                    type_name: self.type_name(*id),
                    kind: ty.kind(),
                })
            }
            (shape, data) => Err(Error::malformed(format!(
                "{} value of type {} holds {} data",
                shape.kind(),
                self.type_name(*id),
                data.variant_name()
            ))),
        }
    }

    fn ty(&self, id: TypeId) -> Result<&'a Type> {
        let snapshot = self.snapshot;
        lookup(&snapshot.types, id)
    }

    fn type_name(&self, id: TypeId) -> String {
        self.snapshot.types.display(id)
    }

    fn type_expr(&self, id: TypeId, opt: &Options) -> Result<Encoded> {
        type_expr(&self.snapshot.types, id, opt)
    }

    /// A basic literal, bare when its type is implied by the context.
    fn scalar(&self, id: TypeId, ty: &Type, lit: Expr, opt: &Options) -> Result<Encoded> {
        if opt.unqualify && ty.is_predeclared() {
            return Ok(Encoded::new(lit));
        }
        self.conversion(id, lit, Imports::new(), opt)
    }

    /// `T(lit)`, where `lit` itself needs `imports`.
    fn conversion(&self, id: TypeId, lit: Expr, imports: Imports, opt: &Options) -> Result<Encoded> {
        let mut out = Encoded {
            imports,
            ..Encoded::default()
        };
        let ty = self.type_expr(id, opt)?;
        if opt.exported_only && ty.requires_unexported {
            log::debug!("omitting value of unexported type {}", self.type_name(id));
            return Ok(Encoded::omitted());
        }
        match out.take(ty) {
            Some(ty) => Ok(out.with_expr(Expr::convert(ty, lit))),
            None => Ok(Encoded::omitted()),
        }
    }

    /// A nil slice or map.
    fn nil_of(&self, id: TypeId, opt: &Options) -> Result<Encoded> {
        if opt.unqualify {
            return Ok(Encoded::new(Expr::nil()));
        }
        self.conversion(id, Expr::nil(), Imports::new(), opt)
    }

    /// Array and slice literals.
    fn sequence(&mut self, id: TypeId, elems: &[Value], opt: &Options) -> Result<Encoded> {
        let elem_opt = opt.with_unqualify(true);
        let mut out = Encoded::default();
        let mut items = Vec::with_capacity(elems.len());
        for elem in elems {
            match out.take(self.encode(elem, &elem_opt)?) {
                Some(expr) => items.push(Element::from(expr)),
                None => return Ok(Encoded::omitted()),
            }
        }
        self.composite(id, out, items, opt)
    }

    fn map(&mut self, id: TypeId, entries: &[MapEntry], opt: &Options) -> Result<Encoded> {
        let kv_opt = opt.with_unqualify(true);
        let mut out = Encoded::default();
        let mut keyed = Vec::with_capacity(entries.len());
        for entry in entries {
            let key = self.encode(&entry.key, &kv_opt)?;
            if key.expr.is_none() || (opt.exported_only && key.requires_unexported) {
                log::debug!("dropping map entry with unexported key");
                out.omitted_unexported = true;
                continue;
            }
            let value = self.encode(&entry.value, &kv_opt)?;
            if value.expr.is_none() || (opt.exported_only && value.requires_unexported) {
                log::debug!("dropping map entry with unexported value");
                out.omitted_unexported = true;
                continue;
            }
            let (Some(k), Some(v)) = (out.take(key), out.take(value)) else {
                continue;
            };
            let key_text = GoRenderer.render(&k, &RenderOptions::inline())?;
            let value_text = GoRenderer.render(&v, &RenderOptions::inline())?;
            let order = KeyOrder::new(&entry.key, key_text).then_value(value_text);
            keyed.push((order, Element::key_value(k, v)));
        }
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        let items = keyed.into_iter().map(|(_, elem)| elem).collect();
        self.composite(id, out, items, opt)
    }

    /// Wrap `items` in a composite literal of type `id`, keeping the flags
    /// already collected in `out`.
    fn composite(
        &self,
        id: TypeId,
        mut out: Encoded,
        items: Vec<Element>,
        opt: &Options,
    ) -> Result<Encoded> {
        let ty = self.type_expr(id, opt)?;
        if opt.exported_only && (ty.requires_unexported || out.requires_unexported) {
            log::debug!("omitting literal of type {}", self.type_name(id));
            return Ok(Encoded::omitted());
        }
        match out.take(ty) {
            Some(ty) => Ok(out.with_expr(Expr::composite(ty, items))),
            None => Ok(Encoded::omitted()),
        }
    }

    fn pointer(
        &mut self,
        id: TypeId,
        elem_id: TypeId,
        slot: Option<SlotId>,
        opt: &Options,
    ) -> Result<Encoded> {
        let snapshot = self.snapshot;
        let pointee = match slot {
            Some(slot) => Some(snapshot.load(slot).ok_or_else(|| {
                Error::malformed(format!(
                    "pointer of type {} refers to missing slot {slot}",
                    self.type_name(id)
                ))
            })?),
            None => None,
        };

        let to_interface = self.ty(elem_id)?.kind() == Kind::Interface;
        if !to_interface && pointee.is_some_and(Value::is_nil) {
            return Err(Error::malformed(format!(
                "slot of pointer type {} holds no value",
                self.type_name(id)
            )));
        }
        let nil_interface = match pointee {
            Some(value) if to_interface => holds_nil(value),
            _ => false,
        };
        if pointee.is_some() && to_interface && !nil_interface {
            return Err(Error::PointerToInterface {
                type_name: self.type_name(id),
            });
        }

        let (Some(slot), Some(pointee)) = (slot, pointee) else {
            return self.nil_of(id, opt);
        };

        let mut out = Encoded::default();
        let ptr_ty = self.type_expr(id, opt)?;
        if opt.exported_only && ptr_ty.requires_unexported {
            log::debug!("omitting pointer of unexported type {}", self.type_name(id));
            return Ok(Encoded::omitted());
        }
        let Some(ptr_ty) = out.take(ptr_ty) else {
            return Ok(Encoded::omitted());
        };

        if self.guard.push(slot) {
            log::debug!("pointer cycle at {slot}, truncating");
            let expr = if opt.unqualify {
                Expr::nil()
            } else {
                Expr::convert(ptr_ty, Expr::nil())
            };
            return Ok(out.with_expr(expr));
        }
        let elem = self.encode(pointee, &opt.with_unqualify(false));
        self.guard.pop(slot);

        let Some(elem) = out.take(elem?) else {
            return Ok(Encoded::omitted());
        };

        let qualifier = opt.helper_qualifier();
        let mut helper = |name: &str| {
            if let Some(q) = qualifier {
                out.imports.add(opt.helper_path(), q);
            }
            Expr::qualified(qualifier, name)
        };

        let expr = if nil_interface {
            let call = Expr::call(
                helper(ADDR_INTERFACE),
                vec![elem, Expr::convert(ptr_ty.clone(), Expr::nil())],
            );
            Expr::type_assert(call, ptr_ty)
        } else if elem.is_composite() {
            Expr::address_of(elem)
        } else {
            Expr::type_assert(Expr::call(helper(ADDR), vec![elem]), ptr_ty)
        };
        Ok(out.with_expr(expr))
    }

    fn interface(&mut self, id: TypeId, held: &Value, opt: &Options) -> Result<Encoded> {
        let ty = self.type_expr(id, opt)?;
        if opt.exported_only && ty.requires_unexported {
            log::debug!("omitting interface of unexported type {}", self.type_name(id));
            return Ok(Encoded::omitted());
        }
        if held.is_nil() {
            return Ok(Encoded::new(Expr::nil()));
        }

        let keep = opt.unqualify && self.is_default_literal(held)?;
        let inner = self.encode(held, &opt.with_unqualify(keep))?;
        if opt.unqualify {
            return Ok(inner);
        }

        let mut out = Encoded::default();
        let Some(inner) = out.take(inner) else {
            return Ok(Encoded::omitted());
        };
        match out.take(ty) {
            Some(ty) => Ok(out.with_expr(Expr::convert(ty, inner))),
            None => Ok(Encoded::omitted()),
        }
    }

    /// Whether the bare literal of `value` has `value`'s own type when
    /// assigned to an interface, so no conversion is needed.
    fn is_default_literal(&self, value: &Value) -> Result<bool> {
        let Value::Typed { ty, data } = value else {
            return Ok(false);
        };
        let ty = self.ty(*ty)?;
        if !ty.is_predeclared() {
            return Ok(false);
        }
        Ok(match (&ty.shape, data) {
            (Shape::Bool, _) | (Shape::String, _) | (Shape::Int, _) => true,
            (Shape::Complex128, Data::Complex { re, im }) => re.is_finite() && im.is_finite(),
            (Shape::Float64, Data::Float(f)) => {
                f.is_finite() && format_float(*f, 64).contains(['.', 'e'])
            }
            _ => false,
        })
    }

    fn structure(
        &mut self,
        id: TypeId,
        ty: &Type,
        fields: &[Field],
        values: &[Value],
        opt: &Options,
    ) -> Result<Encoded> {
        if fields.len() != values.len() {
            return Err(Error::malformed(format!(
                "struct of type {} has {} fields but {} values",
                self.type_name(id),
                fields.len(),
                values.len()
            )));
        }

        // Unexported field names of another package's struct cannot be written.
        let foreign = ty.is_named() && opt.qualifier(&ty.pkg_path)?.is_some();
        let field_opt = opt.with_unqualify(true);
        let mut out = Encoded::default();
        let mut items = Vec::new();
        for (field, value) in fields.iter().zip(values) {
            if value.is_zero() {
                continue;
            }
            let mut encoded = self.encode(value, &field_opt)?;
            if foreign && !is_exported(&field.name) {
                encoded.requires_unexported = true;
            }
            if opt.exported_only && encoded.requires_unexported {
                log::debug!("dropping unexported field {}", field.name);
                out.omitted_unexported = true;
                continue;
            }
            match out.take(encoded) {
                Some(expr) => items.push(Element::key_value(Expr::ident(&field.name), expr)),
                None => out.omitted_unexported = true,
            }
        }
        self.composite(id, out, items, opt)
    }
}

/// Go spelling of a float that may be infinite or NaN.
fn non_finite(value: f64, bits: u32, imports: &mut Imports) -> Expr {
    if value.is_finite() {
        return Expr::lit(LitKind::Float, format_float(value, bits));
    }
    imports.add("math", "math");
    let math = |name: &str, args: Vec<Expr>| Expr::call(Expr::selector("math", name), args);
    if value.is_nan() {
        math("NaN", vec![])
    } else {
        let sign = if value > 0.0 { "1" } else { "-1" };
        math("Inf", vec![Expr::lit(LitKind::Int, sign)])
    }
}

/// An interface slot holding no value.
fn holds_nil(value: &Value) -> bool {
    match value {
        Value::Nil => true,
        Value::Typed { data, .. } => matches!(data, Data::Interface(held) if held.is_nil()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_merges_flags_and_imports() {
        let mut child = Encoded::new(Expr::ident("x"));
        child.requires_unexported = true;
        child.imports.add("math", "math");

        let mut parent = Encoded::default();
        assert_eq!(parent.take(child), Some(Expr::ident("x")));
        assert!(parent.requires_unexported);
        assert!(!parent.omitted_unexported);
        assert!(parent.imports.contains("math"));

        assert_eq!(parent.take(Encoded::omitted()), None);
        assert!(parent.omitted_unexported);
    }

    #[test]
    fn test_default_literals() {
        let mut snapshot = Snapshot::new();
        let float64 = snapshot.types.float64();
        let uint = snapshot.types.uint();
        let string = snapshot.types.string();
        let encoder = Encoder::new(&snapshot);

        let check = |value: Value| encoder.is_default_literal(&value).unwrap();
        assert!(check(Value::typed(string, Data::String("s".into()))));
        assert!(check(Value::typed(float64, Data::Float(2.5))));
        assert!(check(Value::typed(float64, Data::Float(1e21))));
        assert!(!check(Value::typed(float64, Data::Float(3.0))));
        assert!(!check(Value::typed(uint, Data::Uint(3))));
        assert!(!check(Value::Nil));
    }
}
