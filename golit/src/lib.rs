//! Convert captured Go values into Go literal syntax.
//!
//! A [`Snapshot`](golit_ir::Snapshot) holds the types and pointer targets of a
//! value graph taken from a Go program. golit turns a value of that graph into
//! a Go expression which, compiled in the target package, rebuilds an equal
//! value:
//!
//! ```
//! use golit::{Options, to_string};
//! use golit_ir::{Data, Snapshot, Value};
//!
//! let mut snapshot = Snapshot::new();
//! let int32 = snapshot.types.int32();
//! let value = Value::typed(int32, Data::Int(1234));
//!
//! assert_eq!(to_string(&snapshot, &value, &Options::new()).unwrap(), "int32(1234)");
//! ```
//!
//! # Module Organization
//!
//! - [`encoder`] - Value to expression conversion
//! - [`error`] - Conversion errors

mod cycle;
pub mod encoder;
pub mod error;
mod ordering;
mod type_expr;

use golit_codegen::{GoRenderer, Imports, RenderOptions, Renderer};
use golit_ir::{Snapshot, Value};

pub use encoder::{Encoded, Encoder};
pub use error::{Error, Result};
pub use golit_core::Options;

/// Convert `value` to an expression tree without rendering it.
pub fn ast(snapshot: &Snapshot, value: &Value, opt: &Options) -> Result<Encoded> {
    Encoder::new(snapshot).encode(value, opt)
}

/// Convert `value` to Go source text.
///
/// With [`Options::exported_only`] set, a value that cannot be written without
/// unexported names fails with [`Error::Unexported`].
pub fn to_string(snapshot: &Snapshot, value: &Value, opt: &Options) -> Result<String> {
    to_string_with(snapshot, value, opt, &GoRenderer, &RenderOptions::default())
}

/// Like [`to_string`], with a custom renderer and layout.
pub fn to_string_with(
    snapshot: &Snapshot,
    value: &Value,
    opt: &Options,
    renderer: &dyn Renderer,
    render_opts: &RenderOptions,
) -> Result<String> {
    let encoded = ast(snapshot, value, opt)?;
    render_encoded(snapshot, value, &encoded, opt, renderer, render_opts)
}

/// Render the result of [`ast`] for `value`, failing the way [`to_string`]
/// does when the value cannot be written.
pub fn render_encoded(
    snapshot: &Snapshot,
    value: &Value,
    encoded: &Encoded,
    opt: &Options,
    renderer: &dyn Renderer,
    render_opts: &RenderOptions,
) -> Result<String> {
    match &encoded.expr {
        Some(expr) if !(opt.exported_only && encoded.requires_unexported) => {
            Ok(renderer.render(expr, render_opts)?)
        }
        _ => Err(Error::Unexported {
            type_name: value
                .ty()
                .map_or_else(|| "nil".to_string(), |ty| snapshot.types.display(ty)),
        }),
    }
}

/// Convert `value` to Go source text, describing any error in the text
/// itself as `golit: <message>`.
pub fn to_string_lossy(snapshot: &Snapshot, value: &Value, opt: &Options) -> String {
    to_string(snapshot, value, opt).unwrap_or_else(|err| format!("golit: {err}"))
}

/// Render the import declaration a file containing the literal needs.
pub fn render_imports(imports: &Imports) -> String {
    imports.render()
}
