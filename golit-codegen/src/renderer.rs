//! Rendering expression trees to Go source text.

use golit_core::{is_identifier, is_keyword};
use thiserror::Error;

use crate::{
    ast::{ChanDir, Element, Expr, FieldDecl, MethodDecl, Signature},
    builder::Indent,
};

/// Error raised when a tree cannot be printed as valid Go.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid identifier '{name}'")]
    InvalidIdentifier { name: String },

    #[error("'{name}' is a reserved keyword and cannot be used as an identifier")]
    ReservedKeyword { name: String },

    #[error("empty {kind} literal")]
    EmptyLiteral { kind: &'static str },

    #[error("variadic signature without parameters")]
    VariadicWithoutParams,
}

/// Formatting options for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Indentation level of the line the expression starts on.
    pub indent: usize,
    /// Indentation style.
    pub style: Indent,
    /// Composite literals wider than this are split one element per line.
    pub max_width: usize,
    /// Never split composite literals.
    pub inline: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: 0,
            style: Indent::GO,
            max_width: Self::DEFAULT_MAX_WIDTH,
            inline: false,
        }
    }
}

impl RenderOptions {
    pub const DEFAULT_MAX_WIDTH: usize = 80;

    /// Create options for single-line rendering.
    pub fn inline() -> Self {
        Self {
            inline: true,
            ..Default::default()
        }
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_style(mut self, style: Indent) -> Self {
        self.style = style;
        self
    }

    pub fn with_max_width(mut self, max_width: usize) -> Self {
        self.max_width = max_width;
        self
    }

    /// Get the current indentation string.
    pub fn indent_str(&self) -> String {
        self.style.as_str().repeat(self.indent)
    }

    /// Display width of the current indentation.
    pub fn indent_width(&self) -> usize {
        self.indent * self.style.width()
    }

    /// Get options for a nested level.
    pub fn nested(&self) -> Self {
        Self {
            indent: self.indent + 1,
            ..*self
        }
    }
}

/// Turns an expression tree into source text.
pub trait Renderer {
    fn render(&self, expr: &Expr, opts: &RenderOptions) -> Result<String, FormatError>;
}

/// Renderer producing gofmt-style Go expressions.
///
/// ```
/// use golit_codegen::{Element, Expr, GoRenderer, LitKind, RenderOptions, Renderer};
///
/// let expr = Expr::composite(
///     Expr::ident("foo"),
///     vec![Element::key_value(Expr::ident("bar"), Expr::lit(LitKind::String, "\"hello\""))],
/// );
/// let text = GoRenderer.render(&expr, &RenderOptions::default()).unwrap();
/// assert_eq!(text, r#"foo{bar: "hello"}"#);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GoRenderer;

impl Renderer for GoRenderer {
    fn render(&self, expr: &Expr, opts: &RenderOptions) -> Result<String, FormatError> {
        self.write(expr, opts, opts.indent_width())
    }
}

impl GoRenderer {
    /// Render `expr` starting at display column `col`.
    fn write(&self, expr: &Expr, opts: &RenderOptions, col: usize) -> Result<String, FormatError> {
        match expr {
            Expr::Ident(name) => {
                check_ident(name)?;
                Ok(name.clone())
            }
            Expr::Selector { pkg, name } => {
                check_ident(pkg)?;
                check_ident(name)?;
                Ok(format!("{pkg}.{name}"))
            }
            Expr::BasicLit { kind, value } => {
                if value.is_empty() {
                    return Err(FormatError::EmptyLiteral {
                        kind: kind.as_str(),
                    });
                }
                Ok(value.clone())
            }
            Expr::Call { fun, args } => {
                let mut out = self.write(fun, opts, col)?;
                out.push('(');
                let mut c = advance(col, &out);
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                        c += 2;
                    }
                    let text = self.write(arg, opts, c)?;
                    c = advance(c, &text);
                    out.push_str(&text);
                }
                out.push(')');
                Ok(out)
            }
            Expr::Paren(inner) => Ok(format!("({})", self.write(inner, opts, col + 1)?)),
            Expr::AddressOf(inner) => Ok(format!("&{}", self.write(inner, opts, col + 1)?)),
            Expr::TypeAssert { expr, ty } => {
                let x = self.write(expr, opts, col)?;
                let t = self.write(ty, opts, advance(col, &x) + 2)?;
                Ok(format!("{x}.({t})"))
            }
            Expr::Composite { ty, elems } => self.composite(ty, elems, opts, col),
            Expr::ArrayType { len, elem } => {
                let elem = self.write(elem, opts, col)?;
                Ok(match len {
                    Some(len) => format!("[{len}]{elem}"),
                    None => format!("[]{elem}"),
                })
            }
            Expr::MapType { key, value } => Ok(format!(
                "map[{}]{}",
                self.write(key, opts, col)?,
                self.write(value, opts, col)?
            )),
            Expr::Star(elem) => Ok(format!("*{}", self.write(elem, opts, col)?)),
            Expr::StructType(fields) => self.struct_type(fields, opts),
            Expr::InterfaceType(methods) => self.interface_type(methods, opts),
            Expr::FuncType(sig) => Ok(format!("func{}", self.signature(sig, opts)?)),
            Expr::ChanType { dir, elem } => {
                let inner = self.write(elem, opts, col)?;
                Ok(match dir {
                    ChanDir::Both
                        if matches!(
                            **elem,
                            Expr::ChanType {
                                dir: ChanDir::Recv,
                                ..
                            }
                        ) =>
                    {
                        format!("chan ({inner})")
                    }
                    ChanDir::Both => format!("chan {inner}"),
                    ChanDir::Send => format!("chan<- {inner}"),
                    ChanDir::Recv => format!("<-chan {inner}"),
                })
            }
        }
    }

    fn composite(
        &self,
        ty: &Expr,
        elems: &[Element],
        opts: &RenderOptions,
        col: usize,
    ) -> Result<String, FormatError> {
        let ty = self.write(ty, opts, col)?;

        let inline_opts = RenderOptions {
            inline: true,
            ..*opts
        };
        let mut inline = format!("{ty}{{");
        let mut c = advance(col, &inline);
        for (i, elem) in elems.iter().enumerate() {
            if i > 0 {
                inline.push_str(", ");
                c += 2;
            }
            let text = self.element(elem, &inline_opts, c)?;
            c = advance(c, &text);
            inline.push_str(&text);
        }
        inline.push('}');

        let fits = !inline.contains('\n') && col + display_width(&inline) <= opts.max_width;
        if opts.inline || elems.is_empty() || fits {
            return Ok(inline);
        }

        log::trace!("splitting {ty} literal with {} elements", elems.len());
        let nested = opts.nested();
        let elem_indent = nested.indent_str();
        let base = nested.indent_width();
        let mut lines = Vec::with_capacity(elems.len());
        for elem in elems {
            lines.push(match elem {
                Element::Positional(expr) => (None, self.write(expr, &nested, base)?),
                Element::KeyValue { key, value } => {
                    let key = self.write(key, &nested, base)?;
                    let value = self.write(value, &nested, advance(base, &key) + 2)?;
                    (Some(key), value)
                }
            });
        }

        let widths = key_widths(&lines);
        let mut out = format!("{ty}{{\n");
        for ((key, value), width) in lines.iter().zip(widths) {
            out.push_str(&elem_indent);
            if let Some(key) = key {
                out.push_str(key);
                out.push(':');
                let pad = width.saturating_sub(display_width(key)) + 1;
                out.push_str(&" ".repeat(pad));
            }
            out.push_str(value);
            out.push_str(",\n");
        }
        out.push_str(&opts.indent_str());
        out.push('}');
        Ok(out)
    }

    fn element(
        &self,
        elem: &Element,
        opts: &RenderOptions,
        col: usize,
    ) -> Result<String, FormatError> {
        match elem {
            Element::Positional(expr) => self.write(expr, opts, col),
            Element::KeyValue { key, value } => {
                let key = self.write(key, opts, col)?;
                let value = self.write(value, opts, advance(col, &key) + 2)?;
                Ok(format!("{key}: {value}"))
            }
        }
    }

    fn struct_type(&self, fields: &[FieldDecl], opts: &RenderOptions) -> Result<String, FormatError> {
        if fields.is_empty() {
            return Ok("struct{}".to_string());
        }
        let mut parts = Vec::with_capacity(fields.len());
        for field in fields {
            let ty = self.write(&field.ty, opts, 0)?;
            match &field.name {
                Some(name) => {
                    check_ident(name)?;
                    parts.push(format!("{name} {ty}"));
                }
                None => parts.push(ty),
            }
        }
        Ok(format!("struct{{ {} }}", parts.join("; ")))
    }

    fn interface_type(
        &self,
        methods: &[MethodDecl],
        opts: &RenderOptions,
    ) -> Result<String, FormatError> {
        if methods.is_empty() {
            return Ok("interface{}".to_string());
        }
        let mut parts = Vec::with_capacity(methods.len());
        for method in methods {
            check_ident(&method.name)?;
            parts.push(format!("{}{}", method.name, self.signature(&method.sig, opts)?));
        }
        Ok(format!("interface{{ {} }}", parts.join("; ")))
    }

    fn signature(&self, sig: &Signature, opts: &RenderOptions) -> Result<String, FormatError> {
        if sig.variadic && sig.params.is_empty() {
            return Err(FormatError::VariadicWithoutParams);
        }

        let mut params = Vec::with_capacity(sig.params.len());
        for (i, param) in sig.params.iter().enumerate() {
            let ty = self.write(param, opts, 0)?;
            if sig.variadic && i + 1 == sig.params.len() {
                params.push(format!("...{ty}"));
            } else {
                params.push(ty);
            }
        }

        let mut results = Vec::with_capacity(sig.results.len());
        for result in &sig.results {
            results.push(self.write(result, opts, 0)?);
        }

        let params = params.join(", ");
        Ok(match results.as_slice() {
            [] => format!("({params})"),
            [single] => format!("({params}) {single}"),
            many => format!("({params}) ({})", many.join(", ")),
        })
    }
}

fn check_ident(name: &str) -> Result<(), FormatError> {
    if is_keyword(name) {
        return Err(FormatError::ReservedKeyword {
            name: name.to_string(),
        });
    }
    if !is_identifier(name) {
        return Err(FormatError::InvalidIdentifier {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Width of single-line text, counting a tab as a full tab stop.
fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c| if c == '\t' { Indent::TAB_WIDTH } else { 1 })
        .sum()
}

/// Key column width for each split element.
///
/// Values of consecutive single-line key/value pairs line up after the widest
/// key, as gofmt does. Positional and multi-line elements end a run.
fn key_widths(lines: &[(Option<String>, String)]) -> Vec<usize> {
    let mut widths = vec![0; lines.len()];
    let mut start = 0;
    while start < lines.len() {
        let run = lines[start..]
            .iter()
            .take_while(|(key, value)| key.is_some() && !value.contains('\n'))
            .count();
        if run == 0 {
            start += 1;
            continue;
        }
        let end = start + run;
        let width = lines[start..end]
            .iter()
            .filter_map(|(key, _)| key.as_deref())
            .map(display_width)
            .max()
            .unwrap_or(0);
        widths[start..end].fill(width);
        start = end;
    }
    widths
}

/// Column after writing `text` starting at `col`.
fn advance(col: usize, text: &str) -> usize {
    match text.rsplit_once('\n') {
        Some((_, last)) => display_width(last),
        None => col + display_width(text),
    }
}
