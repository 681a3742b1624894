//! Go expression syntax tree, constant formatting and rendering for golit.
//!
//! # Module Organization
//!
//! - [`ast`] - Expression and type-expression tree
//! - [`literal`] - Go spelling of numbers and strings
//! - [`renderer`] - Tree to text, with line splitting of wide literals
//! - [`imports`] - Import tracking and import block rendering
//! - [`helpers`] - Source of the Go address helper package
//! - [`builder`] - Line-oriented source building

pub mod ast;
pub mod builder;
pub mod helpers;
pub mod imports;
pub mod literal;
pub mod renderer;

pub use ast::{ChanDir, Element, Expr, FieldDecl, LitKind, MethodDecl, Signature};
pub use helpers::helpers_source;
pub use imports::Imports;
pub use renderer::{FormatError, GoRenderer, RenderOptions, Renderer};
