//! golit.toml parsing and validation.
//!
//! ```
//! use golit_manifest::Manifest;
//!
//! let manifest: Manifest = r#"
//! [package]
//! path = "github.com/acme/app"
//! name = "app"
//!
//! [packages]
//! "gopkg.in/yaml.v3" = "yaml"
//! "#
//! .parse()
//! .unwrap();
//!
//! let opt = manifest.options();
//! assert_eq!(opt.qualifier("gopkg.in/yaml.v3").unwrap().as_deref(), Some("yaml"));
//! assert_eq!(opt.qualifier("github.com/acme/app").unwrap(), None);
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    HelpersConfig, MIN_MAX_WIDTH, Manifest, OptionsConfig, PackageConfig, ParseContext,
    RenderConfig,
};
