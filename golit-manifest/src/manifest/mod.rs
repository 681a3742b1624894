//! Manifest types for golit.toml files.

mod parse;
mod validate;

use golit_codegen::RenderOptions;
use golit_core::{
    CachedResolver, DEFAULT_HELPER_PACKAGE, Options, PackageResolver, PathBaseResolver,
    StaticResolver,
};
use indexmap::IndexMap;
use serde::Deserialize;

pub use validate::ParseContext;

/// Smallest accepted `render.max_width`.
pub const MIN_MAX_WIDTH: usize = 20;

/// Root manifest for golit.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// The package generated literals are placed in
    #[serde(default)]
    pub package: PackageConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    /// Location of the Addr/AddrInterface helpers
    #[serde(default)]
    pub helpers: HelpersConfig,

    #[serde(default)]
    pub render: RenderConfig,

    /// Explicit import path to package name table
    #[serde(default)]
    pub packages: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageConfig {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionsConfig {
    #[serde(default)]
    pub exported_only: bool,
    #[serde(default)]
    pub unqualify: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HelpersConfig {
    pub path: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(default = "default_max_width")]
    pub max_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
        }
    }
}

fn default_max_width() -> usize {
    RenderOptions::DEFAULT_MAX_WIDTH
}

impl Manifest {
    /// Conversion options described by this manifest.
    ///
    /// Package names come from `[packages]` first, then from the import path.
    pub fn options(&self) -> Options {
        let mut opt = Options::new()
            .package(&self.package.path, &self.package.name)
            .exported_only(self.options.exported_only)
            .unqualified(self.options.unqualify)
            .resolver(self.resolver());
        if self.helpers.path.is_some() || self.helpers.name.is_some() {
            let path = self.helpers.path.as_deref().unwrap_or(DEFAULT_HELPER_PACKAGE);
            let name = match &self.helpers.name {
                Some(name) => name.clone(),
                None => PathBaseResolver
                    .resolve(path)
                    .unwrap_or_else(|_| DEFAULT_HELPER_PACKAGE.to_string()),
            };
            opt = opt.helpers(path, name);
        }
        opt
    }

    /// Resolver for the `[packages]` table, falling back to the path base.
    pub fn resolver(&self) -> CachedResolver<StaticResolver> {
        let table: StaticResolver = self
            .packages
            .iter()
            .map(|(path, name)| (path.as_str(), name.as_str()))
            .collect();
        CachedResolver::new(table.with_fallback(PathBaseResolver))
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::default().with_max_width(self.render.max_width)
    }
}
