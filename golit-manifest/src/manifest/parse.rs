//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use super::{MIN_MAX_WIDTH, Manifest, validate::ParseContext};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "golit.toml")
    }
}

impl Manifest {
    /// Parse a golit.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a golit.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    if !manifest.package.name.is_empty() {
        ctx.push("package").validate_name(&manifest.package.name, "package name")?;
    }
    if let Some(name) = &manifest.helpers.name {
        ctx.push("helpers").validate_name(name, "package name")?;
    }

    let packages = ctx.push("packages");
    for (path, name) in &manifest.packages {
        if path.is_empty() {
            return Err(ctx
                .source_context()
                .validation_error("import path cannot be empty", ctx.find_key_span("\"\"")));
        }
        packages.validate_name(name, "package name")?;
    }

    if manifest.render.max_width < MIN_MAX_WIDTH {
        return Err(ctx.source_context().validation_error(
            format!("max_width must be at least {MIN_MAX_WIDTH}"),
            ctx.find_key_span("max_width"),
        ));
    }
    Ok(())
}
