use std::{
    io::{self, Read},
    path::PathBuf,
};

use clap::Args;
use eyre::{Context, Result};
use golit::{Options, render_imports};
use golit_codegen::{GoRenderer, RenderOptions};
use golit_ir::Document;
use golit_manifest::{MIN_MAX_WIDTH, Manifest};

use super::{UnwrapOrExit, load_manifest};

#[derive(Args)]
pub struct EncodeCommand {
    /// Value document (JSON), or '-' for stdin
    pub input: PathBuf,

    /// Path to golit.toml (defaults to ./golit.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Import path of the package the literal is placed in
    #[arg(long)]
    pub package_path: Option<String>,

    /// Name of the package the literal is placed in
    #[arg(long)]
    pub package_name: Option<String>,

    /// Omit values that need unexported names
    #[arg(long)]
    pub exported_only: bool,

    /// Drop the type of a root value whose type is implied
    #[arg(long)]
    pub unqualify: bool,

    /// Column at which composite literals are split over lines
    #[arg(long, value_parser = clap::value_parser!(u64).range(MIN_MAX_WIDTH as u64..))]
    pub max_width: Option<u64>,

    /// Print the import declaration before the literal
    #[arg(long)]
    pub imports: bool,
}

impl EncodeCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = load_manifest(self.config.as_deref()).unwrap_or_exit();
        let document = self.read_document()?;
        let output = self.render(&manifest, document).unwrap_or_exit();
        println!("{output}");
        Ok(())
    }

    fn read_document(&self) -> Result<Document> {
        let content = if self.input.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .wrap_err("failed to read value document from stdin")?;
            buf
        } else {
            std::fs::read_to_string(&self.input)
                .wrap_err_with(|| format!("failed to read '{}'", self.input.display()))?
        };
        serde_json::from_str(&content).wrap_err("invalid value document")
    }

    /// Conversion options: the manifest, overridden by flags.
    fn options(&self, manifest: &Manifest) -> Options {
        let mut opt = manifest.options();
        if let Some(path) = &self.package_path {
            opt.package_path = path.clone();
        }
        if let Some(name) = &self.package_name {
            opt.package_name = name.clone();
        }
        opt.exported_only |= self.exported_only;
        opt.unqualify |= self.unqualify;
        opt
    }

    fn render_options(&self, manifest: &Manifest) -> RenderOptions {
        let opts = manifest.render_options();
        match self.max_width {
            Some(width) => opts.with_max_width(width as usize),
            None => opts,
        }
    }

    fn render(&self, manifest: &Manifest, document: Document) -> golit::Result<String> {
        let opt = self.options(manifest);
        let (snapshot, root) = document.into_parts();

        let encoded = golit::ast(&snapshot, &root, &opt)?;
        let literal = golit::render_encoded(
            &snapshot,
            &root,
            &encoded,
            &opt,
            &GoRenderer,
            &self.render_options(manifest),
        )?;
        if !self.imports {
            return Ok(literal);
        }

        let imports = render_imports(&encoded.imports);
        if imports.is_empty() {
            Ok(literal)
        } else {
            Ok(format!("{imports}\n{literal}"))
        }
    }
}
