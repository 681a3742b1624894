use std::{fmt::Write, path::PathBuf};

use clap::Args;
use eyre::Result;
use golit_manifest::Manifest;

use super::{DEFAULT_CONFIG, UnwrapOrExit};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to golit.toml (defaults to ./golit.toml)
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();
        println!("✓ {} is valid\n", self.config.display());
        print!("{}", summary(&manifest));
        Ok(())
    }
}

fn summary(manifest: &Manifest) -> String {
    let opt = manifest.options();
    let or_unset = |s: &str| {
        if s.is_empty() {
            "(unset)".to_string()
        } else {
            s.to_string()
        }
    };

    let mut out = String::new();
    let _ = writeln!(
        out,
        "  package  {} ({})",
        or_unset(&opt.package_path),
        or_unset(&opt.package_name)
    );
    let _ = writeln!(out, "  helpers  {} ({})", opt.helper_path(), opt.helper_name());
    let _ = writeln!(
        out,
        "  options  exported_only={} unqualify={} max_width={}",
        opt.exported_only, opt.unqualify, manifest.render.max_width
    );

    let count = manifest.packages.len();
    if count > 0 {
        let _ = writeln!(
            out,
            "\n  {} package name{}:",
            count,
            if count == 1 { "" } else { "s" }
        );
        for (path, name) in &manifest.packages {
            let _ = writeln!(out, "    {path} = {name}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let manifest: Manifest = r#"
[package]
path = "github.com/acme/app"
name = "app"

[packages]
"gopkg.in/yaml.v3" = "yaml"
"#
        .parse()
        .unwrap();
        assert_eq!(
            summary(&manifest),
            "  package  github.com/acme/app (app)\n\
             \x20 helpers  golit (golit)\n\
             \x20 options  exported_only=false unqualify=false max_width=80\n\
             \n\
             \x20 1 package name:\n\
             \x20   gopkg.in/yaml.v3 = yaml\n"
        );
    }

    #[test]
    fn test_summary_defaults() {
        let text = summary(&Manifest::default());
        assert!(text.starts_with("  package  (unset) ((unset))\n"));
        assert!(!text.contains("package name"));
    }
}
