use clap::Args;
use eyre::{Result, bail};
use golit_codegen::helpers_source;
use golit_core::{DEFAULT_HELPER_PACKAGE, is_identifier, is_keyword};

#[derive(Args)]
pub struct HelpersCommand {
    /// Package name of the generated file
    #[arg(short, long, default_value = DEFAULT_HELPER_PACKAGE)]
    pub package: String,
}

impl HelpersCommand {
    pub fn run(&self) -> Result<()> {
        print!("{}", self.render()?);
        Ok(())
    }

    fn render(&self) -> Result<String> {
        if !is_identifier(&self.package) || is_keyword(&self.package) {
            bail!("'{}' is not a valid Go package name", self.package);
        }
        Ok(helpers_source(&self.package))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_helpers() {
        let cmd = HelpersCommand {
            package: "lit".into(),
        };
        let src = cmd.render().unwrap();
        assert!(src.starts_with("// Package lit"));
        assert!(src.contains("func AddrInterface("));
    }

    #[test]
    fn test_rejects_keyword_package() {
        let cmd = HelpersCommand {
            package: "type".into(),
        };
        assert!(cmd.render().is_err());
    }
}
