//! Import tracking for generated literals.

use golit_ir::package_base;
use indexmap::IndexMap;

use crate::builder::CodeBuilder;

/// Packages referenced by a literal, keyed by import path.
///
/// Maintains insertion order; rendering sorts for deterministic output.
///
/// ```
/// use golit_codegen::Imports;
///
/// let mut imports = Imports::new();
/// imports.add("math", "math");
/// imports.add("github.com/acme/golit", "golit");
/// assert_eq!(
///     imports.render(),
///     "import (\n\t\"math\"\n\n\t\"github.com/acme/golit\"\n)\n"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Imports {
    packages: IndexMap<String, String>,
}

impl Imports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `name` refers to the package at `path`.
    pub fn add(&mut self, path: &str, name: &str) {
        if !self.packages.contains_key(path) {
            self.packages.insert(path.to_string(), name.to_string());
        }
    }

    /// Merge another set into this one.
    pub fn merge(&mut self, other: &Imports) {
        for (path, name) in &other.packages {
            self.add(path, name);
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.packages.contains_key(path)
    }

    /// Package name recorded for `path`.
    pub fn name(&self, path: &str) -> Option<&str> {
        self.packages.get(path).map(String::as_str)
    }

    /// Iterate over `(path, name)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.packages.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Render a Go import declaration, standard library packages first.
    ///
    /// A package whose name differs from its last path element is imported
    /// with an explicit name. Returns an empty string when there is nothing
    /// to import.
    pub fn render(&self) -> String {
        let mut specs: Vec<(&str, &str)> = self.iter().collect();
        specs.sort_by(|a, b| a.0.cmp(b.0));

        let spec = |(path, name): (&str, &str)| {
            if package_base(path) == name {
                format!("\"{path}\"")
            } else {
                format!("{name} \"{path}\"")
            }
        };

        match specs.as_slice() {
            [] => String::new(),
            [single] => CodeBuilder::go()
                .line(&format!("import {}", spec(*single)))
                .build(),
            _ => {
                let (std, external): (Vec<_>, Vec<_>) =
                    specs.into_iter().partition(|(path, _)| is_std(path));
                CodeBuilder::go()
                    .line("import (")
                    .indent()
                    .each(std.iter().copied(), |b, s| b.line(&spec(s)))
                    .when(!std.is_empty() && !external.is_empty(), |b| b.blank())
                    .each(external.iter().copied(), |b, s| b.line(&spec(s)))
                    .dedent()
                    .line(")")
                    .build()
            }
        }
    }
}

/// Standard library paths have no dot in their first element.
fn is_std(path: &str) -> bool {
    path.split('/').next().is_some_and(|first| !first.contains('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_first_name() {
        let mut imports = Imports::new();
        imports.add("example.com/a", "a");
        imports.add("example.com/a", "other");
        assert_eq!(imports.len(), 1);
        assert_eq!(imports.name("example.com/a"), Some("a"));
    }

    #[test]
    fn test_merge() {
        let mut a = Imports::new();
        a.add("unsafe", "unsafe");
        let mut b = Imports::new();
        b.add("math", "math");
        b.add("unsafe", "unsafe");
        a.merge(&b);
        let paths: Vec<_> = a.iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["unsafe", "math"]);
    }

    #[test]
    fn test_render_single_and_empty() {
        let mut imports = Imports::new();
        assert_eq!(imports.render(), "");
        imports.add("unsafe", "unsafe");
        assert_eq!(imports.render(), "import \"unsafe\"\n");
    }

    #[test]
    fn test_render_named_import() {
        let mut imports = Imports::new();
        imports.add("gopkg.in/yaml.v3", "yaml");
        imports.add("example.com/x/api-v1", "api");
        insta::assert_snapshot!(imports.render(), @r#"
import (
	api "example.com/x/api-v1"
	yaml "gopkg.in/yaml.v3"
)
"#);
    }
}
