//! Validation context and utilities for manifest parsing.

use std::sync::Arc;

use golit_core::is_keyword;
use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Validation context carrying the source and the table being checked.
///
/// ```ignore
/// let ctx = ParseContext::new(src, "golit.toml");
/// ctx.push("packages").validate_name("yaml", "package name")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: Arc<SourceContext>,
    /// Table path, e.g. ["helpers"]
    path: Vec<&'a str>,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn source_context(&self) -> &SourceContext {
        &self.source
    }

    /// Push a table name and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut path = self.path.clone();
        path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path,
        }
    }

    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Describe `kind` for error messages, e.g. "package name in [helpers]".
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{kind} in [{}]", self.path_string())
        }
    }

    /// Span of the string value `name` in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_value_span(self.source.src(), name)
    }

    /// Span of the key `key` in the source.
    pub fn find_key_span(&self, key: &str) -> Option<SourceSpan> {
        find_key_span(self.source.src(), key)
    }

    /// Validate that `name` can be used as a Go package name.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        if is_keyword(name) {
            return Err(self.source.reserved_keyword_error(
                name,
                self.context_for(kind),
                self.find_span(name),
            ));
        }

        if let Some(reason) = validate_identifier(name) {
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                self.find_span(name),
            ));
        }

        Ok(())
    }
}

/// Find a quoted string value such as `name = "app"` or `"x/y" = 'y'`.
pub(crate) fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let needle = format!("{quote}{value}{quote}");
        let mut from = 0;
        while let Some(pos) = src[from..].find(&needle) {
            let start = from + pos;
            // Only values, which follow an `=` on the same line.
            let line_start = src[..start].rfind('\n').map_or(0, |i| i + 1);
            if src[line_start..start].contains('=') {
                return Some(SourceSpan::from((start + 1, value.len())));
            }
            from = start + needle.len();
        }
    }
    None
}

/// Find a bare key at the start of a line, such as `max_width = 10`.
pub(crate) fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();
        if let Some(rest) = trimmed.strip_prefix(key) {
            if rest.trim_start().starts_with('=') {
                return Some(SourceSpan::from((offset + indent, key.len())));
            }
        }
        offset += line.len();
    }
    None
}

/// Returns None if `name` is a valid Go identifier, Some(reason) otherwise.
pub(crate) fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        None => return Some("name cannot be empty"),
        Some(c) if c.is_alphabetic() || c == '_' => {}
        Some(_) => return Some("name must start with a letter or underscore"),
    }

    if !chars.all(|c| c.is_alphanumeric() || c == '_') {
        return Some("name must contain only letters, digits and underscores");
    }

    if name == "_" {
        return Some("the blank identifier cannot name a package");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("app").is_none());
        assert!(validate_identifier("yaml3").is_none());
        assert!(validate_identifier("_internal").is_none());
        assert!(validate_identifier("Pkg").is_none());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert_eq!(validate_identifier(""), Some("name cannot be empty"));
        assert_eq!(
            validate_identifier("3d"),
            Some("name must start with a letter or underscore")
        );
        assert_eq!(
            validate_identifier("go-cmp"),
            Some("name must contain only letters, digits and underscores")
        );
        assert!(validate_identifier("_").is_some());
    }

    #[test]
    fn test_context_for() {
        let ctx = ParseContext::new("", "golit.toml");
        assert_eq!(ctx.context_for("package name"), "package name");
        assert_eq!(
            ctx.push("helpers").context_for("package name"),
            "package name in [helpers]"
        );
    }

    #[test]
    fn test_find_value_span() {
        let src = "[package]\npath = \"example.com/app\"\nname = \"app\"\n";
        let span = find_value_span(src, "app").unwrap();
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "app");
        assert_eq!(span.offset(), src.rfind("app").unwrap());
    }

    #[test]
    fn test_find_value_span_skips_keys() {
        let src = "[packages]\n\"yaml\" = 'yaml'\n";
        let span = find_value_span(src, "yaml").unwrap();
        assert_eq!(span.offset(), src.find("'yaml'").unwrap() + 1);
    }

    #[test]
    fn test_find_key_span() {
        let src = "[render]\n  max_width = 10\n";
        let span = find_key_span(src, "max_width").unwrap();
        assert_eq!(span.offset(), src.find("max_width").unwrap());
        assert_eq!(span.len(), "max_width".len());
        assert!(find_key_span(src, "width").is_none());
    }
}
