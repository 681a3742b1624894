//! Go naming rules: export visibility, identifier syntax and keywords.

/// Go reserved keywords that cannot be used as identifiers.
/// Source: https://go.dev/ref/spec#Keywords
pub const GO_KEYWORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

/// Reports whether `name` is visible outside its declaring package.
///
/// A name is exported when its first character is an upper-case letter.
///
/// ```
/// use golit_core::is_exported;
///
/// assert!(is_exported("Foo"));
/// assert!(!is_exported("foo"));
/// assert!(!is_exported("_Foo"));
/// assert!(!is_exported(""));
/// ```
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Reports whether `name` is a syntactically valid Go identifier.
///
/// Keywords are valid identifiers syntactically; check [`is_keyword`] separately.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Check if a name is a Go reserved keyword.
pub fn is_keyword(name: &str) -> bool {
    GO_KEYWORDS.contains(&name)
}
