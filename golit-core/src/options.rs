//! Conversion options shared by the type and value encoders.

use std::{fmt, sync::Arc};

use crate::resolver::{PackageResolver, PathBaseResolver, ResolveError};

/// Default import path and package name of the address helper package.
pub const DEFAULT_HELPER_PACKAGE: &str = "golit";

/// Options controlling a single conversion.
///
/// Options are immutable during a conversion; recursive steps that need a
/// different context derive a copy with [`Options::with_unqualify`].
#[derive(Clone, Default)]
pub struct Options {
    /// Omit type names where the enclosing literal already implies the type.
    pub unqualify: bool,

    /// Import path of the package the literal will be placed in.
    pub package_path: String,

    /// Name of the package the literal will be placed in.
    pub package_name: String,

    /// Omit anything that depends on a name not exported to `package_path`.
    pub exported_only: bool,

    /// Resolver for foreign package names. `None` uses [`PathBaseResolver`].
    pub resolver: Option<Arc<dyn PackageResolver>>,

    /// Import path of the package providing `Addr` and `AddrInterface`.
    pub helper_path: String,

    /// Package name of the helper package.
    pub helper_name: String,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identity of the package the literal lives in.
    pub fn package(mut self, path: impl Into<String>, name: impl Into<String>) -> Self {
        self.package_path = path.into();
        self.package_name = name.into();
        self
    }

    pub fn exported_only(mut self, exported_only: bool) -> Self {
        self.exported_only = exported_only;
        self
    }

    pub fn unqualified(mut self, unqualify: bool) -> Self {
        self.unqualify = unqualify;
        self
    }

    pub fn resolver(mut self, resolver: impl PackageResolver + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Set where the address helpers are imported from.
    pub fn helpers(mut self, path: impl Into<String>, name: impl Into<String>) -> Self {
        self.helper_path = path.into();
        self.helper_name = name.into();
        self
    }

    /// Derive a copy with a different `unqualify` setting.
    pub fn with_unqualify(&self, unqualify: bool) -> Self {
        Self {
            unqualify,
            ..self.clone()
        }
    }

    /// Resolve the package name for `import_path` with the configured resolver.
    pub fn resolve(&self, import_path: &str) -> Result<String, ResolveError> {
        match &self.resolver {
            Some(resolver) => resolver.resolve(import_path),
            None => PathBaseResolver.resolve(import_path),
        }
    }

    /// Package name to qualify identifiers of `pkg_path` with.
    ///
    /// Returns `None` for predeclared names (empty path) and for names that
    /// belong to the current package.
    pub fn qualifier(&self, pkg_path: &str) -> Result<Option<String>, ResolveError> {
        if pkg_path.is_empty() || pkg_path == self.package_path {
            return Ok(None);
        }
        let name = self.resolve(pkg_path)?;
        if name == self.package_name {
            Ok(None)
        } else {
            Ok(Some(name))
        }
    }

    /// Import path of the helper package.
    pub fn helper_path(&self) -> &str {
        if self.helper_path.is_empty() {
            DEFAULT_HELPER_PACKAGE
        } else {
            &self.helper_path
        }
    }

    /// Package name of the helper package.
    pub fn helper_name(&self) -> &str {
        if self.helper_name.is_empty() {
            DEFAULT_HELPER_PACKAGE
        } else {
            &self.helper_name
        }
    }

    /// Qualifier for helper calls, `None` when the literal lives in the
    /// helper package itself.
    pub fn helper_qualifier(&self) -> Option<&str> {
        if self.helper_path() == self.package_path {
            None
        } else {
            Some(self.helper_name())
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("unqualify", &self.unqualify)
            .field("package_path", &self.package_path)
            .field("package_name", &self.package_name)
            .field("exported_only", &self.exported_only)
            .field("resolver", &self.resolver.as_ref().map(|_| ".."))
            .field("helper_path", &self.helper_path())
            .field("helper_name", &self.helper_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StaticResolver;

    #[test]
    fn test_default_is_zero() {
        let opt = Options::default();
        assert!(!opt.unqualify);
        assert!(!opt.exported_only);
        assert!(opt.package_path.is_empty());
        assert!(opt.resolver.is_none());
    }

    #[test]
    fn test_with_unqualify_leaves_original() {
        let opt = Options::new().package("a/b", "b");
        let derived = opt.with_unqualify(true);
        assert!(derived.unqualify);
        assert!(!opt.unqualify);
        assert_eq!(derived.package_path, "a/b");
    }

    #[test]
    fn test_qualifier() {
        let opt = Options::new().package("example.com/app", "app");
        assert_eq!(opt.qualifier("").unwrap(), None);
        assert_eq!(opt.qualifier("example.com/app").unwrap(), None);
        assert_eq!(
            opt.qualifier("example.com/lib").unwrap(),
            Some("lib".to_string())
        );
        // Different path, same package name.
        assert_eq!(opt.qualifier("example.com/other/app").unwrap(), None);
    }

    #[test]
    fn test_qualifier_uses_resolver() {
        let opt = Options::new().resolver(StaticResolver::new().with("example.com/x", "xx"));
        assert_eq!(opt.qualifier("example.com/x").unwrap(), Some("xx".into()));
        assert!(opt.qualifier("example.com/y").is_err());
    }

    #[test]
    fn test_helper_defaults() {
        let opt = Options::default();
        assert_eq!(opt.helper_path(), "golit");
        assert_eq!(opt.helper_name(), "golit");
        assert_eq!(opt.helper_qualifier(), Some("golit"));

        let opt = Options::new()
            .package("example.com/h", "h")
            .helpers("example.com/h", "h");
        assert_eq!(opt.helper_qualifier(), None);
    }
}
