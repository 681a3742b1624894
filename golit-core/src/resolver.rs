//! Package-name resolution.
//!
//! A generated literal refers to foreign types as `pkg.Name`, where `pkg` is the
//! name declared by the package's source, not its import path. Resolving that
//! name may require I/O, so it sits behind the [`PackageResolver`] trait and can
//! be replaced per conversion.

use std::{collections::HashMap, fmt, sync::Mutex};

use indexmap::IndexMap;
use thiserror::Error;

use crate::visibility::is_identifier;

/// Error returned by a [`PackageResolver`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("cannot determine package name for import path '{path}'")]
    Unresolvable { path: String },

    #[error("package lookup for '{path}' failed: {message}")]
    Lookup { path: String, message: String },
}

/// Maps an import path to the package name used to qualify its identifiers.
pub trait PackageResolver: Send + Sync {
    /// Resolve `import_path` to its package name.
    fn resolve(&self, import_path: &str) -> Result<String, ResolveError>;
}

/// Resolver following the `goimports` assumed-name convention.
///
/// The last path element is used, skipping a trailing `vN` major version
/// element, dropping a `go-` prefix and cutting at the first character that
/// cannot appear in an identifier.
///
/// ```
/// use golit_core::{PackageResolver, PathBaseResolver};
///
/// let r = PathBaseResolver;
/// assert_eq!(r.resolve("github.com/hexops/valast").unwrap(), "valast");
/// assert_eq!(r.resolve("gopkg.in/yaml.v3").unwrap(), "yaml");
/// assert_eq!(r.resolve("github.com/google/go-cmp/v2").unwrap(), "cmp");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PathBaseResolver;

impl PackageResolver for PathBaseResolver {
    fn resolve(&self, import_path: &str) -> Result<String, ResolveError> {
        let mut segments = import_path.trim_end_matches('/').rsplit('/');
        let mut base = segments.next().unwrap_or_default();

        if is_major_version(base) {
            if let Some(parent) = segments.next() {
                base = parent;
            }
        }

        let base = base.strip_prefix("go-").unwrap_or(base);
        let end = base
            .char_indices()
            .find(|&(_, c)| !(c.is_alphanumeric() || c == '_'))
            .map_or(base.len(), |(i, _)| i);
        let name = &base[..end];

        if is_identifier(name) {
            Ok(name.to_string())
        } else {
            Err(ResolveError::Unresolvable {
                path: import_path.to_string(),
            })
        }
    }
}

fn is_major_version(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Resolver backed by an explicit import path to package name table.
///
/// Paths missing from the table are passed to the fallback, if any.
#[derive(Default)]
pub struct StaticResolver {
    names: IndexMap<String, String>,
    fallback: Option<Box<dyn PackageResolver>>,
}

impl StaticResolver {
    /// Create an empty table without fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path to name mapping.
    pub fn with(mut self, path: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(path.into(), name.into());
        self
    }

    /// Use `fallback` for paths missing from the table.
    pub fn with_fallback(mut self, fallback: impl PackageResolver + 'static) -> Self {
        self.fallback = Some(Box::new(fallback));
        self
    }

    /// Iterate over the explicit mappings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for StaticResolver
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            fallback: None,
        }
    }
}

impl fmt::Debug for StaticResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticResolver")
            .field("names", &self.names)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

impl PackageResolver for StaticResolver {
    fn resolve(&self, import_path: &str) -> Result<String, ResolveError> {
        if let Some(name) = self.names.get(import_path) {
            return Ok(name.clone());
        }
        match &self.fallback {
            Some(fallback) => fallback.resolve(import_path),
            None => Err(ResolveError::Unresolvable {
                path: import_path.to_string(),
            }),
        }
    }
}

/// Adapts a closure into a [`PackageResolver`].
///
/// ```
/// use golit_core::{FnResolver, PackageResolver};
///
/// let r = FnResolver(|path: &str| Ok(path.replace('/', "_")));
/// assert_eq!(r.resolve("a/b").unwrap(), "a_b");
/// ```
pub struct FnResolver<F>(pub F);

impl<F> PackageResolver for FnResolver<F>
where
    F: Fn(&str) -> Result<String, ResolveError> + Send + Sync,
{
    fn resolve(&self, import_path: &str) -> Result<String, ResolveError> {
        (self.0)(import_path)
    }
}

impl<F> fmt::Debug for FnResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnResolver")
    }
}

/// Memoizes the results of another resolver.
///
/// Failed lookups are cached as well, so a slow failing resolver is only
/// consulted once per path.
pub struct CachedResolver<R> {
    inner: R,
    cache: Mutex<HashMap<String, Result<String, ResolveError>>>,
}

impl<R: PackageResolver> CachedResolver<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

impl<R: PackageResolver> PackageResolver for CachedResolver<R> {
    fn resolve(&self, import_path: &str) -> Result<String, ResolveError> {
        let mut cache = match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(hit) = cache.get(import_path) {
            return hit.clone();
        }
        log::trace!("resolving package name for {import_path}");
        let result = self.inner.resolve(import_path);
        cache.insert(import_path.to_string(), result.clone());
        result
    }
}

impl<R> fmt::Debug for CachedResolver<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_path_base_resolver() {
        let r = PathBaseResolver;
        assert_eq!(r.resolve("fmt").unwrap(), "fmt");
        assert_eq!(r.resolve("net/http").unwrap(), "http");
        assert_eq!(r.resolve("github.com/hexops/valast/").unwrap(), "valast");
        assert_eq!(r.resolve("github.com/mattn/go-isatty").unwrap(), "isatty");
        assert_eq!(r.resolve("example.com/mod/v2").unwrap(), "mod");
        assert_eq!(r.resolve("gopkg.in/yaml.v3").unwrap(), "yaml");
    }

    #[test]
    fn test_path_base_resolver_unresolvable() {
        let r = PathBaseResolver;
        assert!(matches!(
            r.resolve(""),
            Err(ResolveError::Unresolvable { .. })
        ));
        assert!(r.resolve("example.com/.hidden").is_err());
        assert!(r.resolve("example.com/123").is_err());
    }

    #[test]
    fn test_static_resolver() {
        let r = StaticResolver::new().with("example.com/x/api-v1", "api");
        assert_eq!(r.resolve("example.com/x/api-v1").unwrap(), "api");
        assert!(r.resolve("example.com/other").is_err());

        let r = r.with_fallback(PathBaseResolver);
        assert_eq!(r.resolve("example.com/other").unwrap(), "other");
    }

    #[test]
    fn test_static_resolver_from_iter() {
        let r: StaticResolver = [("a/b", "bee"), ("c/d", "dee")].into_iter().collect();
        let entries: Vec<_> = r.iter().collect();
        assert_eq!(entries, vec![("a/b", "bee"), ("c/d", "dee")]);
    }

    #[test]
    fn test_fn_resolver_error() {
        let r = FnResolver(|path: &str| {
            Err(ResolveError::Lookup {
                path: path.to_string(),
                message: "offline".to_string(),
            })
        });
        let err = r.resolve("a/b").unwrap_err();
        assert_eq!(err.to_string(), "package lookup for 'a/b' failed: offline");
    }

    #[test]
    fn test_cached_resolver_calls_inner_once() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let r = CachedResolver::new(FnResolver(|path: &str| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            PathBaseResolver.resolve(path)
        }));

        assert_eq!(r.resolve("a/b").unwrap(), "b");
        assert_eq!(r.resolve("a/b").unwrap(), "b");
        assert_eq!(r.resolve("a/c").unwrap(), "c");
        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    }
}
