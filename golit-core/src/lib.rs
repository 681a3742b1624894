//! Shared building blocks for golit: Go naming rules, package-name resolution
//! and conversion options.

pub mod options;
pub mod resolver;
pub mod visibility;

pub use options::{DEFAULT_HELPER_PACKAGE, Options};
pub use resolver::{CachedResolver, FnResolver, PackageResolver, PathBaseResolver, ResolveError, StaticResolver};
pub use visibility::{GO_KEYWORDS, is_exported, is_identifier, is_keyword};
