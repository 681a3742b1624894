use golit_codegen::FormatError;
use golit_core::ResolveError;
use golit_ir::Kind;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for conversions.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("cannot convert value of type {type_name}")]
    #[diagnostic(
        code(golit::unsupported_kind),
        help("{kind} values have no literal form; leave the field nil or exclude it")
    )]
    UnsupportedKind { type_name: String, kind: Kind },

    #[error("pointers to interfaces are not allowed, found {type_name}")]
    #[diagnostic(
        code(golit::pointer_to_interface),
        help("a pointer to a non-nil interface cannot be written as one expression")
    )]
    PointerToInterface { type_name: String },

    #[error("cannot convert unexported value {type_name}")]
    #[diagnostic(
        code(golit::unexported),
        help("the value's type is not exported to the target package; disable exported_only to allow it")
    )]
    Unexported { type_name: String },

    #[error(transparent)]
    #[diagnostic(code(golit::resolve))]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    #[diagnostic(code(golit::format))]
    Format(#[from] FormatError),

    #[error("malformed snapshot: {reason}")]
    #[diagnostic(code(golit::malformed))]
    Malformed { reason: String },
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::Malformed {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::UnsupportedKind {
            type_name: "func()".into(),
            kind: Kind::Func,
        };
        assert_eq!(err.to_string(), "cannot convert value of type func()");

        let err = Error::PointerToInterface {
            type_name: "*interface {}".into(),
        };
        assert_eq!(
            err.to_string(),
            "pointers to interfaces are not allowed, found *interface {}"
        );

        let err = Error::from(ResolveError::Unresolvable {
            path: "x".into(),
        });
        assert_eq!(
            err.to_string(),
            "cannot determine package name for import path 'x'"
        );
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = Error::Unexported {
            type_name: "pkg.t".into(),
        };
        assert_eq!(err.code().unwrap().to_string(), "golit::unexported");
        assert_eq!(
            Error::malformed("x").code().unwrap().to_string(),
            "golit::malformed"
        );
    }
}
