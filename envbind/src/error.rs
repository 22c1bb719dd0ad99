//! Error types for environment variable binding

use crate::convert::Kind;

/// Errors that can occur when populating a value from environment variables.
///
/// Every error is terminal: the walk stops at the first failure and the
/// target may be left partially populated.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    /// A field annotated `required` had no corresponding environment entry.
    #[error("environment variable is required: {key:?}")]
    RequiredMissing {
        /// Fully composed key that was looked up
        key: String,
    },

    /// A value was present but could not be converted to the target kind.
    #[error("failed to parse environment variable {key:?} as {type_name}: {source}")]
    ConversionFailed {
        /// Key the raw value was read from
        key: String,
        /// Fully qualified type name that conversion was attempted for
        type_name: &'static str,
        /// Underlying conversion failure
        source: ConvertError,
    },

    /// The target shape has no defined handling.
    ///
    /// Fixed-size arrays, open-ended `dyn Any` leaves and sequence or mapping
    /// elements that are themselves composite all end up here.
    #[error("unsupported kind: {kind}")]
    UnsupportedKind {
        /// Description of the offending kind
        kind: String,
    },

    /// The target cannot be written through.
    #[error("cannot populate non-reference type {type_name}")]
    InvalidTarget {
        /// Fully qualified type name of the target
        type_name: &'static str,
    },

    /// A field annotation could not be parsed.
    #[error("invalid annotation {annotation:?}: {reason}")]
    InvalidAnnotation {
        /// Raw annotation string as written on the field
        annotation: String,
        /// What was wrong with it
        reason: String,
    },
}

impl EnvError {
    pub(crate) fn required(key: impl Into<String>) -> Self {
        Self::RequiredMissing { key: key.into() }
    }

    /// Wrap a converter failure, lifting unsupported kinds to
    /// [`EnvError::UnsupportedKind`].
    pub(crate) fn conversion(
        key: impl Into<String>,
        type_name: &'static str,
        source: ConvertError,
    ) -> Self {
        match source {
            ConvertError::Unsupported(kind) => Self::unsupported(kind),
            source => Self::ConversionFailed {
                key: key.into(),
                type_name,
                source,
            },
        }
    }

    pub(crate) fn unsupported(kind: impl std::fmt::Display) -> Self {
        Self::UnsupportedKind {
            kind: kind.to_string(),
        }
    }
}

/// Failure of a single string-to-value conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Int(#[from] std::num::ParseIntError),

    #[error(transparent)]
    Float(#[from] std::num::ParseFloatError),

    #[error("invalid boolean {0:?}, expected true, false, 1 or 0")]
    Bool(String),

    #[cfg(feature = "json")]
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("unsupported kind {0}")]
    Unsupported(Kind),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_conversion_is_lifted() {
        let err = EnvError::conversion(
            "KEY",
            "alloc::vec::Vec<u8>",
            ConvertError::Unsupported(Kind::Unsupported("sequence")),
        );
        assert!(matches!(err, EnvError::UnsupportedKind { .. }));
        assert_eq!(err.to_string(), "unsupported kind: sequence");
    }

    #[test]
    fn test_required_message_names_key() {
        let err = EnvError::required("APP_PORT");
        assert_eq!(
            err.to_string(),
            "environment variable is required: \"APP_PORT\""
        );
    }

    #[test]
    fn test_conversion_message() {
        let source = "x".parse::<u16>().unwrap_err();
        let err = EnvError::conversion("PORT", "u16", source.into());
        assert!(matches!(err, EnvError::ConversionFailed { .. }));
        assert!(err
            .to_string()
            .starts_with("failed to parse environment variable \"PORT\" as u16"));
    }
}
