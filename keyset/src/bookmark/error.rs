//! BookmarkError enum and implementations.

use crate::constants::MAX_MARKER_FIELDS;

/// Errors that can occur when decoding a bookmark.
///
/// Every variant is a client input error: the token came from outside and
/// is not usable. Decoding is never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BookmarkError {
    /// The token is not valid standard (padded) base64.
    InvalidBase64,
    /// The decoded bytes are not UTF-8 text.
    InvalidUtf8,
    /// The decoded text does not start with a direction character.
    MissingDirection,
    /// A field ends in a dangling escape character.
    DanglingEscape,
    /// A field could not be converted back into a typed value.
    InvalidValue {
        /// Zero-based position of the field
        index: usize,
        /// The offending field text
        field: String,
    },
    /// The marker has a different number of values than there are ordering columns.
    Arity {
        /// Number of ordering columns
        expected: usize,
        /// Number of decoded values
        found: usize,
    },
    /// The token exceeds the maximum allowed size.
    TooLarge {
        /// The configured limit in bytes
        limit: usize,
    },
    /// The marker has more fields than allowed.
    TooManyFields,
}

impl BookmarkError {
    /// Create an error for a field that failed to decode.
    #[inline]
    #[must_use]
    pub(crate) fn invalid_value(index: usize, field: &str) -> Self {
        Self::InvalidValue {
            index,
            field: field.to_string(),
        }
    }

    /// Returns `true` if this is an encoding/format error.
    #[inline]
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBase64
                | Self::InvalidUtf8
                | Self::MissingDirection
                | Self::DanglingEscape
                | Self::InvalidValue { .. }
        )
    }

    /// Returns `true` if this is a size/limit error.
    #[inline]
    #[must_use]
    pub const fn is_limit_error(&self) -> bool {
        matches!(self, Self::TooLarge { .. } | Self::TooManyFields)
    }
}

impl std::fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBase64 => write!(f, "malformed bookmark: invalid base64 encoding"),
            Self::InvalidUtf8 => write!(f, "malformed bookmark: payload is not UTF-8"),
            Self::MissingDirection => write!(
                f,
                "malformed bookmark: doesn't start with a direction marker"
            ),
            Self::DanglingEscape => write!(f, "malformed bookmark: dangling escape character"),
            Self::InvalidValue { index, field } => {
                write!(f, "malformed bookmark: field {index} ('{field}') is not a valid value")
            },
            Self::Arity { expected, found } => write!(
                f,
                "malformed bookmark: expected {expected} values, found {found}"
            ),
            Self::TooLarge { limit } => {
                write!(f, "malformed bookmark: exceeds maximum size ({limit} bytes)")
            },
            Self::TooManyFields => write!(
                f,
                "malformed bookmark: too many fields (max {MAX_MARKER_FIELDS})"
            ),
        }
    }
}

impl std::error::Error for BookmarkError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(BookmarkError::InvalidBase64.is_format_error());
        assert!(BookmarkError::invalid_value(0, "q:1").is_format_error());
        assert!(BookmarkError::TooManyFields.is_limit_error());
        assert!(BookmarkError::TooLarge { limit: 10 }.is_limit_error());
        let arity = BookmarkError::Arity {
            expected: 2,
            found: 1,
        };
        assert!(!arity.is_format_error());
        assert!(!arity.is_limit_error());
    }

    #[test]
    fn test_display_mentions_detail() {
        let msg = BookmarkError::invalid_value(2, "i:abc").to_string();
        assert!(msg.contains("field 2"));
        assert!(msg.contains("i:abc"));
        assert!(BookmarkError::MissingDirection
            .to_string()
            .contains("direction marker"));
    }
}
