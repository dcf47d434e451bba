//! Pagination argument and request errors.

use std::convert::Infallible;

use crate::bookmark::BookmarkError;
use crate::constants::MAX_MARKER_FIELDS;

/// A client supplied an unsupported combination of pagination arguments.
///
/// Each rule of [`PaginationArgs::validate`](super::PaginationArgs::validate)
/// has its own variant and message.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PaginationArgsError {
    /// Neither `first` nor `last` was given.
    MissingFirstOrLast,
    /// Both `first` and `last` were given.
    BothFirstAndLast,
    /// `first` is negative.
    NegativeFirst(i64),
    /// `last` is negative.
    NegativeLast(i64),
    /// `before` was given without `last`.
    BeforeWithoutLast,
    /// `after` was given without `first`.
    AfterWithoutFirst,
    /// `before` and `after` were both given.
    BeforeAndAfter,
    /// The requested page size exceeds the configured maximum.
    PageTooLarge {
        /// Requested page size
        requested: i64,
        /// Configured maximum
        max: usize,
    },
}

impl std::fmt::Display for PaginationArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFirstOrLast => write!(f, "Please provide one of first or last."),
            Self::BothFirstAndLast => write!(
                f,
                "Providing both first and last is not supported, as it leads to \
                 confusing queries and results."
            ),
            Self::NegativeFirst(n) => write!(f, "First cannot be less than zero (got {n})."),
            Self::NegativeLast(n) => write!(f, "Last cannot be less than zero (got {n})."),
            Self::BeforeWithoutLast => write!(f, "Before without last is not supported."),
            Self::AfterWithoutFirst => write!(f, "After without first is not supported."),
            Self::BeforeAndAfter => write!(f, "Mixing before and after is not supported."),
            Self::PageTooLarge { requested, max } => {
                write!(f, "Page size {requested} exceeds the maximum of {max}.")
            },
        }
    }
}

impl std::error::Error for PaginationArgsError {}

/// Failure of a pagination request.
///
/// `InvalidArgs` and `MalformedBookmark` are client input errors detected
/// before the row source is called. `BookmarkLimit` means the ordering or the
/// fetched rows would produce a bookmark the decoder rejects. `Source` carries
/// the row source's own error unchanged.
#[derive(Debug)]
#[non_exhaustive]
pub enum PaginateError<E = Infallible> {
    /// The argument combination is not supported.
    InvalidArgs(PaginationArgsError),
    /// The `before`/`after` bookmark could not be decoded.
    MalformedBookmark(BookmarkError),
    /// A page boundary cannot be encoded within the bookmark limits.
    BookmarkLimit(BookmarkError),
    /// The row source failed.
    Source(E),
}

impl<E> PaginateError<E> {
    /// Returns `true` for errors caused by client input.
    #[inline]
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArgs(_) | Self::MalformedBookmark(_))
    }

    /// The row source error, if that is what failed.
    #[must_use]
    pub fn into_source(self) -> Option<E> {
        match self {
            Self::Source(e) => Some(e),
            _ => None,
        }
    }
}

impl PaginateError {
    /// Widen an error raised before any fetch to a source-specific error type.
    #[must_use]
    pub fn widen<E>(self) -> PaginateError<E> {
        match self {
            Self::InvalidArgs(e) => PaginateError::InvalidArgs(e),
            Self::MalformedBookmark(e) => PaginateError::MalformedBookmark(e),
            Self::BookmarkLimit(e) => PaginateError::BookmarkLimit(e),
            Self::Source(never) => match never {},
        }
    }
}

impl<E> From<PaginationArgsError> for PaginateError<E> {
    fn from(e: PaginationArgsError) -> Self {
        Self::InvalidArgs(e)
    }
}

impl<E> From<BookmarkError> for PaginateError<E> {
    fn from(e: BookmarkError) -> Self {
        Self::MalformedBookmark(e)
    }
}

impl<E: std::fmt::Display> std::fmt::Display for PaginateError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgs(e) => write!(f, "invalid pagination arguments: {e}"),
            Self::MalformedBookmark(e) => write!(f, "{e}"),
            Self::BookmarkLimit(BookmarkError::TooManyFields) => write!(
                f,
                "ordering has more than {MAX_MARKER_FIELDS} columns, bookmarks would not decode"
            ),
            Self::BookmarkLimit(BookmarkError::TooLarge { limit }) => write!(
                f,
                "page boundary does not fit in a bookmark of {limit} bytes"
            ),
            Self::BookmarkLimit(e) => write!(f, "page boundary cannot be bookmarked: {e}"),
            Self::Source(e) => write!(f, "{e}"),
        }
    }
}

impl<E> std::error::Error for PaginateError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidArgs(e) => Some(e),
            Self::MalformedBookmark(e) | Self::BookmarkLimit(e) => Some(e),
            Self::Source(e) => Some(e),
        }
    }
}
