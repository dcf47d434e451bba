//! Errors raised while building or reading a page.

/// A single-row accessor found zero rows or more than one.
///
/// This is a caller-logic error (the caller expected exactly one row), not a
/// client pagination error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RowCountError {
    /// The page is empty.
    NoRows,
    /// The page holds more than one row.
    TooManyRows(usize),
}

impl std::fmt::Display for RowCountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRows => write!(f, "expected exactly one row, found none"),
            Self::TooManyRows(n) => write!(f, "expected exactly one row, found {n}"),
        }
    }
}

impl std::error::Error for RowCountError {}

/// A page could not be assembled from the given batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PagingError {
    /// Precomputed markers do not line up with the row batch.
    MarkerCountMismatch {
        /// Rows in the batch
        rows: usize,
        /// Markers supplied
        markers: usize,
    },
}

impl std::fmt::Display for PagingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MarkerCountMismatch { rows, markers } => {
                write!(f, "{markers} markers supplied for {rows} rows")
            },
        }
    }
}

impl std::error::Error for PagingError {}
