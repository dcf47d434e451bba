//! Drives one pagination request end to end.

use super::args::{PageRequest, PaginationArgs};
use super::error::{PaginateError, PaginationArgsError};
use super::relay::Connection;
use crate::bookmark::BookmarkError;
use crate::constants::MAX_MARKER_FIELDS;
use crate::order::OrderColumn;
use crate::paging::Page;
use crate::source::{FetchQuery, RowSource};

/// Paginates a row source over a fixed list of ordering columns.
///
/// Create one per query shape; it holds no per-request state.
///
/// ```
/// use keyset::{Marker, MemorySource, OrderColumn, PaginationArgs, Paginator, Value};
///
/// let mut source = MemorySource::new((1..=5).collect::<Vec<i64>>(), |id: &i64, _: &[OrderColumn]| {
///     Marker::new(vec![Value::Int(*id)])
/// });
/// let paginator = Paginator::new(vec![OrderColumn::asc("id")]);
///
/// let conn = paginator.paginate(&PaginationArgs::new().first(2), &mut source).unwrap();
/// assert_eq!(conn.nodes().copied().collect::<Vec<_>>(), vec![1, 2]);
///
/// let after = conn.page_info.end_cursor.unwrap();
/// let conn = paginator
///     .paginate(&PaginationArgs::new().first(2).after(after), &mut source)
///     .unwrap();
/// assert_eq!(conn.nodes().copied().collect::<Vec<_>>(), vec![3, 4]);
/// ```
#[derive(Debug, Clone)]
pub struct Paginator {
    columns: Vec<OrderColumn>,
    max_per_page: Option<usize>,
}

impl Paginator {
    /// Create a paginator over `columns` in natural query order.
    #[must_use]
    pub const fn new(columns: Vec<OrderColumn>) -> Self {
        Self {
            columns,
            max_per_page: None,
        }
    }

    /// Reject page sizes above `max`.
    #[must_use]
    pub const fn max_per_page(mut self, max: usize) -> Self {
        self.max_per_page = Some(max);
        self
    }

    /// The ordering columns.
    #[must_use]
    pub fn columns(&self) -> &[OrderColumn] {
        &self.columns
    }

    /// Validate arguments and translate them into fetch parameters.
    ///
    /// Orderings wider than [`MAX_MARKER_FIELDS`] columns fail with
    /// [`PaginateError::BookmarkLimit`] before the arguments are looked at.
    pub fn request(&self, args: &PaginationArgs) -> Result<PageRequest, PaginateError> {
        if self.columns.len() > MAX_MARKER_FIELDS {
            return Err(PaginateError::BookmarkLimit(BookmarkError::TooManyFields));
        }

        let request = args.to_request(self.columns.len())?;

        if let Some(max) = self.max_per_page
            && request.per_page > max
        {
            let requested = args.first.or(args.last).unwrap_or_default();
            return Err(PaginationArgsError::PageTooLarge { requested, max }.into());
        }

        Ok(request)
    }

    /// Fetch one page: validate, call the row source once, build the page.
    ///
    /// Fails with [`PaginateError::BookmarkLimit`] when a boundary of the
    /// page would encode to a token the decoder rejects.
    pub fn fetch_page<S: RowSource>(
        &self,
        args: &PaginationArgs,
        source: &mut S,
    ) -> Result<Page<S::Row>, PaginateError<S::Error>> {
        let request = self.request(args).map_err(|e| e.widen())?;
        log::debug!(
            "paginate: direction={:?} per_page={} from_start={}",
            request.direction,
            request.per_page,
            request.place.is_none()
        );

        let query = FetchQuery {
            direction: request.direction,
            place: request.place.as_ref(),
            limit: request.limit(),
            columns: &self.columns,
        };
        let batch = source.fetch(&query).map_err(PaginateError::Source)?;

        let page = Page::from_batch(
            batch,
            request.per_page,
            request.direction,
            request.place,
            |row| source.marker(row, &self.columns),
        );
        page.paging()
            .check_bookmarks()
            .map_err(PaginateError::BookmarkLimit)?;
        Ok(page)
    }

    /// Fetch one page and assemble it into a connection.
    pub fn paginate<S: RowSource>(
        &self,
        args: &PaginationArgs,
        source: &mut S,
    ) -> Result<Connection<S::Row>, PaginateError<S::Error>> {
        self.fetch_page(args, source).map(Connection::from_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmark::Direction;
    use crate::value::{Marker, Value};

    /// Source that records calls and can be told to fail.
    struct Recording {
        rows: Vec<i64>,
        calls: Vec<(Direction, Option<Marker>, usize)>,
        fail: bool,
    }

    impl RowSource for Recording {
        type Row = i64;
        type Error = String;

        fn fetch(&mut self, query: &FetchQuery<'_>) -> Result<Vec<i64>, String> {
            self.calls
                .push((query.direction, query.place.cloned(), query.limit));
            if self.fail {
                return Err("connection reset".to_string());
            }
            Ok(self.rows.iter().copied().take(query.limit).collect())
        }

        fn marker(&self, row: &i64, _: &[OrderColumn]) -> Marker {
            Marker::new(vec![Value::Int(*row)])
        }
    }

    fn recording(rows: Vec<i64>) -> Recording {
        Recording {
            rows,
            calls: Vec::new(),
            fail: false,
        }
    }

    fn paginator() -> Paginator {
        Paginator::new(vec![OrderColumn::asc("id")])
    }

    #[test]
    fn test_overfetches_by_one() {
        let mut src = recording(vec![1, 2, 3, 4]);
        let page = paginator()
            .fetch_page(&PaginationArgs::new().first(2), &mut src)
            .unwrap();
        assert_eq!(src.calls, vec![(Direction::Forward, None, 3)]);
        assert_eq!(page.rows(), &[1, 2]);
    }

    #[test]
    fn test_invalid_args_never_fetch() {
        let mut src = recording(vec![1]);
        let err = paginator()
            .fetch_page(&PaginationArgs::new(), &mut src)
            .unwrap_err();
        assert!(matches!(
            err,
            PaginateError::InvalidArgs(PaginationArgsError::MissingFirstOrLast)
        ));
        assert!(src.calls.is_empty());

        let err = paginator()
            .fetch_page(&PaginationArgs::new().first(1).after("???"), &mut src)
            .unwrap_err();
        assert!(matches!(err, PaginateError::MalformedBookmark(_)));
        assert!(src.calls.is_empty());
    }

    #[test]
    fn test_source_error_passes_through() {
        let mut src = recording(vec![1]);
        src.fail = true;
        let err = paginator()
            .paginate(&PaginationArgs::new().last(1), &mut src)
            .unwrap_err();
        assert_eq!(err.into_source().as_deref(), Some("connection reset"));
        assert_eq!(src.calls.len(), 1);
    }

    #[test]
    fn test_too_many_columns_never_fetch() {
        let columns = (0..=MAX_MARKER_FIELDS)
            .map(|i| OrderColumn::asc(format!("c{i}")))
            .collect();
        let mut src = recording(vec![1]);
        let err = Paginator::new(columns)
            .fetch_page(&PaginationArgs::new().first(1), &mut src)
            .unwrap_err();
        assert!(matches!(
            err,
            PaginateError::BookmarkLimit(BookmarkError::TooManyFields)
        ));
        assert!(src.calls.is_empty());
    }

    #[test]
    fn test_max_per_page() {
        let mut src = recording(vec![1, 2]);
        let p = paginator().max_per_page(10);
        assert!(p.paginate(&PaginationArgs::new().first(10), &mut src).is_ok());
        let err = p
            .paginate(&PaginationArgs::new().last(11), &mut src)
            .unwrap_err();
        assert!(matches!(
            err,
            PaginateError::InvalidArgs(PaginationArgsError::PageTooLarge {
                requested: 11,
                max: 10
            })
        ));
    }
}
