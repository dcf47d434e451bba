//! Page: truncated rows in original query order plus their paging metadata.

use super::boundary::Paging;
use super::error::{PagingError, RowCountError};
use crate::bookmark::Direction;
use crate::value::Marker;

/// Rows of one page, oriented in the original (non-reversed) query order.
///
/// Built once per request from an overfetched row batch and read-only
/// afterward.
#[derive(Debug, Clone)]
pub struct Page<T> {
    rows: Vec<T>,
    paging: Paging,
}

impl<T> Page<T> {
    /// Build a page from a row batch in scan order.
    ///
    /// `batch` should hold at most `per_page + 1` rows fetched in
    /// `direction` starting from `current`. `get_marker` extracts the
    /// ordering-column values of a row.
    #[allow(clippy::indexing_slicing)] // Paging::compute only asks for indices below batch.len()
    pub fn from_batch<F>(
        batch: Vec<T>,
        per_page: usize,
        direction: Direction,
        current: Option<Marker>,
        mut get_marker: F,
    ) -> Self
    where
        F: FnMut(&T) -> Marker,
    {
        let paging = Paging::compute(batch.len(), per_page, direction, current, |i| {
            get_marker(&batch[i])
        });
        Self::orient(batch, paging)
    }

    /// Build a page from a row batch and one precomputed marker per row.
    #[allow(clippy::indexing_slicing)] // Paging::compute only asks for indices below batch.len()
    pub fn from_markers(
        batch: Vec<T>,
        markers: &[Marker],
        per_page: usize,
        direction: Direction,
        current: Option<Marker>,
    ) -> Result<Self, PagingError> {
        if markers.len() != batch.len() {
            return Err(PagingError::MarkerCountMismatch {
                rows: batch.len(),
                markers: markers.len(),
            });
        }

        let paging = Paging::compute(batch.len(), per_page, direction, current, |i| {
            markers[i].clone()
        });
        Ok(Self::orient(batch, paging))
    }

    /// Drop the excess rows and restore original query order.
    fn orient(mut batch: Vec<T>, paging: Paging) -> Self {
        batch.truncate(paging.per_page());
        if paging.backwards() {
            batch.reverse();
        }
        Self {
            rows: batch,
            paging,
        }
    }

    /// The rows of the page.
    #[must_use]
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Paging metadata.
    #[must_use]
    pub const fn paging(&self) -> &Paging {
        &self.paging
    }

    /// Number of rows on the page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the page has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The single row of a page requested with `per_page = 1`.
    pub fn one(&self) -> Result<&T, RowCountError> {
        match self.rows.as_slice() {
            [row] => Ok(row),
            [] => Err(RowCountError::NoRows),
            rows => Err(RowCountError::TooManyRows(rows.len())),
        }
    }

    /// Consume the page, returning its single row.
    pub fn into_one(self) -> Result<T, RowCountError> {
        match self.rows.len() {
            0 => Err(RowCountError::NoRows),
            1 => self.rows.into_iter().next().ok_or(RowCountError::NoRows),
            n => Err(RowCountError::TooManyRows(n)),
        }
    }

    /// Split into rows and paging metadata.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Paging) {
        (self.rows, self.paging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
    }

    fn rows(ids: &[i64]) -> Vec<Row> {
        ids.iter().map(|&id| Row { id }).collect()
    }

    fn marker(row: &Row) -> Marker {
        Marker::new(vec![Value::Int(row.id)])
    }

    fn ids<T: AsRef<[Row]>>(rows: T) -> Vec<i64> {
        rows.as_ref().iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_truncates_to_per_page() {
        let page = Page::from_batch(rows(&[1, 2, 3]), 2, Direction::Forward, None, marker);
        assert_eq!(ids(page.rows()), vec![1, 2]);
        assert!(page.paging().has_next());
        assert_eq!(
            page.paging().marker_nplus1(),
            Some(&Marker::new(vec![Value::Int(3)]))
        );
    }

    #[test]
    fn test_backward_rows_in_original_order() {
        let page = Page::from_batch(
            rows(&[5, 4, 3, 2]),
            3,
            Direction::Backward,
            Some(Marker::new(vec![Value::Int(6)])),
            marker,
        );
        assert_eq!(ids(page.rows()), vec![3, 4, 5]);
        assert!(page.paging().has_previous());
        assert!(page.paging().has_next());
    }

    #[test]
    fn test_from_markers_matches_from_batch() {
        let batch = rows(&[7, 8, 9]);
        let markers: Vec<Marker> = batch.iter().map(marker).collect();
        let page = Page::from_markers(batch.clone(), &markers, 2, Direction::Forward, None).unwrap();
        let expected = Page::from_batch(batch, 2, Direction::Forward, None, marker);
        assert_eq!(ids(page.rows()), ids(expected.rows()));
        assert_eq!(page.paging(), expected.paging());
    }

    #[test]
    fn test_from_markers_count_mismatch() {
        let err = Page::from_markers(rows(&[1, 2]), &[], 2, Direction::Forward, None).unwrap_err();
        assert_eq!(err, PagingError::MarkerCountMismatch { rows: 2, markers: 0 });

        // Empty batches need no markers
        assert!(Page::<Row>::from_markers(vec![], &[], 2, Direction::Forward, None).is_ok());
    }

    #[test]
    fn test_one() {
        let page = Page::from_batch(rows(&[4, 5]), 1, Direction::Forward, None, marker);
        assert_eq!(page.one().unwrap().id, 4);
        assert_eq!(page.into_one().unwrap().id, 4);

        let empty = Page::from_batch(rows(&[]), 1, Direction::Forward, None, marker);
        assert_eq!(empty.one(), Err(RowCountError::NoRows));

        let many = Page::from_batch(rows(&[1, 2, 3]), 5, Direction::Forward, None, marker);
        assert_eq!(many.one(), Err(RowCountError::TooManyRows(3)));
        assert_eq!(many.into_one(), Err(RowCountError::TooManyRows(3)));
    }

    #[test]
    fn test_empty_single_row_request_is_terminal() {
        let page = Page::from_batch(rows(&[]), 1, Direction::Forward, None, marker);
        assert!(page.is_empty());
        assert!(!page.paging().has_next());
        assert!(!page.paging().has_previous());
    }
}
