//! In-memory row source.

use std::convert::Infallible;

use super::keyset::compare_markers;
use super::{FetchQuery, RowSource};
use crate::order::OrderColumn;
use crate::value::Marker;

/// A [`RowSource`] over rows held in memory.
///
/// Every fetch sorts by the scan order, applies the keyset condition and
/// takes `limit` rows. Useful for tests, fixtures and small static datasets.
///
/// ```
/// use keyset::{FetchQuery, Direction, Marker, MemorySource, OrderColumn, RowSource, Value};
///
/// let mut source = MemorySource::new(vec![3i64, 1, 2], |id: &i64, _: &[OrderColumn]| {
///     Marker::new(vec![Value::Int(*id)])
/// });
/// let columns = [OrderColumn::asc("id")];
/// let rows = source
///     .fetch(&FetchQuery { direction: Direction::Forward, place: None, limit: 2, columns: &columns })
///     .unwrap();
/// assert_eq!(rows, vec![1, 2]);
/// ```
pub struct MemorySource<T, F> {
    rows: Vec<T>,
    extract: F,
}

impl<T, F> MemorySource<T, F>
where
    F: Fn(&T, &[OrderColumn]) -> Marker,
{
    /// Create a source from rows and a marker extraction function.
    pub const fn new(rows: Vec<T>, extract: F) -> Self {
        Self { rows, extract }
    }

    /// Number of rows held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the source holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row.
    pub fn push(&mut self, row: T) {
        self.rows.push(row);
    }

    /// Remove rows that do not satisfy `keep`.
    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        self.rows.retain(keep);
    }
}

impl<T, F> std::fmt::Debug for MemorySource<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySource")
            .field("rows", &self.rows.len())
            .finish_non_exhaustive()
    }
}

impl<T, F> RowSource for MemorySource<T, F>
where
    T: Clone,
    F: Fn(&T, &[OrderColumn]) -> Marker,
{
    type Row = T;
    type Error = Infallible;

    fn fetch(&mut self, query: &FetchQuery<'_>) -> Result<Vec<T>, Infallible> {
        let scan = query.scan_order();
        let condition = query.condition();

        let mut candidates: Vec<(Marker, &T)> = self
            .rows
            .iter()
            .map(|row| ((self.extract)(row, query.columns), row))
            .filter(|(marker, _)| condition.as_ref().is_none_or(|c| c.admits(marker)))
            .collect();
        candidates.sort_by(|(a, _), (b, _)| compare_markers(a, b, &scan));

        Ok(candidates
            .into_iter()
            .take(query.limit)
            .map(|(_, row)| row.clone())
            .collect())
    }

    fn marker(&self, row: &T, columns: &[OrderColumn]) -> Marker {
        (self.extract)(row, columns)
    }
}
