//! Row source boundary.
//!
//! The pagination core never builds or runs queries. A [`RowSource`] does:
//! given a [`FetchQuery`] it returns up to `limit` rows past `place` in the
//! scan order of `direction`, and it knows how to read a row's marker.
//!
//! A SQL-backed source typically renders [`FetchQuery::scan_order`] as its
//! `ORDER BY` and [`FetchQuery::condition`] as its seek `WHERE` clause.

mod keyset;
mod memory;

pub use keyset::{KeysetCondition, compare_markers};
pub use memory::MemorySource;

use crate::bookmark::Direction;
use crate::order::OrderColumn;
use crate::value::Marker;

/// Parameters of one row-source fetch.
#[derive(Debug, Clone, Copy)]
pub struct FetchQuery<'a> {
    /// Traversal direction relative to the natural query order.
    pub direction: Direction,
    /// Position to continue from; `None` starts at the edge of the sequence.
    pub place: Option<&'a Marker>,
    /// Maximum rows to return (`per_page + 1`).
    pub limit: usize,
    /// Ordering columns in natural query order.
    pub columns: &'a [OrderColumn],
}

impl FetchQuery<'_> {
    /// Ordering columns as scanned: reversed when travelling backward.
    #[must_use]
    pub fn scan_order(&self) -> Vec<OrderColumn> {
        self.columns
            .iter()
            .map(|c| {
                if self.direction.is_backward() {
                    OrderColumn::new(c.name.clone(), c.dir.reverse())
                } else {
                    c.clone()
                }
            })
            .collect()
    }

    /// The seek condition for `place`, if there is one.
    #[must_use]
    pub fn condition(&self) -> Option<KeysetCondition> {
        self.place
            .and_then(|place| KeysetCondition::toward(self.columns, place, self.direction))
    }
}

/// Supplies ordered rows to the pagination core.
///
/// `fetch` is called exactly once per pagination request and must return a
/// complete batch. Its errors are handed back to the caller untouched.
pub trait RowSource {
    /// Row type produced by the source.
    type Row;
    /// Error type of a failed fetch.
    type Error;

    /// Fetch up to `query.limit` rows in scan order.
    fn fetch(&mut self, query: &FetchQuery<'_>) -> Result<Vec<Self::Row>, Self::Error>;

    /// Extract the ordering-column values of a row.
    fn marker(&self, row: &Self::Row, columns: &[OrderColumn]) -> Marker;
}
