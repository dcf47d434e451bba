//! Keyset seek condition.

use std::cmp::Ordering;

use crate::bookmark::Direction;
use crate::order::{OrderColumn, SortDir};
use crate::value::{Marker, Value};

/// Compare two markers column by column under the given ordering.
///
/// Missing trailing values compare as less than present ones.
#[must_use]
pub fn compare_markers(a: &Marker, b: &Marker, columns: &[OrderColumn]) -> Ordering {
    for (i, column) in columns.iter().enumerate() {
        let ord = match (a.values().get(i), b.values().get(i)) {
            (Some(x), Some(y)) => x.total_cmp(y),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        let ord = match column.dir {
            SortDir::Asc => ord,
            SortDir::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Keyset seek condition.
///
/// Admits the rows strictly beyond a place in the direction of travel:
/// `(a, b) > (1, 2)` for an ascending forward seek, which expands to
/// `(a > 1) OR (a = 1 AND b > 2)`. Each column's own [`SortDir`] flips its
/// comparison, and a backward seek flips all of them.
///
/// See: <https://use-the-index-luke.com/no-offset>
#[derive(Debug, Clone)]
pub struct KeysetCondition {
    /// The ordering columns and their directions.
    pub columns: Vec<OrderColumn>,
    /// The place values, one per column.
    pub values: Vec<Value>,
    /// Direction: true for "after", false for "before".
    pub forward: bool,
}

impl KeysetCondition {
    /// Condition for rows after `place`.
    #[must_use]
    pub fn after(columns: &[OrderColumn], place: &Marker) -> Option<Self> {
        Self::new(columns, place, true)
    }

    /// Condition for rows before `place`.
    #[must_use]
    pub fn before(columns: &[OrderColumn], place: &Marker) -> Option<Self> {
        Self::new(columns, place, false)
    }

    /// Condition for a traversal `direction` from `place`.
    #[must_use]
    pub fn toward(columns: &[OrderColumn], place: &Marker, direction: Direction) -> Option<Self> {
        Self::new(columns, place, !direction.is_backward())
    }

    fn new(columns: &[OrderColumn], place: &Marker, forward: bool) -> Option<Self> {
        if columns.is_empty() || place.len() != columns.len() {
            return None;
        }

        Some(Self {
            columns: columns.to_vec(),
            values: place.values().to_vec(),
            forward,
        })
    }

    /// The ordering-column comparison a column must satisfy to move on.
    fn wanted(&self, dir: SortDir) -> Ordering {
        match (self.forward, dir) {
            (true, SortDir::Asc) | (false, SortDir::Desc) => Ordering::Greater,
            (true, SortDir::Desc) | (false, SortDir::Asc) => Ordering::Less,
        }
    }

    /// Returns `true` if a row at `marker` lies strictly beyond the place.
    #[must_use]
    pub fn admits(&self, marker: &Marker) -> bool {
        if marker.len() != self.values.len() {
            return false;
        }

        for ((column, value), place) in self.columns.iter().zip(marker).zip(&self.values) {
            match value.total_cmp(place) {
                Ordering::Equal => {},
                ord => return ord == self.wanted(column.dir),
            }
        }
        false
    }
}
