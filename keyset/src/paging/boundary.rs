//! Page-boundary markers.

use crate::bookmark::{Bookmark, BookmarkError, Direction, encode, try_encode};
use crate::value::Marker;

/// One boundary of a page: a marker (if the boundary exists) and the
/// direction a fetch starting there should travel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary<'a> {
    /// Marker at the boundary; `None` when there are no rows past it.
    pub marker: Option<&'a Marker>,
    /// Direction of a fetch starting at this boundary.
    pub direction: Direction,
}

impl Boundary<'_> {
    /// Returns `true` if the boundary has a marker.
    #[inline]
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.marker.is_some()
    }

    /// Encode the boundary as a bookmark token, or `None` if absent.
    #[must_use]
    pub fn encode(&self) -> Option<String> {
        self.marker.map(|m| encode(m, self.direction))
    }

    /// Like [`Self::encode`], but fails where the token would not decode.
    pub fn try_encode(&self) -> Result<Option<String>, BookmarkError> {
        self.marker.map(|m| try_encode(m, self.direction)).transpose()
    }

    /// An owned bookmark for this boundary.
    #[must_use]
    pub fn to_bookmark(&self) -> Bookmark {
        Bookmark {
            marker: self.marker.cloned(),
            direction: self.direction,
        }
    }
}

/// Paging metadata for one page.
///
/// Holds the markers in fetch order:
/// - `marker_0`: the position the fetch started from
/// - `marker_1`: the first fetched row on the page
/// - `marker_n`: the last fetched row on the page
/// - `marker_nplus1`: the lookahead row beyond the page, present iff the batch
///   overflowed `per_page`
///
/// The logical `previous`/`first`/`last`/`next` boundaries are always in the
/// original query order: a backward fetch reverses the four.
#[derive(Debug, Clone, PartialEq)]
pub struct Paging {
    per_page: usize,
    direction: Direction,
    rows: usize,
    marker_0: Option<Marker>,
    marker_1: Option<Marker>,
    marker_n: Option<Marker>,
    marker_nplus1: Option<Marker>,
}

impl Paging {
    /// Compute paging for a batch of `batch_len` rows fetched in `direction`.
    ///
    /// `marker_at(i)` must return the marker of the row at batch index `i`;
    /// it is only called for the first and last page rows and the lookahead row.
    pub fn compute<F>(
        batch_len: usize,
        per_page: usize,
        direction: Direction,
        current: Option<Marker>,
        mut marker_at: F,
    ) -> Self
    where
        F: FnMut(usize) -> Marker,
    {
        let rows = batch_len.min(per_page);
        let excess = batch_len - rows;

        let (marker_1, marker_n) = if rows > 0 {
            (Some(marker_at(0)), Some(marker_at(rows - 1)))
        } else {
            (None, None)
        };
        let marker_nplus1 = (excess > 0).then(|| marker_at(rows));

        if excess > 1 {
            log::debug!("row batch overfetched by {excess}, only the first lookahead row is used");
        }
        log::trace!(
            "paging: {rows} rows of {per_page}, direction={direction:?}, more={}",
            marker_nplus1.is_some()
        );

        Self {
            per_page,
            direction,
            rows,
            marker_0: current,
            marker_1,
            marker_n,
            marker_nplus1,
        }
    }

    /// Requested page size.
    #[must_use]
    pub const fn per_page(&self) -> usize {
        self.per_page
    }

    /// Direction the page was fetched in.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` if the page was fetched backward.
    #[must_use]
    pub const fn backwards(&self) -> bool {
        self.direction.is_backward()
    }

    /// Starting position of the fetch.
    #[must_use]
    pub const fn marker_0(&self) -> Option<&Marker> {
        self.marker_0.as_ref()
    }

    /// First row in fetch order.
    #[must_use]
    pub const fn marker_1(&self) -> Option<&Marker> {
        self.marker_1.as_ref()
    }

    /// Last row in fetch order.
    #[must_use]
    pub const fn marker_n(&self) -> Option<&Marker> {
        self.marker_n.as_ref()
    }

    /// Probe row beyond the page, in fetch order.
    #[must_use]
    pub const fn marker_nplus1(&self) -> Option<&Marker> {
        self.marker_nplus1.as_ref()
    }

    /// `[previous, first, last, next]` in original query order.
    const fn ordered(&self) -> [Option<&Marker>; 4] {
        let fetch_order = [
            self.marker_0.as_ref(),
            self.marker_1.as_ref(),
            self.marker_n.as_ref(),
            self.marker_nplus1.as_ref(),
        ];
        if self.direction.is_backward() {
            let [m0, m1, mn, mn1] = fetch_order;
            [mn1, mn, m1, m0]
        } else {
            fetch_order
        }
    }

    /// Boundary before the page; a fetch from here travels backward.
    #[must_use]
    pub const fn previous(&self) -> Boundary<'_> {
        Boundary {
            marker: self.ordered()[0],
            direction: Direction::Backward,
        }
    }

    /// First row of the page; a fetch from here travels backward.
    #[must_use]
    pub const fn first(&self) -> Boundary<'_> {
        Boundary {
            marker: self.ordered()[1],
            direction: Direction::Backward,
        }
    }

    /// Last row of the page; a fetch from here travels forward.
    #[must_use]
    pub const fn last(&self) -> Boundary<'_> {
        Boundary {
            marker: self.ordered()[2],
            direction: Direction::Forward,
        }
    }

    /// Boundary after the page; a fetch from here travels forward.
    #[must_use]
    pub const fn next(&self) -> Boundary<'_> {
        Boundary {
            marker: self.ordered()[3],
            direction: Direction::Forward,
        }
    }

    /// The boundary this page was reached through.
    #[must_use]
    pub const fn current(&self) -> Boundary<'_> {
        if self.direction.is_backward() {
            self.previous()
        } else {
            self.next()
        }
    }

    /// The boundary on the other side of the page from [`Self::current`].
    #[must_use]
    pub const fn current_opposite(&self) -> Boundary<'_> {
        if self.direction.is_backward() {
            self.next()
        } else {
            self.previous()
        }
    }

    /// The boundary to continue from in the current travel direction.
    #[must_use]
    pub const fn further(&self) -> Boundary<'_> {
        self.current()
    }

    /// More rows exist after this page (original order).
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next().is_present()
    }

    /// More rows exist before this page (original order).
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.previous().is_present()
    }

    /// More rows exist in the direction of travel.
    #[must_use]
    pub const fn has_further(&self) -> bool {
        if self.direction.is_backward() {
            self.has_previous()
        } else {
            self.has_next()
        }
    }

    /// The page holds exactly `per_page` rows.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.rows == self.per_page
    }

    /// Encoded [`Self::previous`] boundary.
    #[must_use]
    pub fn bookmark_previous(&self) -> Option<String> {
        self.previous().encode()
    }

    /// Encoded [`Self::first`] boundary.
    #[must_use]
    pub fn bookmark_first(&self) -> Option<String> {
        self.first().encode()
    }

    /// Encoded [`Self::last`] boundary.
    #[must_use]
    pub fn bookmark_last(&self) -> Option<String> {
        self.last().encode()
    }

    /// Encoded [`Self::next`] boundary.
    #[must_use]
    pub fn bookmark_next(&self) -> Option<String> {
        self.next().encode()
    }

    /// Check that every present boundary encodes to a token within the
    /// decoder's size and field-count limits.
    pub fn check_bookmarks(&self) -> Result<(), BookmarkError> {
        for boundary in [self.previous(), self.first(), self.last(), self.next()] {
            boundary.try_encode()?;
        }
        Ok(())
    }
}
