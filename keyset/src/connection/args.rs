//! Client pagination arguments and their translation to fetch parameters.

use super::error::{PaginateError, PaginationArgsError};
use crate::bookmark::{Bookmark, Direction};
use crate::value::Marker;

/// Relay-style pagination arguments as received from a client.
///
/// `first`/`last` are signed so negative input can be reported rather than
/// lost in a conversion. Empty `before`/`after` strings count as absent.
///
/// ```
/// use keyset::{Direction, PaginationArgs};
///
/// let args = PaginationArgs::new().last(10);
/// assert!(args.validate().is_ok());
/// assert_eq!(args.direction(), Direction::Backward);
///
/// let bad = PaginationArgs::new().first(5).last(5);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationArgs {
    /// Bookmark to page backward from.
    pub before: Option<String>,
    /// Bookmark to page forward from.
    pub after: Option<String>,
    /// Forward page size.
    pub first: Option<i64>,
    /// Backward page size.
    pub last: Option<i64>,
}

impl PaginationArgs {
    /// Empty arguments.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            before: None,
            after: None,
            first: None,
            last: None,
        }
    }

    /// Set `first`.
    pub fn first(mut self, n: i64) -> Self {
        self.first = Some(n);
        self
    }

    /// Set `last`.
    pub fn last(mut self, n: i64) -> Self {
        self.last = Some(n);
        self
    }

    /// Set `after`.
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    /// Set `before`.
    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    fn before_cursor(&self) -> Option<&str> {
        self.before.as_deref().filter(|s| !s.is_empty())
    }

    fn after_cursor(&self) -> Option<&str> {
        self.after.as_deref().filter(|s| !s.is_empty())
    }

    /// Check the argument combination.
    ///
    /// Rules, in order:
    /// 1. exactly one of `first` and `last`
    /// 2. `first` and `last` are not negative
    /// 3. `before` requires `last`, `after` requires `first`
    /// 4. not both `before` and `after`
    pub fn validate(&self) -> Result<(), PaginationArgsError> {
        match (self.first, self.last) {
            (None, None) => return Err(PaginationArgsError::MissingFirstOrLast),
            (Some(_), Some(_)) => return Err(PaginationArgsError::BothFirstAndLast),
            _ => {},
        }

        if let Some(n) = self.first
            && n < 0
        {
            return Err(PaginationArgsError::NegativeFirst(n));
        }
        if let Some(n) = self.last
            && n < 0
        {
            return Err(PaginationArgsError::NegativeLast(n));
        }

        let has_before = self.before_cursor().is_some();
        let has_after = self.after_cursor().is_some();

        if has_before && self.last.is_none() {
            return Err(PaginationArgsError::BeforeWithoutLast);
        }
        if has_after && self.first.is_none() {
            return Err(PaginationArgsError::AfterWithoutFirst);
        }
        if has_before && has_after {
            return Err(PaginationArgsError::BeforeAndAfter);
        }

        Ok(())
    }

    /// Traversal direction: backward iff `last` is set.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        if self.last.is_some() {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    /// Validate and translate into fetch parameters.
    ///
    /// The cursor for the chosen direction is decoded and its marker checked
    /// against `columns` ordering columns. Nothing is fetched.
    pub fn to_request(&self, columns: usize) -> Result<PageRequest, PaginateError> {
        self.validate()?;

        let direction = self.direction();
        let (cursor, size) = if direction.is_backward() {
            (self.before_cursor(), self.last)
        } else {
            (self.after_cursor(), self.first)
        };

        let place = match cursor {
            Some(token) => Bookmark::decode_with_arity(token, columns)?.marker,
            None => None,
        };
        let per_page = size.map_or(0, |n| usize::try_from(n).unwrap_or(usize::MAX));

        Ok(PageRequest {
            direction,
            place,
            per_page,
        })
    }
}

/// Low-level paging parameters derived from [`PaginationArgs`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// Traversal direction.
    pub direction: Direction,
    /// Starting position; `None` starts at the edge of the sequence.
    pub place: Option<Marker>,
    /// Rows per page.
    pub per_page: usize,
}

impl PageRequest {
    /// Rows to ask the row source for: one more than fits on the page.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.per_page.saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmark::{BookmarkError, encode};
    use crate::value::Value;

    #[test]
    fn test_validation_order() {
        assert_eq!(
            PaginationArgs::new().validate(),
            Err(PaginationArgsError::MissingFirstOrLast)
        );
        assert_eq!(
            PaginationArgs::new().first(-1).last(-1).validate(),
            Err(PaginationArgsError::BothFirstAndLast)
        );
        assert_eq!(
            PaginationArgs::new().first(-3).validate(),
            Err(PaginationArgsError::NegativeFirst(-3))
        );
        assert_eq!(
            PaginationArgs::new().last(-2).validate(),
            Err(PaginationArgsError::NegativeLast(-2))
        );
        assert_eq!(
            PaginationArgs::new().first(1).before("x").validate(),
            Err(PaginationArgsError::BeforeWithoutLast)
        );
        assert_eq!(
            PaginationArgs::new().last(1).after("x").validate(),
            Err(PaginationArgsError::AfterWithoutFirst)
        );
    }

    #[test]
    fn test_zero_is_a_valid_size() {
        assert!(PaginationArgs::new().first(0).validate().is_ok());
        assert!(PaginationArgs::new().last(0).validate().is_ok());
    }

    #[test]
    fn test_empty_cursor_is_absent() {
        let args = PaginationArgs::new().first(2).before("");
        assert!(args.validate().is_ok());
        let req = args.to_request(1).unwrap();
        assert_eq!(req.place, None);
    }

    #[test]
    fn test_translate_forward() {
        let token = encode(&Marker::new(vec![Value::Int(7)]), Direction::Forward);
        let req = PaginationArgs::new().first(3).after(token).to_request(1).unwrap();
        assert_eq!(req.direction, Direction::Forward);
        assert_eq!(req.place, Some(Marker::new(vec![Value::Int(7)])));
        assert_eq!(req.per_page, 3);
        assert_eq!(req.limit(), 4);
    }

    #[test]
    fn test_translate_backward_ignores_bookmark_direction() {
        let token = encode(&Marker::new(vec![Value::Int(7)]), Direction::Forward);
        let req = PaginationArgs::new().last(2).before(token).to_request(1).unwrap();
        assert_eq!(req.direction, Direction::Backward);
        assert_eq!(req.place, Some(Marker::new(vec![Value::Int(7)])));
        assert_eq!(req.per_page, 2);
    }

    #[test]
    fn test_translate_malformed_bookmark() {
        let err = PaginationArgs::new()
            .first(1)
            .after("%%%")
            .to_request(1)
            .unwrap_err();
        assert!(matches!(
            err,
            PaginateError::MalformedBookmark(BookmarkError::InvalidBase64)
        ));

        let two = encode(
            &Marker::new(vec![Value::Int(1), Value::Int(2)]),
            Direction::Forward,
        );
        let err = PaginationArgs::new().first(1).after(two).to_request(1).unwrap_err();
        assert!(matches!(
            err,
            PaginateError::MalformedBookmark(BookmarkError::Arity { .. })
        ));
    }
}
