//! Bookmark codec: opaque tokens for `(marker, direction)` pairs.
//!
//! A token is `base64(direction_char + fields)` using the standard padded
//! alphabet, where `fields` is the escaped, delimiter-joined encoding of the
//! marker values (see the `serial` module). `>` travels forward, `<`
//! travels backward.
//!
//! # Example
//!
//! ```
//! use keyset::{Bookmark, Direction, Marker, Value};
//!
//! let marker = Marker::new(vec![Value::from("2024-01-15"), Value::Int(42)]);
//! let token = keyset::encode(&marker, Direction::Forward);
//!
//! let decoded = Bookmark::decode(&token).unwrap();
//! assert_eq!(decoded.marker, Some(marker));
//! assert_eq!(decoded.direction, Direction::Forward);
//!
//! // An empty token is "no bookmark", not an error.
//! assert_eq!(Bookmark::decode("").unwrap(), Bookmark::default());
//! ```
//!
//! # Security Note
//!
//! Bookmarks are encoded, **not encrypted**. Anyone can read the ordering
//! values inside them, so never order by columns you would not expose.

mod error;
mod serial;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

pub use error::BookmarkError;

use crate::constants::{BACKWARD_MARK, FORWARD_MARK, MAX_MARKER_FIELDS, max_bookmark_size};
use crate::value::Marker;

/// Which way a traversal moves relative to the natural query order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Along the query order (`>`).
    #[default]
    Forward,
    /// Against the query order (`<`).
    Backward,
}

impl Direction {
    /// Returns `true` for [`Direction::Backward`].
    #[inline]
    #[must_use]
    pub const fn is_backward(self) -> bool {
        matches!(self, Self::Backward)
    }

    /// The opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// The wire character that leads a bookmark in this direction.
    #[must_use]
    pub const fn mark(self) -> char {
        match self {
            Self::Forward => FORWARD_MARK,
            Self::Backward => BACKWARD_MARK,
        }
    }

    fn from_mark(c: char) -> Option<Self> {
        match c {
            FORWARD_MARK => Some(Self::Forward),
            BACKWARD_MARK => Some(Self::Backward),
            _ => None,
        }
    }
}

/// A decoded bookmark.
///
/// `marker` is `None` only for the "no bookmark" convention (an empty or
/// absent token), which always pairs with [`Direction::Forward`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bookmark {
    /// Ordering-column values of the position, if any.
    pub marker: Option<Marker>,
    /// Direction a fetch starting from this position travels.
    pub direction: Direction,
}

impl Bookmark {
    /// Create a bookmark for a marker.
    #[must_use]
    pub const fn new(marker: Marker, direction: Direction) -> Self {
        Self {
            marker: Some(marker),
            direction,
        }
    }

    /// Encode the bookmark, or `None` when it holds no marker.
    #[must_use]
    pub fn encode(&self) -> Option<String> {
        self.marker.as_ref().map(|m| encode(m, self.direction))
    }

    /// Decode a token produced by [`encode`].
    ///
    /// An empty token decodes to `Bookmark::default()` (no marker, forward).
    pub fn decode(token: &str) -> Result<Self, BookmarkError> {
        if token.is_empty() {
            return Ok(Self::default());
        }

        let limit = max_bookmark_size();
        if token.len() > limit {
            return Err(BookmarkError::TooLarge { limit });
        }

        let bytes = STANDARD
            .decode(token)
            .map_err(|_| BookmarkError::InvalidBase64)?;
        let text = String::from_utf8(bytes).map_err(|_| BookmarkError::InvalidUtf8)?;

        let mut chars = text.chars();
        let direction = chars
            .next()
            .and_then(Direction::from_mark)
            .ok_or(BookmarkError::MissingDirection)?;
        let values = serial::unserialize_values(chars.as_str())?;

        Ok(Self::new(Marker::new(values), direction))
    }

    /// Decode a token and check the marker against the number of ordering columns.
    pub fn decode_with_arity(token: &str, columns: usize) -> Result<Self, BookmarkError> {
        let bookmark = Self::decode(token)?;
        if let Some(marker) = &bookmark.marker
            && marker.len() != columns
        {
            return Err(BookmarkError::Arity {
                expected: columns,
                found: marker.len(),
            });
        }
        Ok(bookmark)
    }

    /// Decode a token, keeping only its position.
    pub fn place(token: &str) -> Result<Option<Marker>, BookmarkError> {
        Self::decode(token).map(|b| b.marker)
    }
}

/// Encode a marker and direction into an opaque token.
///
/// No limits are applied; use [`try_encode`] for tokens handed to clients.
#[must_use]
pub fn encode(marker: &Marker, direction: Direction) -> String {
    let mut payload = String::new();
    payload.push(direction.mark());
    payload.push_str(&serial::serialize_values(marker.values()));
    STANDARD.encode(payload.as_bytes())
}

/// Encode a marker, refusing tokens that [`decode`] would reject.
///
/// Markers with more than [`MAX_MARKER_FIELDS`] values fail with
/// [`BookmarkError::TooManyFields`]; tokens longer than the configured
/// maximum fail with [`BookmarkError::TooLarge`]. Any token returned here
/// decodes back to `(marker, direction)`.
pub fn try_encode(marker: &Marker, direction: Direction) -> Result<String, BookmarkError> {
    if marker.len() > MAX_MARKER_FIELDS {
        return Err(BookmarkError::TooManyFields);
    }
    let token = encode(marker, direction);
    let limit = max_bookmark_size();
    if token.len() > limit {
        return Err(BookmarkError::TooLarge { limit });
    }
    Ok(token)
}

/// Decode a token into a marker and direction.
///
/// Shorthand for [`Bookmark::decode`] returning a tuple.
pub fn decode(token: &str) -> Result<(Option<Marker>, Direction), BookmarkError> {
    Bookmark::decode(token).map(|b| (b.marker, b.direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn marker(values: Vec<Value>) -> Marker {
        Marker::new(values)
    }

    #[test]
    fn test_encode_decode_forward() {
        let m = marker(vec![Value::Int(100), Value::from("Alice")]);
        let token = encode(&m, Direction::Forward);
        assert_eq!(
            decode(&token).unwrap(),
            (Some(m), Direction::Forward)
        );
    }

    #[test]
    fn test_try_encode_matches_decode_limits() {
        let at_limit: Marker = (0..MAX_MARKER_FIELDS as i64).map(Value::Int).collect();
        let token = try_encode(&at_limit, Direction::Backward).unwrap();
        assert_eq!(
            decode(&token).unwrap(),
            (Some(at_limit), Direction::Backward)
        );

        let wide: Marker = (0..=MAX_MARKER_FIELDS as i64).map(Value::Int).collect();
        assert_eq!(
            try_encode(&wide, Direction::Forward),
            Err(BookmarkError::TooManyFields)
        );
        assert_eq!(
            decode(&encode(&wide, Direction::Forward)),
            Err(BookmarkError::TooManyFields)
        );

        let long = marker(vec![Value::from("t".repeat(max_bookmark_size()))]);
        let limit = max_bookmark_size();
        assert_eq!(
            try_encode(&long, Direction::Forward),
            Err(BookmarkError::TooLarge { limit })
        );
    }

    #[test]
    fn test_encode_decode_backward() {
        let m = marker(vec![Value::Null, Value::Float(1.25)]);
        let token = encode(&m, Direction::Backward);
        assert_eq!(
            decode(&token).unwrap(),
            (Some(m), Direction::Backward)
        );
    }

    #[test]
    fn test_known_tokens() {
        insta::assert_snapshot!(encode(&marker(vec![Value::Int(2)]), Direction::Forward), @"Pmk6Mg==");
        insta::assert_snapshot!(encode(&marker(vec![Value::Int(1)]), Direction::Backward), @"PGk6MQ==");
        insta::assert_snapshot!(
            encode(&marker(vec![Value::from("a\\~b"), Value::Int(3)]), Direction::Forward),
            @"PnM6YVxcXH5ifmk6Mw=="
        );
    }

    #[test]
    fn test_empty_token_is_no_bookmark() {
        let bookmark = Bookmark::decode("").unwrap();
        assert_eq!(bookmark.marker, None);
        assert_eq!(bookmark.direction, Direction::Forward);
        assert_eq!(bookmark.encode(), None);
    }

    #[test]
    fn test_empty_marker_roundtrip() {
        let token = encode(&Marker::default(), Direction::Backward);
        assert_eq!(token, "PA==");
        let bookmark = Bookmark::decode(&token).unwrap();
        assert_eq!(bookmark, Bookmark::new(Marker::default(), Direction::Backward));
    }

    #[test]
    fn test_invalid_base64() {
        assert_eq!(
            Bookmark::decode("not valid base64!!!"),
            Err(BookmarkError::InvalidBase64)
        );
        // Unpadded input is rejected by the standard engine
        assert_eq!(Bookmark::decode("Pmk6Mg"), Err(BookmarkError::InvalidBase64));
    }

    #[test]
    fn test_missing_direction() {
        // base64("i:2")
        assert_eq!(
            Bookmark::decode("aToy"),
            Err(BookmarkError::MissingDirection)
        );
    }

    #[test]
    fn test_invalid_utf8() {
        // base64 of [0x3e, 0xff]
        assert_eq!(Bookmark::decode("Pv8="), Err(BookmarkError::InvalidUtf8));
    }

    #[test]
    fn test_too_large() {
        let oversized = "A".repeat(max_bookmark_size() + 4);
        assert!(matches!(
            Bookmark::decode(&oversized),
            Err(BookmarkError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_decode_with_arity() {
        let token = encode(&marker(vec![Value::Int(1), Value::Int(2)]), Direction::Forward);
        assert!(Bookmark::decode_with_arity(&token, 2).is_ok());
        assert_eq!(
            Bookmark::decode_with_arity(&token, 1),
            Err(BookmarkError::Arity {
                expected: 1,
                found: 2
            })
        );
        // No bookmark has no arity to check
        assert!(Bookmark::decode_with_arity("", 3).is_ok());
    }

    #[test]
    fn test_place() {
        let m = marker(vec![Value::from("k")]);
        let token = encode(&m, Direction::Backward);
        assert_eq!(Bookmark::place(&token).unwrap(), Some(m));
        assert_eq!(Bookmark::place("").unwrap(), None);
    }

    #[test]
    fn test_direction_helpers() {
        assert_eq!(Direction::Forward.mark(), '>');
        assert_eq!(Direction::Backward.mark(), '<');
        assert!(Direction::Backward.is_backward());
        assert_eq!(Direction::Forward.reverse(), Direction::Backward);
    }
}
