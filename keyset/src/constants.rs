//! Limits and reserved characters for the bookmark codec.
//!
//! # Environment Variables
//!
//! | Variable                   | Default        | Description                   |
//! |----------------------------|----------------|-------------------------------|
//! | `KEYSET_MAX_BOOKMARK_SIZE` | 4 KB (4,096)   | Maximum encoded bookmark size |
//!
//! ```bash
//! # Allow 8KB bookmarks for wide composite orderings
//! KEYSET_MAX_BOOKMARK_SIZE=8192
//! ```

use std::sync::OnceLock;

// ============================================================================
// WIRE FORMAT
// ============================================================================

/// Separates encoded fields inside a bookmark.
pub const DELIMITER: char = '~';

/// Escapes a delimiter or escape character inside a field.
pub const ESCAPE: char = '\\';

/// Leading character of a bookmark that travels forward.
pub const FORWARD_MARK: char = '>';

/// Leading character of a bookmark that travels backward.
pub const BACKWARD_MARK: char = '<';

// ============================================================================
// BOOKMARK LIMITS
// ============================================================================

/// Default maximum encoded bookmark size (4KB).
const DEFAULT_MAX_BOOKMARK_SIZE: usize = 4 * 1024;

/// Cached max bookmark size from environment.
static MAX_BOOKMARK_SIZE_CACHE: OnceLock<usize> = OnceLock::new();

/// Returns the maximum accepted length of an encoded bookmark.
///
/// Reads from `KEYSET_MAX_BOOKMARK_SIZE` on first call and falls back to
/// 4096 bytes if unset or invalid. The value is cached for the lifetime of
/// the process.
#[inline]
pub fn max_bookmark_size() -> usize {
    *MAX_BOOKMARK_SIZE_CACHE.get_or_init(|| {
        std::env::var("KEYSET_MAX_BOOKMARK_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(DEFAULT_MAX_BOOKMARK_SIZE)
    })
}

/// Maximum number of values a decoded marker may carry.
pub const MAX_MARKER_FIELDS: usize = 16;
