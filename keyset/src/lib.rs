// =============================================================================
// CRATE-LEVEL QUALITY LINTS
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Relay field names in docs
#![allow(clippy::module_name_repetitions)] // BookmarkError in bookmark, etc.
#![allow(clippy::return_self_not_must_use)] // Builder methods on PaginationArgs
#![allow(clippy::must_use_candidate)]
#![allow(clippy::double_must_use)]
#![allow(clippy::exhaustive_enums)] // Value, Direction and SortDir are closed sets
#![allow(clippy::exhaustive_structs)] // Relay types and arguments are plain data with pub fields
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::indexing_slicing))]

//! # keyset - Keyset Pagination Engine
//!
//! Paginate ordered result sets without `OFFSET`: each page is fetched with a
//! seek condition relative to the last row seen, and the engine hands clients
//! opaque bookmark tokens to resume from.
//!
//! ## Quick Start
//!
//! ```
//! use keyset::prelude::*;
//!
//! let rows: Vec<i64> = (1..=5).collect();
//! let mut source = MemorySource::new(rows, |id: &i64, _: &[OrderColumn]| {
//!     Marker::new(vec![Value::Int(*id)])
//! });
//! let paginator = Paginator::new(vec![OrderColumn::asc("id")]);
//!
//! let page1 = paginator
//!     .paginate(&PaginationArgs::new().first(2), &mut source)
//!     .unwrap();
//! assert_eq!(page1.nodes().copied().collect::<Vec<_>>(), vec![1, 2]);
//! assert!(page1.page_info.has_next_page);
//!
//! let cursor = page1.page_info.end_cursor.clone().unwrap();
//! let page2 = paginator
//!     .paginate(&PaginationArgs::new().first(2).after(cursor), &mut source)
//!     .unwrap();
//! assert_eq!(page2.nodes().copied().collect::<Vec<_>>(), vec![3, 4]);
//! ```
//!
//! ## Bookmarks
//!
//! A bookmark is `base64(direction + fields)`, where the direction is `>`
//! (forward) or `<` (backward) and fields are typed values joined by `~`:
//!
//! | Value  | Field |
//! |--------|-------|
//! | Null   | `x` |
//! | Bool   | `true` / `false` |
//! | Int    | `i:42` |
//! | Float  | `f:1.5` |
//! | String | `s:text` |
//! | Bytes  | `b:<base64>` |
//!
//! `~` and `\` inside a field are escaped with `\`.
//!
//! ```
//! use keyset::{Direction, Marker, Value, decode, encode};
//!
//! let marker = Marker::new(vec![Value::Int(2)]);
//! let token = encode(&marker, Direction::Forward);
//! assert_eq!(token, "Pmk6Mg==");
//! assert_eq!(decode(&token).unwrap(), (Some(marker), Direction::Forward));
//! ```
//!
//! ## Overfetch by one
//!
//! Row sources are asked for `per_page + 1` rows. The extra row is never
//! returned; its presence alone means another page exists. See [`Paging`]
//! for the four boundary markers derived from a batch.
//!
//! ## Row sources
//!
//! The engine never builds queries. Implement [`RowSource`] for your storage
//! (rendering [`FetchQuery::scan_order`] and [`FetchQuery::condition`] in its
//! own query language), or use [`MemorySource`] for in-memory data.
//!
//! ## Limits
//!
//! | Limit | Default | Override |
//! |-------|---------|----------|
//! | Bookmark token size | 4 KiB | `KEYSET_MAX_BOOKMARK_SIZE` |
//! | Fields per marker | 16 | - |

pub mod bookmark;
pub mod connection;
pub mod constants;
mod context;
mod order;
pub mod paging;
pub mod source;
mod value;

pub use bookmark::{Bookmark, BookmarkError, Direction, decode, encode, try_encode};
pub use connection::{
    Connection, Edge, PageInfo, PageRequest, PaginateError, PaginationArgs, PaginationArgsError,
    Paginator,
};
pub use context::RequestContext;
pub use order::{OrderColumn, SortDir};
pub use paging::{Boundary, Page, Paging, PagingError, RowCountError};
pub use source::{FetchQuery, KeysetCondition, MemorySource, RowSource, compare_markers};
pub use value::{Marker, Value};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Bookmark, Connection, Direction, Marker, MemorySource, OrderColumn, Page, PaginateError,
        PaginationArgs, Paginator, RowSource, SortDir, Value,
    };
}
