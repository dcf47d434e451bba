//! Keyset page builder.
//!
//! The row source fetches `per_page + 1` rows in scan order. The extra row,
//! if it arrives, is never shown: its marker is the only signal that more
//! rows exist in that direction, so no count query is needed.
//!
//! ```
//! use keyset::{Direction, Marker, Page, Value};
//!
//! // Three rows fetched for a two-row page
//! let batch = vec![1i64, 2, 3];
//! let page = Page::from_batch(batch, 2, Direction::Forward, None, |id| {
//!     Marker::new(vec![Value::Int(*id)])
//! });
//!
//! assert_eq!(page.rows(), &[1, 2]);
//! assert!(page.paging().has_next());
//! assert!(!page.paging().has_previous());
//! ```

mod boundary;
mod error;
mod page;

pub use boundary::{Boundary, Paging};
pub use error::{PagingError, RowCountError};
pub use page::Page;
