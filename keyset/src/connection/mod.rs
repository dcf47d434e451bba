//! Relay-style connection assembly.
//!
//! [`PaginationArgs`] carries the client's `first`/`last`/`before`/`after`.
//! A [`Paginator`] validates them, fetches one overfetched batch from a
//! [`RowSource`](crate::RowSource) and returns a [`Connection`]: edges with
//! boundary cursors plus [`PageInfo`].

mod args;
mod error;
mod paginator;
mod relay;

pub use args::{PageRequest, PaginationArgs};
pub use error::{PaginateError, PaginationArgsError};
pub use paginator::Paginator;
pub use relay::{Connection, Edge, PageInfo};
