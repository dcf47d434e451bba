//! Connection, Edge and PageInfo output types.

use serde::Serialize;

use crate::paging::{Page, Paging};

/// Page information for a connection.
///
/// Expressed in the original query order, whichever way the page was
/// fetched. Serializes as `{"hasNextPage", "hasPreviousPage", "startCursor",
/// "endCursor"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Bookmark of the first row, travelling backward.
    pub start_cursor: Option<String>,
    /// Bookmark of the last row, travelling forward.
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Page info for a page's paging metadata.
    #[must_use]
    pub fn from_paging(paging: &Paging) -> Self {
        Self {
            has_next_page: paging.has_next(),
            has_previous_page: paging.has_previous(),
            start_cursor: paging.bookmark_first(),
            end_cursor: paging.bookmark_last(),
        }
    }
}

/// A node with its cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge<T> {
    /// The row.
    pub node: T,
    /// Bookmark for this row; empty for rows inside the page.
    pub cursor: String,
}

/// A paginated result: edges plus page information.
///
/// Only the first and last edges carry cursors (the start and end cursors
/// of the page). Clients resume from page boundaries, never from the middle
/// of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    /// Cursors and neighbour flags for the page.
    pub page_info: PageInfo,
    /// Rows of the page in original query order.
    pub edges: Vec<Edge<T>>,
}

impl<T> Connection<T> {
    /// Assemble a connection from a page.
    #[must_use]
    pub fn from_page(page: Page<T>) -> Self {
        let (rows, paging) = page.into_parts();
        let page_info = PageInfo::from_paging(&paging);

        let mut edges: Vec<Edge<T>> = rows
            .into_iter()
            .map(|node| Edge {
                node,
                cursor: String::new(),
            })
            .collect();
        if let Some(edge) = edges.first_mut() {
            edge.cursor = page_info.start_cursor.clone().unwrap_or_default();
        }
        if let Some(edge) = edges.last_mut() {
            edge.cursor = page_info.end_cursor.clone().unwrap_or_default();
        }

        Self { page_info, edges }
    }

    /// The nodes of the page, in order.
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|e| &e.node)
    }

    /// Consume the connection, returning its nodes.
    #[must_use]
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }

    /// Transform every node, keeping cursors and page info.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Connection<U> {
        Connection {
            page_info: self.page_info,
            edges: self
                .edges
                .into_iter()
                .map(|e| Edge {
                    node: f(e.node),
                    cursor: e.cursor,
                })
                .collect(),
        }
    }

    /// Number of edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the connection has no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bookmark::{Direction, encode};
    use crate::value::{Marker, Value};

    fn m(id: i64) -> Marker {
        Marker::new(vec![Value::Int(id)])
    }

    fn page(batch: Vec<i64>, per_page: usize) -> Page<i64> {
        Page::from_batch(batch, per_page, Direction::Forward, None, |id| m(*id))
    }

    #[test]
    fn test_only_boundary_edges_have_cursors() {
        let conn = Connection::from_page(page(vec![1, 2, 3, 4], 3));
        let cursors: Vec<&str> = conn.edges.iter().map(|e| e.cursor.as_str()).collect();
        assert_eq!(cursors[0], encode(&m(1), Direction::Backward));
        assert_eq!(cursors[1], "");
        assert_eq!(cursors[2], encode(&m(3), Direction::Forward));
        assert_eq!(conn.page_info.start_cursor.as_deref(), Some(cursors[0]));
        assert_eq!(conn.page_info.end_cursor.as_deref(), Some(cursors[2]));
        assert!(conn.page_info.has_next_page);
    }

    #[test]
    fn test_single_edge_gets_end_cursor() {
        let conn = Connection::from_page(page(vec![9], 1));
        assert_eq!(conn.edges[0].cursor, encode(&m(9), Direction::Forward));
    }

    #[test]
    fn test_empty_connection() {
        let conn = Connection::from_page(page(vec![], 5));
        assert!(conn.is_empty());
        assert_eq!(conn.page_info, PageInfo::default());
    }

    #[test]
    fn test_nodes_and_map() {
        let conn = Connection::from_page(page(vec![1, 2], 2));
        assert_eq!(conn.nodes().copied().collect::<Vec<_>>(), vec![1, 2]);
        let conn = conn.map(|id| id * 10);
        assert_eq!(conn.len(), 2);
        assert_eq!(conn.into_nodes(), vec![10, 20]);
    }

    #[test]
    fn test_serializes_relay_shape() {
        let conn = Connection::from_page(page(vec![2], 5));
        let json = serde_json::to_value(&conn).unwrap();
        assert_eq!(json["pageInfo"]["hasNextPage"], false);
        assert_eq!(json["pageInfo"]["hasPreviousPage"], false);
        assert_eq!(json["pageInfo"]["endCursor"], "Pmk6Mg==");
        assert_eq!(json["edges"][0]["node"], 2);
        assert_eq!(json["edges"][0]["cursor"], "Pmk6Mg==");
    }
}
