//! Ordering columns.

use serde::Serialize;

/// Sort direction of one ordering column in the natural query order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDir {
    /// Ascending (`ASC`)
    #[default]
    Asc,
    /// Descending (`DESC`)
    Desc,
}

impl SortDir {
    /// The opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// An ordering column with its direction.
///
/// The column sequence of a query is the schema every marker and bookmark
/// is interpreted against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderColumn {
    /// Column name as the row source knows it.
    pub name: String,
    /// Direction of this column in the natural query order.
    pub dir: SortDir,
}

impl OrderColumn {
    /// Create a new ordering column.
    pub fn new(name: impl Into<String>, dir: SortDir) -> Self {
        Self {
            name: name.into(),
            dir,
        }
    }

    /// Ascending column.
    pub fn asc(name: impl Into<String>) -> Self {
        Self::new(name, SortDir::Asc)
    }

    /// Descending column.
    pub fn desc(name: impl Into<String>) -> Self {
        Self::new(name, SortDir::Desc)
    }

    /// Parse a sort string like "created_at,-id" into ordering columns.
    ///
    /// Columns prefixed with `-` are descending. If `allowed` is non-empty,
    /// every column must appear in it.
    ///
    /// # Security Note
    ///
    /// If `allowed` is empty, ALL columns are allowed. For user input, always
    /// provide an explicit whitelist to prevent ordering by sensitive columns.
    pub fn parse_list(sort: &str, allowed: &[&str]) -> Result<Vec<Self>, String> {
        let mut result = Vec::new();

        for part in sort.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let (name, dir) = if let Some(stripped) = part.strip_prefix('-') {
                (stripped, SortDir::Desc)
            } else {
                (part, SortDir::Asc)
            };

            if name.is_empty() {
                return Err(format!("Sort column '{part}' has no name"));
            }
            if !allowed.is_empty() && !allowed.contains(&name) {
                return Err(format!(
                    "Sort column '{name}' not allowed. Allowed: {allowed:?}"
                ));
            }
            if result.iter().any(|c: &Self| c.name == name) {
                return Err(format!("Sort column '{name}' listed twice"));
            }

            result.push(Self::new(name, dir));
        }

        if result.is_empty() {
            return Err("At least one sort column is required".to_string());
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_directions() {
        let cols = OrderColumn::parse_list("created_at, -id", &[]).unwrap();
        assert_eq!(
            cols,
            vec![OrderColumn::asc("created_at"), OrderColumn::desc("id")]
        );
    }

    #[test]
    fn test_parse_list_whitelist() {
        let err = OrderColumn::parse_list("name,-secret", &["name", "id"]).unwrap_err();
        assert!(err.contains("secret"));
        assert!(OrderColumn::parse_list("-name,id", &["name", "id"]).is_ok());
    }

    #[test]
    fn test_parse_list_rejects_empty_and_duplicates() {
        assert!(OrderColumn::parse_list(" , ", &[]).is_err());
        assert!(OrderColumn::parse_list("-", &[]).is_err());
        assert!(OrderColumn::parse_list("id,-id", &[]).is_err());
    }

    #[test]
    fn test_sort_dir_reverse() {
        assert_eq!(SortDir::Asc.reverse(), SortDir::Desc);
        assert_eq!(SortDir::Desc.reverse(), SortDir::Asc);
    }
}
