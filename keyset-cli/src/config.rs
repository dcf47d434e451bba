//! Optional TOML configuration for the `page` command.
//!
//! ```toml
//! order_by = "created_at,-id"
//! max_page_size = 100
//! allowed_columns = ["created_at", "id"]
//! ```
//!
//! Command-line flags override file values.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use keyset::OrderColumn;
use serde::Deserialize;

const DEFAULT_ORDER_BY: &str = "id";

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub order_by: Option<String>,
    pub max_page_size: Option<usize>,
    pub allowed_columns: Option<Vec<String>>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Effective settings after merging flags over the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub columns: Vec<OrderColumn>,
    pub max_page_size: Option<usize>,
}

impl Settings {
    pub fn resolve(
        file: FileConfig,
        order_by: Option<String>,
        max_page_size: Option<usize>,
    ) -> Result<Self> {
        let order_by = order_by
            .or(file.order_by)
            .unwrap_or_else(|| DEFAULT_ORDER_BY.to_string());
        let allowed = file.allowed_columns.unwrap_or_default();
        let allowed: Vec<&str> = allowed.iter().map(String::as_str).collect();

        let columns = OrderColumn::parse_list(&order_by, &allowed)
            .map_err(|e| anyhow!("invalid order '{order_by}': {e}"))?;

        Ok(Self {
            columns,
            max_page_size: max_page_size.or(file.max_page_size),
        })
    }
}
