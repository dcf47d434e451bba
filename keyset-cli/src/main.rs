//! `keyset` command-line tool.
//!
//! Encodes and decodes bookmark tokens and pages through JSON row files
//! using the `keyset` engine. Logging goes through `env_logger`; set
//! `RUST_LOG=debug` to see paging decisions.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::indexing_slicing))]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use env_logger::Env;
use keyset::{Bookmark, Direction, Marker, MemorySource, OrderColumn, PaginationArgs, Paginator};
use serde::Serialize;

mod config;
mod literal;

use config::{FileConfig, Settings};
use literal::JsonRow;

#[derive(Parser, Debug)]
#[command(
    name = "keyset",
    version,
    about = "Inspect keyset bookmarks and page through JSON row files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode typed values into a bookmark token
    Encode {
        /// Token travels backward (default: forward)
        #[arg(long)]
        backward: bool,

        /// Values as typed literals: x, true, false, i:1, f:1.5, s:text, b:<base64>
        #[arg(allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Decode a bookmark token and print it as JSON
    Decode {
        /// Bookmark token
        token: String,
    },
    /// Paginate a JSON array of objects and print the connection as JSON
    Page {
        /// JSON file holding an array of row objects
        #[arg(long)]
        data: PathBuf,

        /// Config file (TOML). CLI flags override config values.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Ordering columns, e.g. "created_at,-id" (default: id)
        #[arg(long)]
        order_by: Option<String>,

        /// Maximum page size
        #[arg(long)]
        max_page_size: Option<usize>,

        /// Forward page size
        #[arg(long, allow_hyphen_values = true)]
        first: Option<i64>,

        /// Backward page size
        #[arg(long, allow_hyphen_values = true)]
        last: Option<i64>,

        /// Bookmark to page forward from
        #[arg(long)]
        after: Option<String>,

        /// Bookmark to page backward from
        #[arg(long)]
        before: Option<String>,
    },
}

#[derive(Debug, Serialize)]
struct Decoded<'a> {
    direction: Direction,
    values: Vec<literal::Typed<'a>>,
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logger() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { backward, values } => {
            let marker = values
                .iter()
                .map(|v| literal::parse(v))
                .collect::<Result<Marker>>()?;
            let direction = if backward {
                Direction::Backward
            } else {
                Direction::Forward
            };
            let token = keyset::try_encode(&marker, direction).context("encode bookmark")?;
            println!("{token}");
        },
        Commands::Decode { token } => {
            let bookmark = Bookmark::decode(&token).context("decode bookmark")?;
            let values: Vec<literal::Typed<'_>> = bookmark
                .marker
                .as_ref()
                .map(|m| m.values().iter().map(literal::Typed::new).collect())
                .unwrap_or_default();
            let out = Decoded {
                direction: bookmark.direction,
                values,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        },
        Commands::Page {
            data,
            config,
            order_by,
            max_page_size,
            first,
            last,
            after,
            before,
        } => {
            let file = match &config {
                Some(path) => FileConfig::load(path)?,
                None => FileConfig::default(),
            };
            let settings = Settings::resolve(file, order_by, max_page_size)?;
            log::debug!("ordering by {:?}", settings.columns);

            let rows = mark_rows(load_rows(&data)?, &settings.columns, &data)?;
            let mut source = MemorySource::new(rows, literal::row_marker);

            let mut paginator = Paginator::new(settings.columns);
            if let Some(max) = settings.max_page_size {
                paginator = paginator.max_per_page(max);
            }
            let args = PaginationArgs {
                before,
                after,
                first,
                last,
            };
            let conn = paginator
                .paginate(&args, &mut source)
                .context("paginate")?;
            println!("{}", serde_json::to_string_pretty(&conn)?);
        },
    }

    Ok(())
}

fn load_rows(path: &Path) -> Result<Vec<serde_json::Value>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read rows {}", path.display()))?;
    let rows: Vec<serde_json::Value> = serde_json::from_str(&text)
        .with_context(|| format!("parse rows {} (expected a JSON array)", path.display()))?;
    if let Some(pos) = rows.iter().position(|r| !r.is_object()) {
        return Err(anyhow!("row {pos} in {} is not an object", path.display()));
    }
    log::debug!("loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

fn mark_rows(
    rows: Vec<serde_json::Value>,
    columns: &[OrderColumn],
    path: &Path,
) -> Result<Vec<JsonRow>> {
    rows.into_iter()
        .enumerate()
        .map(|(pos, row)| {
            JsonRow::new(row, columns)
                .with_context(|| format!("row {pos} in {}", path.display()))
        })
        .collect()
}
