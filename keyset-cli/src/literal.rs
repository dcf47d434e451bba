//! Conversions between command-line text, JSON rows and marker values.

use anyhow::{Context, Result, anyhow, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use keyset::{Marker, OrderColumn, Value};
use serde::Serialize;

/// Parse a typed literal: `x`, `true`, `false`, `i:<int>`, `f:<float>`,
/// `s:<text>` or `b:<base64>`.
pub fn parse(literal: &str) -> Result<Value> {
    match literal {
        "x" => return Ok(Value::Null),
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        _ => {},
    }

    let Some((tag, body)) = literal.split_once(':') else {
        bail!("'{literal}' is not a typed literal (expected x, true, false, i:, f:, s: or b:)");
    };
    let value = match tag {
        "i" => Value::Int(body.parse().map_err(|e| anyhow!("'{literal}': {e}"))?),
        "f" => Value::Float(body.parse().map_err(|e| anyhow!("'{literal}': {e}"))?),
        "s" => Value::String(body.to_string()),
        "b" => Value::Bytes(STANDARD.decode(body).map_err(|e| anyhow!("'{literal}': {e}"))?),
        _ => bail!("'{literal}' has unknown type prefix '{tag}'"),
    };
    Ok(value)
}

/// A value with its type spelled out, for JSON output.
#[derive(Debug, Serialize)]
pub struct Typed<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub value: &'a Value,
}

impl<'a> Typed<'a> {
    pub const fn new(value: &'a Value) -> Self {
        let kind = match value {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
        };
        Self { kind, value }
    }
}

/// Convert one JSON field to a marker value.
///
/// Missing fields become `Null`. Arrays, objects and integers outside the
/// `i64` range cannot be ordered and are rejected.
pub fn from_json(field: Option<&serde_json::Value>) -> Result<Value> {
    let value = match field {
        None | Some(serde_json::Value::Null) => Value::Null,
        Some(serde_json::Value::Bool(b)) => Value::Bool(*b),
        Some(serde_json::Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if n.is_u64() {
                bail!("integer {n} is out of range for i64");
            } else {
                Value::Float(n.as_f64().ok_or_else(|| anyhow!("number {n} is not a float"))?)
            }
        },
        Some(serde_json::Value::String(s)) => Value::String(s.clone()),
        Some(serde_json::Value::Array(_)) => bail!("arrays cannot be ordered"),
        Some(serde_json::Value::Object(_)) => bail!("objects cannot be ordered"),
    };
    Ok(value)
}

/// A JSON object row with its marker for the active ordering.
///
/// Serializes as the bare row.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct JsonRow {
    row: serde_json::Value,
    #[serde(skip)]
    marker: Marker,
}

impl JsonRow {
    /// Pair a row with its marker, rejecting unorderable column values.
    pub fn new(row: serde_json::Value, columns: &[OrderColumn]) -> Result<Self> {
        let marker = columns
            .iter()
            .map(|c| from_json(row.get(&c.name)).with_context(|| format!("column '{}'", c.name)))
            .collect::<Result<Marker>>()?;
        Ok(Self { row, marker })
    }
}

/// Marker extractor for [`keyset::MemorySource`] over [`JsonRow`]s.
pub fn row_marker(row: &JsonRow, _: &[OrderColumn]) -> Marker {
    row.marker.clone()
}
