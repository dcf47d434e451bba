//! Positional field encoding for marker values.
//!
//! Each value becomes one typed text field; fields are joined with
//! [`DELIMITER`]. Any delimiter or [`ESCAPE`] inside a field is preceded by
//! [`ESCAPE`]. Fields are never quoted.
//!
//! | Value    | Field                |
//! |----------|----------------------|
//! | `Null`   | `x`                  |
//! | `Bool`   | `true` / `false`     |
//! | `Int`    | `i:42`               |
//! | `Float`  | `f:1.5`              |
//! | `String` | `s:text`             |
//! | `Bytes`  | `b:<base64>`         |

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::error::BookmarkError;
use crate::constants::{DELIMITER, ESCAPE, MAX_MARKER_FIELDS};
use crate::value::Value;

const NULL: &str = "x";
const TRUE: &str = "true";
const FALSE: &str = "false";

/// Render one value as its unescaped field text.
fn value_to_field(value: &Value) -> String {
    match value {
        Value::Null => NULL.to_string(),
        Value::Bool(true) => TRUE.to_string(),
        Value::Bool(false) => FALSE.to_string(),
        Value::Int(i) => format!("i:{i}"),
        // `Display` for f64 is the shortest text that parses back to the same bits.
        Value::Float(f) => format!("f:{f}"),
        Value::String(s) => format!("s:{s}"),
        Value::Bytes(b) => format!("b:{}", STANDARD.encode(b)),
    }
}

/// Parse unescaped field text back into a typed value.
fn field_to_value(index: usize, field: &str) -> Result<Value, BookmarkError> {
    let invalid = || BookmarkError::invalid_value(index, field);

    match field {
        NULL => return Ok(Value::Null),
        TRUE => return Ok(Value::Bool(true)),
        FALSE => return Ok(Value::Bool(false)),
        _ => {},
    }

    let (tag, body) = field.split_once(':').ok_or_else(invalid)?;
    match tag {
        "i" => body.parse::<i64>().map(Value::Int).map_err(|_| invalid()),
        "f" => body.parse::<f64>().map(Value::Float).map_err(|_| invalid()),
        "s" => Ok(Value::String(body.to_string())),
        "b" => STANDARD.decode(body).map(Value::Bytes).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

/// Append `field` to `out`, escaping reserved characters.
fn push_escaped(out: &mut String, field: &str) {
    for c in field.chars() {
        if c == DELIMITER || c == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
}

/// Split an encoded field string on unescaped delimiters, unescaping as we go.
///
/// An empty input has no fields. A trailing lone escape is an error.
pub(super) fn split_fields(s: &str) -> Result<Vec<String>, BookmarkError> {
    let mut fields = Vec::new();
    if s.is_empty() {
        return Ok(fields);
    }

    let mut current = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE {
            let escaped = chars.next().ok_or(BookmarkError::DanglingEscape)?;
            current.push(escaped);
        } else if c == DELIMITER {
            fields.push(std::mem::take(&mut current));
            if fields.len() >= MAX_MARKER_FIELDS {
                return Err(BookmarkError::TooManyFields);
            }
        } else {
            current.push(c);
        }
    }
    fields.push(current);

    Ok(fields)
}

/// Encode values into the delimiter-joined, escaped field string.
pub(super) fn serialize_values(values: &[Value]) -> String {
    let mut out = String::new();
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        push_escaped(&mut out, &value_to_field(value));
    }
    out
}

/// Decode a field string produced by [`serialize_values`].
pub(super) fn unserialize_values(s: &str) -> Result<Vec<Value>, BookmarkError> {
    split_fields(s)?
        .iter()
        .enumerate()
        .map(|(i, field)| field_to_value(i, field))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_fields() {
        assert_eq!(value_to_field(&Value::Null), "x");
        assert_eq!(value_to_field(&Value::Bool(true)), "true");
        assert_eq!(value_to_field(&Value::Int(-7)), "i:-7");
        assert_eq!(value_to_field(&Value::Float(0.1)), "f:0.1");
        assert_eq!(value_to_field(&Value::String("hi".into())), "s:hi");
        assert_eq!(value_to_field(&Value::Bytes(vec![0xff, 0x00])), "b:/wA=");
    }

    #[test]
    fn test_serialize_escapes_reserved() {
        let out = serialize_values(&[Value::String("a~b\\c".into()), Value::Int(1)]);
        assert_eq!(out, "s:a\\~b\\\\c~i:1");
    }

    #[test]
    fn test_unserialize_roundtrip() {
        let values = vec![
            Value::Null,
            Value::Bool(false),
            Value::Int(i64::MIN),
            Value::Float(-2.5e-300),
            Value::String("~\\~".into()),
            Value::String(String::new()),
            Value::Bytes(b"~raw\\".to_vec()),
        ];
        let decoded = unserialize_values(&serialize_values(&values)).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn test_string_that_looks_typed_stays_string() {
        let values = vec![Value::String("i:5".into()), Value::String("x".into())];
        let decoded = unserialize_values(&serialize_values(&values)).unwrap();
        assert_eq!(decoded, values);
    }

    #[test]
    fn test_empty_input_has_no_fields() {
        assert!(split_fields("").unwrap().is_empty());
        assert!(unserialize_values("").unwrap().is_empty());
    }

    #[test]
    fn test_dangling_escape() {
        assert_eq!(split_fields("i:1\\"), Err(BookmarkError::DanglingEscape));
    }

    #[test]
    fn test_unknown_tag_and_bad_numbers() {
        assert!(matches!(
            unserialize_values("q:1"),
            Err(BookmarkError::InvalidValue { index: 0, .. })
        ));
        assert!(matches!(
            unserialize_values("i:1~i:one"),
            Err(BookmarkError::InvalidValue { index: 1, .. })
        ));
        assert!(unserialize_values("f:1.2.3").is_err());
        assert!(unserialize_values("b:!!").is_err());
        assert!(unserialize_values("nope").is_err());
        // An empty field between delimiters is not a value
        assert!(unserialize_values("i:1~~i:2").is_err());
    }

    #[test]
    fn test_field_limit() {
        let at_limit = vec!["x"; MAX_MARKER_FIELDS].join("~");
        assert_eq!(split_fields(&at_limit).unwrap().len(), MAX_MARKER_FIELDS);

        let over = vec!["x"; MAX_MARKER_FIELDS + 1].join("~");
        assert_eq!(split_fields(&over), Err(BookmarkError::TooManyFields));
    }
}
