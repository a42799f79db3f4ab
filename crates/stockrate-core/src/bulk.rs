//! Bulk ingestion: heterogeneous JSON maps in, validated ratings out.
//!
//! Each raw value is coerced to text once, at this boundary, so the single
//! record builder serves both the single and the bulk path. Batches are
//! all-or-nothing: the first bad item aborts the whole submission.

use serde_json::{Map, Value};

use crate::builder::build_rating;
use crate::error::IngestError;
use crate::rating::{Rating, RatingInput};

/// A raw bulk item: field name to arbitrary JSON value.
pub type RawItem = Map<String, Value>;

/// Renders one raw JSON value as text.
///
/// Strings pass through, numbers use their plain decimal form (never
/// scientific notation), and `null` becomes the empty string.
///
/// # Errors
///
/// Returns [`IngestError::UnsupportedFieldType`] for booleans, arrays and
/// objects.
pub fn coerce_value(field: &str, index: usize, value: &Value) -> Result<String, IngestError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(render_number(n)),
        Value::Null => Ok(String::new()),
        other => Err(IngestError::UnsupportedFieldType {
            field: field.to_owned(),
            index,
            kind: json_kind(other),
        }),
    }
}

/// Coerces every value of a raw item and projects it onto a [`RatingInput`].
///
/// All keys are coerced, including ones the rating does not use, so an
/// unsupported value anywhere in the item rejects it.
///
/// # Errors
///
/// Returns [`IngestError::UnsupportedFieldType`] for the first value (in key
/// order) that has no textual rendering.
pub fn coerce_item(index: usize, item: &RawItem) -> Result<RatingInput, IngestError> {
    item.iter()
        .map(|(key, value)| coerce_value(key, index, value).map(|text| (key, text)))
        .collect::<Result<Vec<_>, _>>()
        .map(|pairs| pairs.into_iter().collect())
}

/// Coerces and builds every item in order, stopping at the first failure.
///
/// # Errors
///
/// Returns [`IngestError::UnsupportedFieldType`] if an item holds a value
/// that cannot be coerced, or [`IngestError::InvalidItem`] (carrying the
/// item's index and original JSON) if the record builder rejects it.
pub fn build_ratings(items: &[RawItem]) -> Result<Vec<Rating>, IngestError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let input = coerce_item(index, item)?;
            build_rating(&input).map_err(|source| IngestError::InvalidItem {
                index,
                item: Box::new(Value::Object(item.clone())),
                source: Box::new(source),
            })
        })
        .collect()
}

fn render_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
