use serde::Serialize;
use serde_json::Value;

use crate::error::GridError;

/// One result row flattened to an ordered key/value view. Keys come from the
/// row type's serde contract (`rename` for aliased fields, `skip` for
/// excluded ones, the declared name otherwise); values are the serialized
/// field values.
pub type Record = serde_json::Map<String, Value>;

/// Flatten typed rows into generic records.
///
/// Serde is the field-metadata capability here: renames and exclusions
/// declared on the row type are honored without this module knowing the
/// concrete type, and serialization reads from a shared reference, so the
/// caller's rows are never aliased or mutated. Each row must serialize to a
/// JSON object.
pub fn to_records<T: Serialize>(rows: &[T]) -> Result<Vec<Record>, GridError> {
    rows.iter()
        .map(|row| match serde_json::to_value(row) {
            Ok(Value::Object(record)) => Ok(record),
            Ok(other) => Err(GridError::Convert(format!(
                "row serialized to {} instead of an object",
                json_type(&other)
            ))),
            Err(e) => Err(GridError::Convert(e.to_string())),
        })
        .collect()
}

/// Lenient conversion for dynamic values: `Some` records only when the value
/// is an array of objects, `None` otherwise.
///
/// The `None` arm is a deliberate no-op contract for malformed call sites
/// (a scalar where a row set was expected), not an error channel; callers
/// must not rely on it to catch programmer mistakes.
pub fn records_from_value(value: &Value) -> Option<Vec<Record>> {
    value
        .as_array()?
        .iter()
        .map(|row| row.as_object().cloned())
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
