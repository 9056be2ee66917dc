use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// JavaScript-style truthiness of a loosely typed payload value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Deserialize any JSON value into a flag using `is_truthy`.
///
/// Network layers report failures as `error: {...}`, `error: "message"` or
/// `error: true`, all of which must count as an error flag.
pub fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

/// Deserialize an optional list, mapping anything that is not a JSON array to `None`.
///
/// Each element that fails to deserialize is dropped with a warning instead of
/// failing the whole action.
pub fn deserialize_lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        if !value.is_null() {
            log::warn!("Ignoring non-list payload: {value}");
        }
        return Ok(None);
    };
    let parsed = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::warn!("Ignoring malformed list entry: {e}");
                None
            }
        })
        .collect();
    Ok(Some(parsed))
}

/// Deserialize an optional string, treating `""` like an absent value.
pub fn deserialize_non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Deserialize an optional value, mapping a malformed one to `None` with a
/// warning so that the rest of the payload is still applied.
pub fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            log::warn!("Ignoring malformed payload field: {e}");
            Ok(None)
        }
    }
}

/// Deserialize a string-named enum through `FromStr`, falling back to the
/// default for anything it does not recognise.
pub fn deserialize_lenient_enum<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let value = Value::deserialize(deserializer)?;
    match value.as_str().map(T::from_str) {
        Some(Ok(parsed)) => Ok(parsed),
        _ => {
            log::warn!("Unrecognised value {value}, using the default");
            Ok(T::default())
        }
    }
}

/// A fresh identifier for a toast entering the state.
pub fn generate_toast_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
