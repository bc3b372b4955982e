//! Tolerant field deserializers for model-authored JSON.
//!
//! The gateway relays ideas exactly as the model wrote them, so any field may
//! be `null`, a number where text was asked for, or a decimal where a score
//! was expected. These helpers never fail on a field value; they fall back to
//! the type's default instead.

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize as `T`, or `T::default()` when the value has the wrong shape.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

/// Strings as-is, scalars rendered, arrays joined by newlines, anything else empty.
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(value_text(&Value::deserialize(deserializer)?))
}

/// A list of strings. A bare string becomes a one-item list; blanks are dropped.
pub fn texts<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let items: Vec<String> = match Value::deserialize(deserializer)? {
        Value::Array(items) => items.iter().map(value_text).collect(),
        Value::Null => Vec::new(),
        other => vec![value_text(&other)],
    };
    Ok(items.into_iter().filter(|s| !s.is_empty()).collect())
}

/// Any JSON number, or a string holding one. Everything else is 0.
pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let n = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if n.is_finite() { n } else { 0.0 })
}

/// A list whose items fall back to their default one by one. Not a list at all is empty.
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(lenient_items(items)),
        _ => Ok(Vec::new()),
    }
}

/// Like [`list`], but the value itself must be an array.
pub fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(lenient_items(items)),
        other => Err(de::Error::custom(format!("expected an array, found {other}"))),
    }
}

fn lenient_items<T: DeserializeOwned + Default>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .map(|v| T::deserialize(v).unwrap_or_default())
        .collect()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Null | Value::Object(_) => String::new(),
    }
}
