//! src/domain/lenient.rs
//!
//! Deserializers for fields that the backend stores inconsistently:
//! missing, `null`, numbers where strings are expected and vice versa.

use crate::domain::DocumentId;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `_id` of a stored document, a plain string or `{"$oid": ".."}`.
pub fn document_id<'de, D>(deserializer: D) -> Result<DocumentId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    DocumentId::from_value(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid document id: {}", value)))
}

/// Like [`document_id`], but unusable ids are dropped.
pub fn optional_document_id<'de, D>(deserializer: D) -> Result<Option<DocumentId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(DocumentId::from_value(&Value::deserialize(deserializer)?))
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                Value::Object(ref fields) => fields
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
                    .unwrap_or_else(|| item.to_string()),
                other => other.to_string(),
            })
            .collect(),
        Value::String(s) if !s.is_empty() => s.split(',').map(|i| i.trim().to_owned()).collect(),
        _ => Vec::new(),
    })
}
