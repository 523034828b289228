//! src/domain/document.rs
//!
//! Schema-less helpers behind the document browser. Documents are opaque
//! JSON objects; nothing here knows which collection they belong to.

use crate::domain::ValidationError;
use serde_json::{Map, Number, Value};

/// Row counts offered by the document browser.
pub const PAGE_SIZES: [usize; 4] = [10, 20, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// A document matches when its serialised JSON contains the query,
/// ignoring case. An empty query matches everything.
pub fn matches_search(document: &Value, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    document
        .to_string()
        .to_lowercase()
        .contains(&query.to_lowercase())
}

/// Columns of the table view: the scalar fields of the first document.
pub fn scalar_columns(documents: &[Value]) -> Vec<String> {
    match documents.first().and_then(Value::as_object) {
        Some(fields) => fields
            .iter()
            .filter(|(_, value)| !(value.is_object() || value.is_array() || value.is_null()))
            .map(|(key, _)| key.to_owned())
            .collect(),
        None => Vec::new(),
    }
}

/// Text shown for a single value in tables and exports.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_owned(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// All top level keys of the documents in first-seen order, and one row
/// of cells per document.
pub fn document_table(documents: &[Value]) -> (Vec<String>, Vec<Vec<String>>) {
    let mut headers: Vec<String> = Vec::new();
    for fields in documents.iter().filter_map(Value::as_object) {
        for key in fields.keys() {
            if !headers.contains(key) {
                headers.push(key.to_owned());
            }
        }
    }
    let rows = documents
        .iter()
        .map(|document| {
            headers
                .iter()
                .map(|key| document.get(key).map(display_value).unwrap_or_default())
                .collect()
        })
        .collect();
    (headers, rows)
}

/// Parse the JSON text of a new document. Only objects are documents.
pub fn parse_new_document(json: &str) -> Result<Value, ValidationError> {
    match serde_json::from_str::<Value>(json) {
        Ok(document @ Value::Object(_)) => Ok(document),
        _ => Err(ValidationError::InvalidJson),
    }
}

/// Overwrite the top level fields of `original` with those of `update`.
/// Fields the dashboard does not know about survive the round trip.
pub fn merge_fields(original: Value, update: Value) -> Value {
    match (original, update) {
        (Value::Object(mut fields), Value::Object(changes)) => {
            fields.extend(changes);
            Value::Object(fields)
        }
        (_, update) => update,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: u64,
}

impl Pagination {
    /// Unknown page sizes fall back to the default; the page is clamped
    /// into `1..=page_count`.
    pub fn new(page: Option<usize>, limit: Option<usize>, total: u64) -> Self {
        let limit = limit
            .filter(|l| PAGE_SIZES.contains(l))
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let mut pagination = Self {
            page: 1,
            limit,
            total,
        };
        pagination.page = page.unwrap_or(1).clamp(1, pagination.page_count());
        pagination
    }

    pub fn page_count(&self) -> usize {
        let total = self.total as usize;
        std::cmp::max(1, total.div_ceil(self.limit))
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = std::cmp::min((self.page - 1) * self.limit, items.len());
        let end = std::cmp::min(start + self.limit, items.len());
        &items[start..end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    Json,
    Group,
}

/// One input of the generic edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Dot separated path of the field, e.g. `address.city`.
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
    pub depth: usize,
}

impl FormField {
    pub fn is_group(&self) -> bool {
        self.kind == FieldKind::Group
    }

    pub fn is_boolean(&self) -> bool {
        self.kind == FieldKind::Boolean
    }

    pub fn is_json(&self) -> bool {
        self.kind == FieldKind::Json
    }

    pub fn is_true(&self) -> bool {
        self.value == "true"
    }

    pub fn input_type(&self) -> &'static str {
        match self.kind {
            FieldKind::Number => "number",
            _ => "text",
        }
    }

    pub fn indent(&self) -> usize {
        self.depth * 16
    }
}

/// Flatten a document into edit form fields. `_id` is not editable,
/// nested objects become groups, arrays are edited as JSON text.
pub fn form_fields(document: &Value) -> Vec<FormField> {
    let mut fields = Vec::new();
    if let Some(map) = document.as_object() {
        collect_fields(map, "", 0, &mut fields);
    }
    fields
}

fn collect_fields(map: &Map<String, Value>, prefix: &str, depth: usize, out: &mut Vec<FormField>) {
    for (key, value) in map {
        if key == "_id" {
            continue;
        }
        let full_key = if prefix.is_empty() {
            key.to_owned()
        } else {
            format!("{}.{}", prefix, key)
        };
        let (kind, text) = match value {
            Value::Object(nested) => {
                out.push(FormField {
                    key: full_key.clone(),
                    label: key.to_owned(),
                    kind: FieldKind::Group,
                    value: String::new(),
                    depth,
                });
                collect_fields(nested, &full_key, depth + 1, out);
                continue;
            }
            Value::Array(_) => (
                FieldKind::Json,
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
            ),
            Value::Bool(b) => (FieldKind::Boolean, b.to_string()),
            Value::Number(n) => (FieldKind::Number, n.to_string()),
            Value::String(s) => (FieldKind::Text, s.to_owned()),
            Value::Null => (FieldKind::Text, String::new()),
        };
        out.push(FormField {
            key: full_key,
            label: key.to_owned(),
            kind,
            value: text,
            depth,
        });
    }
}

/// Apply submitted form fields to a copy of `original`.
///
/// Each value is converted back to the type the field had in the original
/// document. Keys use dot notation; missing intermediate objects are created.
pub fn apply_form_fields(
    original: &Value,
    submitted: &[(String, String)],
) -> Result<Value, ValidationError> {
    let mut document = original.clone();
    for (key, raw) in submitted {
        if key == "_id" || key.starts_with("_id.") {
            continue;
        }
        let value = match lookup(original, key) {
            Some(Value::Bool(_)) => Value::Bool(raw == "true"),
            Some(Value::Number(_)) => parse_number(raw)?,
            Some(Value::Array(_)) | Some(Value::Object(_)) => {
                serde_json::from_str(raw).map_err(|_| ValidationError::InvalidJson)?
            }
            Some(Value::Null) if raw.is_empty() => Value::Null,
            _ => Value::String(raw.to_owned()),
        };
        set_path(&mut document, key, value);
    }
    Ok(document)
}

fn lookup<'a>(document: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.')
        .try_fold(document, |current, segment| current.get(segment))
}

fn set_path(document: &mut Value, key: &str, value: Value) {
    let mut segments = key.split('.').peekable();
    let mut current = document;
    while let Some(segment) = segments.next() {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let Value::Object(fields) = current else {
            return;
        };
        if segments.peek().is_none() {
            fields.insert(segment.to_owned(), value);
            return;
        }
        current = fields
            .entry(segment.to_owned())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}

fn parse_number(raw: &str) -> Result<Value, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Value::Number(0.into()));
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Ok(Value::Number(int.into()));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| ValidationError::InvalidNumber(raw.to_owned()))
}
