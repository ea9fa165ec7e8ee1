use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use glint_engine::{ItemText, TextProvider};
use log::debug;
use serde_json::{Deserializer, Value};

/// Read the whole input from `path`, or stdin when absent or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read items from stdin")?;
            Ok(buf)
        }
    }
}

/// Parse items from a JSON array or from a stream of JSON values (NDJSON).
///
/// A document holding exactly one top-level array is taken as the item list;
/// any other stream yields one item per value.
pub fn parse_items(input: &str) -> Result<Vec<Value>> {
    let mut values = Vec::new();
    for (n, value) in Deserializer::from_str(input).into_iter::<Value>().enumerate() {
        let value = value.with_context(|| format!("invalid JSON in item {}", n + 1))?;
        values.push(value);
    }

    let items = match values.as_mut_slice() {
        [Value::Array(items)] => std::mem::take(items),
        _ => values,
    };
    debug!("parsed {} input items", items.len());
    Ok(items)
}

/// Turns JSON items into searchable text.
///
/// With no fields the item itself is the text; with one field its value is;
/// with several, each becomes a keyed field. Field names starting with `/` are
/// JSON pointers into nested values.
#[derive(Debug, Clone, Default)]
pub struct FieldSelector {
    fields: Vec<String>,
}

impl FieldSelector {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    fn lookup<'v>(item: &'v Value, field: &str) -> Option<&'v Value> {
        if field.starts_with('/') {
            item.pointer(field)
        } else {
            item.get(field)
        }
    }
}

impl TextProvider<Value> for FieldSelector {
    fn text(&self, item: &Value) -> ItemText {
        match self.fields.as_slice() {
            [] => whole_item_text(item),
            [field] => ItemText::Single(
                Self::lookup(item, field)
                    .and_then(value_text)
                    .unwrap_or_default(),
            ),
            fields => ItemText::Keyed(
                fields
                    .iter()
                    .map(|f| (f.clone(), Self::lookup(item, f).and_then(value_text)))
                    .collect(),
            ),
        }
    }
}

fn whole_item_text(item: &Value) -> ItemText {
    match item {
        Value::Array(values) => ItemText::List(values.iter().map(value_text).collect()),
        Value::Object(map) => {
            ItemText::Keyed(map.iter().map(|(k, v)| (k.clone(), value_text(v))).collect())
        }
        other => ItemText::Single(value_text(other).unwrap_or_default()),
    }
}

/// Text of a JSON value; `null` is a missing field.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
