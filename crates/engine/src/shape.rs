use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field key used for `ItemText::Single`.
pub const SINGLE_FIELD_KEY: &str = "s";

/// Positional field key for the `index`-th element of `ItemText::List`.
#[inline]
pub fn list_field_key(index: usize) -> String {
    format!("a{index}")
}

/// The shape of an item's text, fixed once per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextShape {
    Single,
    List,
    Keyed,
}

/// Text extracted from an item by its text provider.
///
/// `None` entries are missing fields: they tokenize to nothing and never match.
/// Deserializes from a JSON string, array, or object respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemText {
    Single(String),
    List(Vec<Option<String>>),
    Keyed(IndexMap<String, Option<String>>),
}

impl ItemText {
    /// Build a list shape from present values.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ItemText::List(values.into_iter().map(|v| Some(v.into())).collect())
    }

    /// Build a keyed shape; key order is the iteration order of `pairs`.
    pub fn keyed<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        ItemText::Keyed(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        )
    }

    pub fn shape(&self) -> TextShape {
        match self {
            ItemText::Single(_) => TextShape::Single,
            ItemText::List(_) => TextShape::List,
            ItemText::Keyed(_) => TextShape::Keyed,
        }
    }

    /// Normalize into ordered `(field key, raw text)` pairs.
    pub fn into_fields(self) -> Vec<(String, Option<String>)> {
        match self {
            ItemText::Single(text) => vec![(SINGLE_FIELD_KEY.to_owned(), Some(text))],
            ItemText::List(values) => values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (list_field_key(i), v))
                .collect(),
            ItemText::Keyed(map) => map.into_iter().collect(),
        }
    }
}

impl From<&str> for ItemText {
    fn from(text: &str) -> Self {
        ItemText::Single(text.to_owned())
    }
}

impl From<String> for ItemText {
    fn from(text: String) -> Self {
        ItemText::Single(text)
    }
}

impl From<Vec<String>> for ItemText {
    fn from(values: Vec<String>) -> Self {
        ItemText::list(values)
    }
}

impl From<Vec<&str>> for ItemText {
    fn from(values: Vec<&str>) -> Self {
        ItemText::list(values)
    }
}

impl From<IndexMap<String, String>> for ItemText {
    fn from(map: IndexMap<String, String>) -> Self {
        ItemText::keyed(map)
    }
}

#[cfg(test)]
#[path = "shape_tests.rs"]
mod tests;
