use indexmap::IndexMap;
use serde::Serialize;

use crate::TextShape;

/// A run of field text, either matched by a query token or not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub text: String,
    pub is_matched: bool,
}

impl HighlightSpan {
    pub fn matched(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_matched: true,
        }
    }

    pub fn unmatched(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_matched: false,
        }
    }
}

/// Highlight spans shaped like the item's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Highlight {
    Single(Vec<HighlightSpan>),
    List(Vec<Vec<HighlightSpan>>),
    Keyed(IndexMap<String, Vec<HighlightSpan>>),
}

impl Highlight {
    /// Assemble per-field spans (in field order) into `shape`.
    pub fn from_fields(shape: TextShape, fields: Vec<(String, Vec<HighlightSpan>)>) -> Self {
        match shape {
            TextShape::Single => {
                Highlight::Single(fields.into_iter().next().map(|(_, s)| s).unwrap_or_default())
            }
            TextShape::List => Highlight::List(fields.into_iter().map(|(_, s)| s).collect()),
            TextShape::Keyed => Highlight::Keyed(fields.into_iter().collect()),
        }
    }

    pub fn shape(&self) -> TextShape {
        match self {
            Highlight::Single(_) => TextShape::Single,
            Highlight::List(_) => TextShape::List,
            Highlight::Keyed(_) => TextShape::Keyed,
        }
    }

    /// Spans of a single-text highlight.
    pub fn as_single(&self) -> Option<&[HighlightSpan]> {
        match self {
            Highlight::Single(spans) => Some(spans),
            _ => None,
        }
    }

    /// Every field's spans in order, labelled with the key for keyed text.
    pub fn fields(&self) -> Vec<(Option<&str>, &[HighlightSpan])> {
        match self {
            Highlight::Single(spans) => vec![(None, spans.as_slice())],
            Highlight::List(fields) => fields.iter().map(|s| (None, s.as_slice())).collect(),
            Highlight::Keyed(fields) => fields
                .iter()
                .map(|(k, s)| (Some(k.as_str()), s.as_slice()))
                .collect(),
        }
    }

    pub fn has_matches(&self) -> bool {
        self.fields()
            .iter()
            .any(|(_, spans)| spans.iter().any(|s| s.is_matched))
    }
}

/// Render spans as text, wrapping matched runs in `open`/`close`.
pub fn render_spans(spans: &[HighlightSpan], open: &str, close: &str) -> String {
    let mut out = String::with_capacity(spans.iter().map(|s| s.text.len()).sum::<usize>() + 8);
    for span in spans {
        if span.is_matched {
            out.push_str(open);
            out.push_str(&span.text);
            out.push_str(close);
        } else {
            out.push_str(&span.text);
        }
    }
    out
}

/// Collects spans for one field, dropping empty ones.
#[derive(Debug, Default)]
pub(crate) struct SpanBuffer {
    spans: Vec<HighlightSpan>,
}

impl SpanBuffer {
    #[inline]
    pub(crate) fn push(&mut self, text: &str, is_matched: bool) {
        if !text.is_empty() {
            self.spans.push(HighlightSpan {
                text: text.to_owned(),
                is_matched,
            });
        }
    }

    pub(crate) fn into_spans(self) -> Vec<HighlightSpan> {
        self.spans
    }
}

#[cfg(test)]
#[path = "highlight_tests.rs"]
mod tests;
