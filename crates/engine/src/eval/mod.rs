mod highlight;

use bitflags::bitflags;
use hashbrown::HashSet;
use smallvec::SmallVec;

pub use highlight::{Highlight, HighlightSpan, render_spans};

use crate::{IndexedItem, Token, eval::highlight::SpanBuffer};

/// Uppercased query tokens, in query order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryTokens {
    tokens: SmallVec<[String; 4]>,
    /// Number of distinct tokens; repeated query words count once.
    distinct: usize,
}

impl QueryTokens {
    /// Tokens must already be uppercased.
    pub fn new(tokens: impl IntoIterator<Item = String>) -> Self {
        let tokens: SmallVec<[String; 4]> = tokens.into_iter().collect();
        let distinct = tokens
            .iter()
            .map(String::as_str)
            .collect::<HashSet<&str>>()
            .len();
        Self { tokens, distinct }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn distinct_len(&self) -> usize {
        self.distinct
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }
}

bitflags! {
    /// Per-field outcome of matching.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FieldFlags: u8 {
        /// The field alone matched every distinct query token.
        const COMPLETE   = 0b0000_0001;
        /// Matches in this field never went out of query order.
        const SAME_ORDER = 0b0000_0010;
    }
}

impl FieldFlags {
    /// Whether this field can vouch for the item's same-order status.
    #[inline]
    pub fn witnesses_order(self) -> bool {
        self.contains(FieldFlags::COMPLETE | FieldFlags::SAME_ORDER)
    }
}

/// Result of matching one field's tokens against the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMatch<'q> {
    /// Query tokens that matched at least one field token.
    pub matched: HashSet<&'q str>,
    /// Spans whose text concatenates back to the field text.
    pub highlight: Vec<HighlightSpan>,
    pub flags: FieldFlags,
}

/**
Match one field against the query.

Each field token is compared with the query tokens in query order and the first
one that is a prefix of the (uppercased) field token wins. There is no search
for a longer or better token.

Order tracking compares the query token just before the winner with the last
matched query token. Any mismatch latches the field out of same order for good.
*/
pub fn match_field<'q>(tokens: &[Token], query: &'q QueryTokens) -> FieldMatch<'q> {
    if query.is_empty() {
        return unmatched_field(tokens);
    }

    let mut spans = SpanBuffer::default();
    let mut matched: HashSet<&'q str> = HashSet::new();
    // Untagged text waiting to be emitted in front of the next match.
    let mut pending = String::new();
    let mut last_matched: &str = "";
    let mut same_order = true;

    for token in tokens {
        if !token.is_token {
            pending.push_str(&token.text);
            continue;
        }

        let upper = token.text.to_uppercase();
        let hit = query
            .tokens
            .iter()
            .position(|q| upper.starts_with(q.as_str()));

        let Some(pos) = hit else {
            pending.push_str(&token.text);
            continue;
        };

        let query_token = query.tokens[pos].as_str();
        let prev = if pos == 0 {
            ""
        } else {
            query.tokens[pos - 1].as_str()
        };
        if prev != last_matched {
            same_order = false;
        }
        last_matched = query_token;
        matched.insert(query_token);

        let split = prefix_split(&token.text, query_token.len());
        spans.push(&pending, false);
        pending.clear();
        spans.push(&token.text[..split], true);
        spans.push(&token.text[split..], false);
    }

    spans.push(&pending, false);

    let mut flags = FieldFlags::empty();
    if matched.len() == query.distinct_len() {
        flags |= FieldFlags::COMPLETE;
    }
    if same_order {
        flags |= FieldFlags::SAME_ORDER;
    }

    FieldMatch {
        matched,
        highlight: spans.into_spans(),
        flags,
    }
}

/// An empty query matches every field trivially, without highlights.
fn unmatched_field<'q>(tokens: &[Token]) -> FieldMatch<'q> {
    let text: String = tokens.iter().map(|t| t.text.as_str()).collect();
    let mut spans = SpanBuffer::default();
    spans.push(&text, false);

    FieldMatch {
        matched: HashSet::new(),
        highlight: spans.into_spans(),
        flags: FieldFlags::COMPLETE | FieldFlags::SAME_ORDER,
    }
}

/// Byte offset in `text` covering the first `upper_len` bytes of its uppercase form.
///
/// Uppercasing can expand a char (`ß` becomes `SS`), so the split lands on the
/// first char boundary at or past the matched length.
fn prefix_split(text: &str, upper_len: usize) -> usize {
    if upper_len == 0 {
        return 0;
    }

    let mut covered = 0;
    for (i, c) in text.char_indices() {
        covered += c.to_uppercase().map(char::len_utf8).sum::<usize>();
        if covered >= upper_len {
            return i + c.len_utf8();
        }
    }
    text.len()
}

/// Outcome of matching a whole item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemMatch {
    pub highlight: Highlight,
    pub is_same_order: bool,
}

/**
Match every field of `item` and aggregate.

The item matches when the union of matched tokens over all fields covers the
query, so words may be satisfied by different fields. It is same-order only
when one field covers the whole query on its own and stayed in order.
*/
pub fn match_item<T>(item: &IndexedItem<T>, query: &QueryTokens) -> Option<ItemMatch> {
    let mut matched: HashSet<&str> = HashSet::new();
    let mut is_same_order = query.is_empty();
    let mut fields = Vec::with_capacity(item.field_count());

    for (key, tokens) in item.fields() {
        let field = match_field(tokens, query);
        is_same_order |= field.flags.witnesses_order();
        matched.extend(field.matched);
        fields.push((key.to_owned(), field.highlight));
    }

    if matched.len() != query.distinct_len() {
        return None;
    }

    Some(ItemMatch {
        highlight: Highlight::from_fields(item.shape(), fields),
        is_same_order,
    })
}

/// A matched item as returned by the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'a, T> {
    pub item: &'a T,
    pub highlight: Highlight,
    pub is_same_order: bool,
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
