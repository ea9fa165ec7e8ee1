use std::{mem, time::Instant};

use indexmap::IndexMap;
use log::debug;

mod provider;

pub use provider::TextProvider;

use crate::{TextShape, Token, Tokenizer};

/// An item together with its per-field tokenization.
///
/// Field keys always match the item's shape: `"s"` for single text,
/// `"a0"`, `"a1"`, ... for lists, and the provider's keys for keyed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedItem<T> {
    item: T,
    shape: TextShape,
    fields: IndexMap<String, Vec<Token>>,
}

impl<T> IndexedItem<T> {
    pub fn new(item: T, tokenizer: &Tokenizer, provider: &dyn TextProvider<T>) -> Self {
        let text = provider.text(&item);
        let shape = text.shape();
        let fields = text
            .into_fields()
            .into_iter()
            .map(|(key, raw)| {
                // Missing fields tokenize to nothing.
                let tokens = raw
                    .as_deref()
                    .map(|raw| tokenizer.tokenize(raw))
                    .unwrap_or_default();
                (key, tokens)
            })
            .collect();

        Self {
            item,
            shape,
            fields,
        }
    }

    #[inline]
    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn into_item(self) -> T {
        self.item
    }

    #[inline]
    pub fn shape(&self) -> TextShape {
        self.shape
    }

    /// Fields in shape order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[Token])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn field(&self, key: &str) -> Option<&[Token]> {
        self.fields.get(key).map(Vec::as_slice)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// Either every item is still raw, or every item is tokenized.
#[derive(Debug)]
enum IndexState<T> {
    Pending(Vec<T>),
    Indexed(Vec<IndexedItem<T>>),
}

impl<T> Default for IndexState<T> {
    fn default() -> Self {
        IndexState::Pending(Vec::new())
    }
}

/**
Owns the item collection and its lazily-built tokenization.

Items start out pending, so building a large collection costs nothing until
the first query. The first call to [`ItemsIndex::indexed_items`] tokenizes
everything at once; from then on `add` tokenizes eagerly.
*/
pub struct ItemsIndex<T> {
    state: IndexState<T>,
    tokenizer: Tokenizer,
    provider: Box<dyn TextProvider<T>>,
}

impl<T> ItemsIndex<T> {
    pub fn new(provider: Box<dyn TextProvider<T>>, tokenizer: Tokenizer, items: Vec<T>) -> Self {
        Self {
            state: IndexState::Pending(items),
            tokenizer,
            provider,
        }
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// Current items in insertion order, whether or not they are indexed.
    pub fn items(&self) -> Vec<&T> {
        match &self.state {
            IndexState::Pending(items) => items.iter().collect(),
            IndexState::Indexed(items) => items.iter().map(IndexedItem::item).collect(),
        }
    }

    pub fn len(&self) -> usize {
        match &self.state {
            IndexState::Pending(items) => items.len(),
            IndexState::Indexed(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self.state, IndexState::Indexed(_))
    }

    /// Tokenized items, building the index on first access.
    pub fn indexed_items(&mut self) -> &[IndexedItem<T>] {
        self.indexed_mut()
    }

    /// Build the index now if it is still pending.
    pub fn ensure_indexed(&mut self) {
        self.indexed_mut();
    }

    fn indexed_mut(&mut self) -> &mut Vec<IndexedItem<T>> {
        if let IndexState::Pending(pending) = &mut self.state {
            let pending = mem::take(pending);
            let start = Instant::now();
            let count = pending.len();

            let indexed: Vec<IndexedItem<T>> = pending
                .into_iter()
                .map(|item| IndexedItem::new(item, &self.tokenizer, self.provider.as_ref()))
                .collect();

            debug!(
                "indexed {} items in {:.2}ms",
                count,
                start.elapsed().as_secs_f64() * 1000.0
            );
            self.state = IndexState::Indexed(indexed);
        }

        match &mut self.state {
            IndexState::Indexed(items) => items,
            IndexState::Pending(_) => unreachable!("pending index was just built"),
        }
    }

    pub fn add(&mut self, item: T) {
        match &mut self.state {
            IndexState::Pending(items) => items.push(item),
            IndexState::Indexed(items) => items.push(IndexedItem::new(
                item,
                &self.tokenizer,
                self.provider.as_ref(),
            )),
        }
    }

    pub fn add_all(&mut self, items: impl IntoIterator<Item = T>) {
        for item in items {
            self.add(item);
        }
    }

    /// Remove the first item equal to `item`. Returns whether one was found.
    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        match &mut self.state {
            IndexState::Pending(items) => remove_first(items, |i| i == item),
            IndexState::Indexed(items) => remove_first(items, |i| i.item() == item),
        }
    }

    /// Remove each of `items` once. Returns how many were found.
    pub fn remove_all<'a>(&mut self, items: impl IntoIterator<Item = &'a T>) -> usize
    where
        T: PartialEq + 'a,
    {
        items.into_iter().filter(|item| self.remove(item)).count()
    }

    /// Drop the tokenization and go back to pending; the next access re-tokenizes.
    pub fn reset(&mut self) {
        let IndexState::Indexed(indexed) = &mut self.state else {
            return;
        };

        let items: Vec<T> = mem::take(indexed)
            .into_iter()
            .map(IndexedItem::into_item)
            .collect();
        debug!("reset index of {} items", items.len());
        self.state = IndexState::Pending(items);
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        match &mut self.state {
            IndexState::Pending(items) => items.clear(),
            IndexState::Indexed(items) => items.clear(),
        }
    }

    /// Swap the tokenizer; existing tokenization is discarded.
    pub fn set_tokenizer(&mut self, tokenizer: Tokenizer) {
        self.tokenizer = tokenizer;
        self.reset();
    }
}

fn remove_first<E>(items: &mut Vec<E>, pred: impl FnMut(&E) -> bool) -> bool {
    match items.iter().position(pred) {
        Some(pos) => {
            items.remove(pos);
            true
        }
        None => false,
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
