use log::debug;

use crate::{
    ConfigError, FilterConfig, FilterMetrics, FilterOptions, InitIndexOn, ItemsIndex,
    MatchResult, MetricsTimer, NoopTimer, Stage, TextProvider, Timer, Tokenizer, TokenizerConfig,
    match_item, rank::apply_same_order_policy,
};

/**
Filters a collection of items by a free-text query.

Every query word must be a prefix of some word in the item's text; each match
carries highlight spans shaped like the item's text. The collection is
tokenized once, lazily by default, and kept in sync by `add` and `remove`.

```ignore
let mut filter = FuzzyFilter::builder()
    .items(vec!["hello world", "world hello"])
    .text_provider(|s: &&str| ItemText::from(*s))
    .build()?;
let results = filter.filter("hel wor");
```
*/
pub struct FuzzyFilter<T> {
    index: ItemsIndex<T>,
    options: FilterOptions,
}

impl<T> FuzzyFilter<T> {
    pub fn builder() -> FilterBuilder<T> {
        FilterBuilder::default()
    }

    /// Match every item against `query`, in index order modulo the same-order policy.
    pub fn filter(&mut self, query: &str) -> Vec<MatchResult<'_, T>> {
        self.run(query, &mut NoopTimer)
    }

    /// Like [`FuzzyFilter::filter`], also reporting per-stage timings.
    pub fn filter_timed(&mut self, query: &str) -> (Vec<MatchResult<'_, T>>, FilterMetrics) {
        let mut timer = MetricsTimer::new();
        let results = self.run(query, &mut timer);
        (results, timer.into_metrics())
    }

    fn run<Tm: Timer>(&mut self, query: &str, timer: &mut Tm) -> Vec<MatchResult<'_, T>> {
        let tokenizer = self.index.tokenizer();
        let query_tokens = timer.measure(Stage::Tokenize, || tokenizer.query_tokens(query));

        if !self.index.is_indexed() {
            let index = &mut self.index;
            timer.measure(Stage::Index, || index.ensure_indexed());
        }

        let options = self.options;
        let items = self.index.indexed_items();

        let matches: Vec<MatchResult<'_, T>> = timer.measure(Stage::Match, || {
            items
                .iter()
                .filter_map(|indexed| {
                    match_item(indexed, &query_tokens).map(|m| MatchResult {
                        item: indexed.item(),
                        highlight: m.highlight,
                        is_same_order: m.is_same_order,
                    })
                })
                .collect()
        });

        let matched = matches.len();
        let results = timer.measure(Stage::Rank, || apply_same_order_policy(matches, &options));
        timer.record_counts(items.len(), results.len());

        debug!(
            "filter {:?}: {} tokens, {} of {} items matched, {} dropped by strict order",
            query,
            query_tokens.len(),
            matched,
            items.len(),
            matched - results.len()
        );

        results
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: FilterOptions) {
        self.options = options;
    }

    pub fn index(&self) -> &ItemsIndex<T> {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut ItemsIndex<T> {
        &mut self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn add(&mut self, item: T) {
        self.index.add(item);
    }

    pub fn add_all(&mut self, items: impl IntoIterator<Item = T>) {
        self.index.add_all(items);
    }

    pub fn remove(&mut self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.index.remove(item)
    }

    pub fn remove_all<'a>(&mut self, items: impl IntoIterator<Item = &'a T>) -> usize
    where
        T: PartialEq + 'a,
    {
        self.index.remove_all(items)
    }
}

/// Builder for [`FuzzyFilter`]. A text provider is required; everything else defaults.
pub struct FilterBuilder<T> {
    provider: Option<Box<dyn TextProvider<T>>>,
    items: Vec<T>,
    config: FilterConfig,
}

impl<T> Default for FilterBuilder<T> {
    fn default() -> Self {
        Self {
            provider: None,
            items: Vec::new(),
            config: FilterConfig::default(),
        }
    }
}

impl<T> FilterBuilder<T> {
    pub fn text_provider<P>(mut self, provider: P) -> Self
    where
        P: TextProvider<T> + 'static,
    {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Initial items; may be called more than once.
    pub fn items(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.items.extend(items);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: FilterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn init_index_on(mut self, init: InitIndexOn) -> Self {
        self.config.init_index_on = init;
        self
    }

    pub fn tokenizer(mut self, tokenizer: TokenizerConfig) -> Self {
        self.config.tokenizer = tokenizer;
        self
    }

    pub fn options(mut self, options: FilterOptions) -> Self {
        self.config.filter = options;
        self
    }

    pub fn build(self) -> Result<FuzzyFilter<T>, ConfigError> {
        let provider = self.provider.ok_or(ConfigError::MissingTextProvider)?;
        let tokenizer = Tokenizer::new(&self.config.tokenizer);
        let mut index = ItemsIndex::new(provider, tokenizer, self.items);

        if self.config.init_index_on == InitIndexOn::Construct {
            index.ensure_indexed();
        }

        Ok(FuzzyFilter {
            index,
            options: self.config.filter,
        })
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
