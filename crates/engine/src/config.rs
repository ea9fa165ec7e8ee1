use serde::{Deserialize, Serialize};

/// Characters that separate tokens unless configured otherwise.
pub const DEFAULT_SPLIT_SYMBOLS: &[char] = &[' ', '\t', '.', '-', '_', ','];

/// When the items index pays its tokenization cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitIndexOn {
    /// Tokenize every item while the filter is being built.
    Construct,
    /// Tokenize lazily, on the first call to `filter`.
    #[default]
    FirstFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TokenizerConfig {
    /// Each of these characters ends the current token and is kept as a separator span.
    pub split_symbols: Vec<char>,
    /// Start a new token on a lowercase to uppercase transition.
    pub split_by_case: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            split_symbols: DEFAULT_SPLIT_SYMBOLS.to_vec(),
            split_by_case: true,
        }
    }
}

/// Same-order ranking policy applied to matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FilterOptions {
    /// Emit same-order matches before out-of-order ones. Ignored when strict.
    pub same_order_first: bool,
    /// Drop out-of-order matches entirely.
    pub same_order_strict: bool,
}

/// Everything a filter can be configured with, apart from its text provider and items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FilterConfig {
    pub init_index_on: InitIndexOn,
    pub tokenizer: TokenizerConfig,
    pub filter: FilterOptions,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
