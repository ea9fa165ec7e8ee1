use smallvec::SmallVec;

use crate::{QueryTokens, TokenizerConfig};

/// A span of source text, either matchable (`is_token`) or an inert separator.
///
/// Concatenating the `text` of a tokenizer's output reproduces its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub is_token: bool,
}

impl Token {
    pub fn word(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_token: true,
        }
    }

    pub fn separator(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_token: false,
        }
    }
}

/// Splits text into alternating token and separator spans.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    split_symbols: SmallVec<[char; 8]>,
    split_by_case: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(&TokenizerConfig::default())
    }
}

impl Tokenizer {
    pub fn new(config: &TokenizerConfig) -> Self {
        Self {
            split_symbols: config.split_symbols.iter().copied().collect(),
            split_by_case: config.split_by_case,
        }
    }

    pub fn split_by_case(&self) -> bool {
        self.split_by_case
    }

    #[inline]
    fn is_split_symbol(&self, c: char) -> bool {
        self.split_symbols.contains(&c)
    }

    /// Tokenize `text` in a single left-to-right scan.
    ///
    /// The current token is always `text[start..i]`, so spans are slices of the
    /// input and nothing is lost or duplicated.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(8);
        let mut start = 0;
        // True while we are inside a run of uppercase characters.
        let mut case_run = false;

        for (i, c) in text.char_indices() {
            if self.is_split_symbol(c) {
                push_word(&mut tokens, &text[start..i]);
                let end = i + c.len_utf8();
                tokens.push(Token::separator(&text[i..end]));
                start = end;
                case_run = false;
            } else if self.split_by_case && c.is_uppercase() {
                if !case_run {
                    push_word(&mut tokens, &text[start..i]);
                    start = i;
                    case_run = true;
                }
            } else {
                case_run = false;
            }
        }

        push_word(&mut tokens, &text[start..]);
        tokens
    }

    /// Tokenize a query: separators are dropped and tokens uppercased.
    pub fn query_tokens(&self, query: &str) -> QueryTokens {
        QueryTokens::new(
            self.tokenize(query)
                .into_iter()
                .filter(|t| t.is_token)
                .map(|t| t.text.to_uppercase()),
        )
    }
}

#[inline]
fn push_word(tokens: &mut Vec<Token>, word: &str) {
    if !word.is_empty() {
        tokens.push(Token::word(word));
    }
}

#[cfg(test)]
#[path = "tokenizer_tests.rs"]
mod tests;
