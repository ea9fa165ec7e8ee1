mod config;
mod error;
mod eval;
mod filter;
mod index;
mod pipeline;
mod rank;
mod shape;
mod tokenizer;

pub use config::*;
pub use error::ConfigError;
pub use eval::*;
pub use filter::{FilterBuilder, FuzzyFilter};
pub use index::*;
pub use pipeline::*;
pub use rank::apply_same_order_policy;
pub use shape::*;
pub use tokenizer::{Token, Tokenizer};
