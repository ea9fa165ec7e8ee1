use thiserror::Error;

/// Errors raised while building a filter.
///
/// Filtering itself is infallible: unmatched queries produce an empty result.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("a text provider is required to build a filter")]
    MissingTextProvider,
}
