//! Error types for rule and filter construction, and for resolver contract
//! violations.

use thiserror::Error;

/// Errors raised at the engine boundary.
///
/// Validation variants are produced while building rules and filters from
/// their wire records; the algorithms themselves never fail. The single
/// exception is [`SiftError::MissingClassification`], which signals a caller
/// bug: domain-filter resolution was invoked without the classification map
/// it is contractually owed.
#[derive(Error, Debug)]
pub enum SiftError {
    /// A match condition was built with an empty value.
    #[error("rule value must not be empty")]
    EmptyRuleValue,

    /// A compound rule was built with fewer than two conditions.
    #[error("compound rule needs at least 2 conditions, got {got}")]
    TooFewConditions { got: usize },

    /// A rule record that could not be validated into an assignment rule.
    #[error("malformed rule record: {0}")]
    MalformedRule(String),

    /// A filter record carrying both personal and domain scope keys.
    #[error("filter record is scoped to both a source calendar and a domain")]
    AmbiguousFilter,

    /// A filter record carrying neither scope key.
    #[error("filter record is scoped to neither a source calendar nor a domain")]
    UnknownFilterKind,

    /// A filter record that names a kind but is missing required fields.
    #[error("malformed filter record: {0}")]
    MalformedFilter(String),

    /// Domain-filter resolution was invoked without a classification map.
    #[error("domain filter resolution requires a classification map")]
    MissingClassification,
}

/// Convenience alias used throughout calsift-core.
pub type Result<T> = std::result::Result<T, SiftError>;
