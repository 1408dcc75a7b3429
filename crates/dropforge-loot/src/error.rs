//! Engine error types.

use thiserror::Error;

/// Load-time configuration problems. Evaluation never raises these; a spec
/// that parsed is always resolvable.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid number specification: {text:?}")]
    InvalidNumber { text: String },
}

/// Failures turning a raw tag string into a condition.
#[derive(Debug, Error)]
pub enum ConditionParseError {
    #[error("unknown condition tag: {0:?}")]
    UnknownTag(String),

    #[error("invalid condition {tag:?}: {reason}")]
    Invalid { tag: String, reason: String },
}

/// Failures registering a condition shape.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("condition name {0:?} can never appear in a parsed tag")]
    InvalidName(String),
}
