//! Error types for railway.
//!
//! Pipelines carry caller-defined failure payloads and this crate never
//! inspects or creates them. The errors defined here cover the crate's own
//! configuration surface only; they are returned as `Result` and never
//! enter an [`Outcome`](crate::Outcome).

/// Error raised while reading combinator configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A resolve order name was not recognized.
    #[error("unknown resolve order {0:?}: expected `sequential` or `concurrent`")]
    UnknownResolveOrder(String),
    /// An environment variable was set to an unparseable value.
    #[error("invalid value for {var}: expected {expected}, got {value:?}")]
    InvalidValue {
        /// The environment variable name.
        var: &'static str,
        /// The raw value found.
        value: String,
        /// What the variable accepts.
        expected: &'static str,
    },
}
