//! Error types for coercion and overload resolution

use thiserror::Error;

/// Result type for value conversion
pub type CoerceResult<T> = Result<T, CoerceError>;

/// Result type for overload resolution
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Conversion failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoerceError {
    /// The value scores `UNCOERCIBLE` against the target type
    #[error("Cannot coerce {value} to {target}")]
    Uncoercible {
        /// Kind of the script value
        value: String,
        /// Target type name
        target: String,
    },

    /// A table element could not be delivered as the array element type
    #[error("Cannot coerce table element {index} to {target}")]
    ElementUncoercible {
        /// 1-based table index
        index: usize,
        /// Element type name
        target: String,
    },

    /// Argument count does not match the parameter count
    #[error("Expected {expected} arguments, got {actual}")]
    ArityMismatch {
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        actual: usize,
    },

    /// Assignment to a final field
    #[error("Field {field} is final")]
    ReadOnlyField {
        /// Field name
        field: String,
    },
}

/// Overload selection failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    /// Two or more candidates share the lowest total score
    #[error("Ambiguous call to {name}: {} candidates score {score}", .candidates.len())]
    AmbiguousOverload {
        /// Member name
        name: String,
        /// The shared lowest score
        score: u32,
        /// Tied candidates, in declaration order
        candidates: Vec<String>,
    },

    /// No candidate accepts the arguments
    #[error("No overload of {name} accepts {arity} arguments")]
    NoMatchingOverload {
        /// Member name
        name: String,
        /// Supplied argument count
        arity: usize,
    },

    /// Too many arguments to rank reliably
    #[error("Call with {arity} arguments exceeds the maximum arity {max}")]
    ArityTooLarge {
        /// Supplied argument count
        arity: usize,
        /// Configured maximum
        max: usize,
    },
}

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read interop config: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse interop config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Validation error
    #[error("Invalid interop config: {0}")]
    ValidationError(String),
}
