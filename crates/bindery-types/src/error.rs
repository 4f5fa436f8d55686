//! Type model errors

use thiserror::Error;

/// Errors raised while declaring or reflecting over native types
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TypeError {
    /// Members were declared twice for the same type
    #[error("Members of {type_name} are already declared")]
    DuplicateMembers {
        /// Name of the type
        type_name: String,
    },

    /// A member name is empty or collides with a reserved name
    #[error("Invalid member name '{name}' on {type_name}")]
    InvalidName {
        /// Name of the declaring type
        type_name: String,
        /// Offending member name
        name: String,
    },

    /// Field access checks could not be relaxed
    #[error("Access denied to field {type_name}.{field}")]
    AccessDenied {
        /// Name of the declaring type
        type_name: String,
        /// Field name
        field: String,
    },
}
