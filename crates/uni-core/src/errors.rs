//! Cross-cutting error types for unidash.
//!
//! Domain-specific errors (e.g., `ApiError`, `UploadError`) are defined in
//! their respective crates. Everything converges on `anyhow` in `uni-cli`.

use thiserror::Error;

/// Errors that can be raised by any unidash crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Record lookup returned no result.
    #[error("{entity} {id} not found")]
    NotFound { entity: String, id: i64 },

    /// One or more required form fields are blank.
    #[error("required fields are missing: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// A form field does not belong to the entity's schema.
    #[error("unknown field '{field}' for {entity}")]
    UnknownField { entity: String, field: String },

    /// A form value could not be converted to the field's type.
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
