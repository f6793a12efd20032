use thiserror::Error;

/// Wiring mistakes in a form: a field read before its binding initialized
/// it, or one field name used with two value types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("field `{field}` was read before it was initialized")]
    Uninitialized { field: String },

    #[error("field `{field}` holds a `{found}` but was accessed as `{expected}`")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Raised while building a validator, never while validating.
#[derive(Debug, Error)]
pub enum ValidatorError {
    #[error("invalid bounds: min {min} is greater than max {max}")]
    InvalidBounds { min: String, max: String },

    #[error("invalid pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl ValidatorError {
    pub(crate) fn bounds(min: impl ToString, max: impl ToString) -> Self {
        Self::InvalidBounds {
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

pub type FormResult<T> = Result<T, FormError>;
