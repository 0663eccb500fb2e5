use thiserror::Error;

//precondition failures raised by the core before any simulator state is touched
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("missing required field '{field}' at record {index}")]
    MissingField { field: String, index: usize },
    #[error("insufficient data: need at least {required} records, got {actual}")]
    InsufficientData { required: usize, actual: usize },
    #[error("length mismatch: {prices} price bars vs {indicators} indicator records")]
    LengthMismatch { prices: usize, indicators: usize },
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl ValidationError {
    pub fn missing_field(field: &str, index: usize) -> Self {
        ValidationError::MissingField {
            field: field.to_string(),
            index,
        }
    }

    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
