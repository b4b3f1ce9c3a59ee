use serde::{Serialize, Serializer, ser::SerializeStruct};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("Unknown category {key} for parcel {parcel_id}")]
    UnknownCategory { parcel_id: String, key: String },

    #[error("Invalid dimensions for parcel {parcel_id}: {reason}")]
    InvalidDimensions { parcel_id: String, reason: String },

    #[error("Missing declared value for electronics parcel {parcel_id}")]
    MissingDeclaredValue { parcel_id: String },

    #[error("Unknown packaging option {key}")]
    UnknownPackaging { key: String },

    #[error("Validation failed{}: {message}", parcel_suffix(.parcel_id))]
    Validation {
        parcel_id: Option<String>,
        message: String,
    },
}

fn parcel_suffix(parcel_id: &Option<String>) -> String {
    parcel_id
        .as_ref()
        .map(|id| format!(" for parcel {id}"))
        .unwrap_or_default()
}

impl InputError {
    pub fn validation(message: impl Into<String>) -> Self {
        InputError::Validation {
            parcel_id: None,
            message: message.into(),
        }
    }

    pub fn parcel_validation(parcel_id: &str, message: impl Into<String>) -> Self {
        InputError::Validation {
            parcel_id: Some(parcel_id.to_string()),
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            InputError::UnknownCategory { .. } => "unknown_category",
            InputError::InvalidDimensions { .. } => "invalid_dimensions",
            InputError::MissingDeclaredValue { .. } => "missing_declared_value",
            InputError::UnknownPackaging { .. } => "unknown_packaging",
            InputError::Validation { .. } => "validation",
        }
    }

    pub fn parcel_id(&self) -> Option<&str> {
        match self {
            InputError::UnknownCategory { parcel_id, .. }
            | InputError::InvalidDimensions { parcel_id, .. }
            | InputError::MissingDeclaredValue { parcel_id } => Some(parcel_id),
            InputError::Validation { parcel_id, .. } => parcel_id.as_deref(),
            InputError::UnknownPackaging { .. } => None,
        }
    }
}

impl Serialize for InputError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("InputError", 3)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("parcel_id", &self.parcel_id())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Shipment rejected with {} error(s)", .0.len())]
    Rejected(Vec<InputError>),

    #[error("Internal consistency violation: {0}")]
    InternalConsistency(String),
}

impl QuoteError {
    pub fn is_defect(&self) -> bool {
        matches!(self, QuoteError::InternalConsistency(_))
    }

    pub fn input_errors(&self) -> &[InputError] {
        match self {
            QuoteError::Rejected(errors) => errors,
            QuoteError::InternalConsistency(_) => &[],
        }
    }
}
