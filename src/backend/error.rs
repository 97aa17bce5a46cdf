//! Backend error types
//!
//! Everything that can go wrong talking to the code / ranking service. None of
//! these ever reach the simulation; the host shows `user_message()` and moves on.

use thiserror::Error;

/// The code (or the form around it) was not accepted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Wrong length or empty
    #[error("code must be 5 characters after HONEY-")]
    Malformed,

    #[error("code has already been used")]
    AlreadyUsed,

    #[error("code does not exist")]
    Unknown,

    /// A required form field was left blank
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Server said no for some other reason
    #[error("rejected: {0}")]
    Rejected(String),
}

/// Errors from a backend call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request never got a response
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a failure status or an unreadable body
    #[error("backend error ({status}): {message}")]
    Backend { status: u16, message: String },
}

impl ApiError {
    /// Alert text for the player
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation(ValidationError::Malformed) => {
                "Por favor, introduce los 5 caracteres de tu código.".to_string()
            }
            ApiError::Validation(ValidationError::AlreadyUsed) => {
                "❌ ¡Este código ya ha sido utilizado! Necesitas pedir un código nuevo para jugar."
                    .to_string()
            }
            ApiError::Validation(ValidationError::Unknown) => {
                "❌ ¡El código no existe! Por favor, verifica que esté correcto.".to_string()
            }
            ApiError::Validation(ValidationError::MissingField(field)) => {
                format!("Por favor, introduce tu {field}.")
            }
            ApiError::Validation(ValidationError::Rejected(message)) => format!("❌ Error: {message}"),
            ApiError::Network(_) => {
                "❌ Error de conexión de red. Verifica tu conexión a internet.".to_string()
            }
            ApiError::Backend { status, message } => format!("❌ Error ({status}): {message}"),
        }
    }

    /// The player should go back to the main menu rather than retry the form
    pub fn returns_to_menu(&self) -> bool {
        matches!(self, ApiError::Validation(ValidationError::AlreadyUsed))
    }
}

/// Result type for backend calls
pub type ApiResult<T> = Result<T, ApiError>;
