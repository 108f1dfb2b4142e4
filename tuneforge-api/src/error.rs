use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

// `{"error": "..."}` as emitted by every failing endpoint
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ErrorEnvelope {
    pub error: String,
}

#[derive(Error, Clone, Debug, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Validation(String),

    #[error("not authorized: {0}")]
    Authorization(String),

    #[error("{0}")]
    NotFound(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),
}

impl ApiError {
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| GENERIC_ERROR.to_owned());

        match status {
            400 => Self::Validation(message),
            401 => Self::Authorization(message),
            404 => Self::NotFound(message),
            _ => Self::Server { status, message },
        }
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization(_))
    }
}
