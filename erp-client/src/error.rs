//! Client error types

use http::StatusCode;
use shared::ErrorBody;
use thiserror::Error;

/// Title shown when the server gives none
pub const GENERIC_ERROR_TITLE: &str = "Error";
/// Message shown when the server body is absent or unparsable
pub const GENERIC_ERROR_MESSAGE: &str = "Ocurrió un error inesperado. Intente nuevamente.";
/// Message shown for connectivity failures
pub const CONNECTION_ERROR_MESSAGE: &str =
    "No se pudo conectar con el servidor. Verifique su conexión e intente nuevamente.";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response (DNS, refused, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Server answered with a non-2xx status
    #[error("{title}: {message} (HTTP {status})")]
    Api {
        status: u16,
        title: String,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// 2xx response whose body does not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rejected before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Build the typed error for a non-2xx response body.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let details = serde_json::from_slice::<serde_json::Value>(body).ok();
        match ErrorBody::parse(body) {
            Some(parsed) => ClientError::Api {
                status: status.as_u16(),
                title: parsed.title().unwrap_or(GENERIC_ERROR_TITLE).to_string(),
                message: parsed
                    .message()
                    .map(str::to_string)
                    .or_else(|| parsed.first_field_error())
                    .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
                details,
            },
            None => ClientError::Api {
                status: status.as_u16(),
                title: GENERIC_ERROR_TITLE.to_string(),
                message: GENERIC_ERROR_MESSAGE.to_string(),
                details,
            },
        }
    }

    /// Title to show the user.
    pub fn title(&self) -> &str {
        match self {
            ClientError::Api { title, .. } => title,
            ClientError::Validation(_) => "Datos inválidos",
            _ => GENERIC_ERROR_TITLE,
        }
    }

    /// Message to show the user.
    pub fn message(&self) -> &str {
        match self {
            ClientError::Api { message, .. } => message,
            ClientError::Validation(message) => message,
            ClientError::Connection(_) => CONNECTION_ERROR_MESSAGE,
            _ => GENERIC_ERROR_MESSAGE,
        }
    }

    /// HTTP status, for server-signaled errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => StatusCode::from_u16(*status).ok(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::InvalidResponse(err.to_string())
        } else {
            ClientError::Connection(err.to_string())
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
