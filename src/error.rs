//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body failed the shape, type or enumeration checks for a
    /// transaction.
    ///
    /// The string describes which check failed and is sent to the client.
    #[error("{0}")]
    InvalidTransaction(String),

    /// The request body could not be read as a JSON document.
    #[error("could not parse the request body as JSON: {0}")]
    InvalidJson(String),

    /// The request did not include the API key header.
    #[error("missing API key")]
    MissingApiKey,

    /// The request included an API key that does not match the configured key.
    #[error("invalid API key")]
    InvalidApiKey,

    /// The access gate was enabled but no API key was configured.
    ///
    /// This only occurs at startup and should stop the server from starting.
    #[error("the access gate is enabled but no API key was configured")]
    ApiKeyNotConfigured,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An aggregate of the stored amounts is too large to represent.
    #[error("the sum of the amounts is not a finite number")]
    AmountOverflow,

    /// The request body is larger than the server accepts.
    #[error("the request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::InvalidTransaction(message) => (StatusCode::BAD_REQUEST, message),
            Error::InvalidJson(reason) => (
                StatusCode::BAD_REQUEST,
                format!("Corpo da requisição inválido: {reason}"),
            ),
            Error::MissingApiKey => (
                StatusCode::UNAUTHORIZED,
                "Chave de API ausente".to_owned(),
            ),
            Error::InvalidApiKey => (StatusCode::FORBIDDEN, "Chave de API inválida".to_owned()),
            Error::PayloadTooLarge(_) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "Corpo da requisição muito grande".to_owned(),
            ),
            Error::NotFound | Error::UpdateMissingTransaction | Error::DeleteMissingTransaction => {
                (
                    StatusCode::NOT_FOUND,
                    "Transação não encontrada".to_owned(),
                )
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno do servidor".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
