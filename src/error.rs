use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// type alias for all operations on a [`RecordAdapter`] or [`StoreEngine`] that could fail
/// with a [`SquaresError`]
///
/// [`RecordAdapter`]: ./struct.RecordAdapter.html
/// [`StoreEngine`]: ./engine/trait.StoreEngine.html
pub type Result<T> = std::result::Result<T, SquaresError>;

/// The Error variants used by this crate.
///
/// Lower level errors from third party crates are wrapped by their own variant, so that the
/// original error detail is carried all the way into the HTTP error body.
#[derive(Debug, Error)]
pub enum SquaresError {
    /// a required request field was absent or empty
    #[error("{label} not provided. Make sure you have a \"{field}\" property in your request")]
    MissingField {
        /// human readable name of the field
        label: &'static str,
        /// the JSON property name of the field
        field: &'static str,
    },

    /// no entity is stored at the given key path
    #[error("No entity found for key {0}.")]
    NotFound(String),

    /// the request body could not be decoded into a request payload
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// errors reported by the sled engine
    #[error("{0}")]
    Sled(#[from] sled::Error),

    /// Serde Error
    #[error("{0}")]
    Serde(#[from] serde_json::Error),

    /// variant for errors caused from IO
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// a blocking store call panicked or was cancelled
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// errors that occur while parsing command line or configuration values
    #[error("{0}")]
    Parsing(String),

    /// the server could not be reached by a [`SquaresClient`]
    ///
    /// [`SquaresClient`]: ./struct.SquaresClient.html
    #[error("{0}")]
    Http(#[from] ureq::Error),

    /// the server answered a [`SquaresClient`] request with an error body
    ///
    /// [`SquaresClient`]: ./struct.SquaresClient.html
    #[error("{0}")]
    Remote(String),
}

impl SquaresError {
    /// builds a [`SquaresError::MissingField`] for the JSON property `field`
    pub fn missing(label: &'static str, field: &'static str) -> Self {
        SquaresError::MissingField { label, field }
    }

    /// returns `true` if this error was raised by the store engine rather than by the
    /// adapter's own validation or lookup rules
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            SquaresError::Sled(_)
                | SquaresError::Serde(_)
                | SquaresError::Io(_)
                | SquaresError::Task(_)
        )
    }

    /// the HTTP status a handler answers with for this error.
    ///
    /// Every failure, including validation and not-found, is reported as a 500.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// the error message
    pub error: String,
    /// the HTTP status code
    pub code: u16,
}

impl From<&SquaresError> for ErrorResponse {
    fn from(err: &SquaresError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for SquaresError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::from(&self));
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_messages() {
        let err = SquaresError::missing("Square ID", "squareid");
        assert_eq!(
            err.to_string(),
            r#"Square ID not provided. Make sure you have a "squareid" property in your request"#
        );
    }

    #[test]
    fn every_error_is_a_500() {
        let errors = vec![
            SquaresError::missing("Key", "key"),
            SquaresError::NotFound("infinityOne/a@b.com".to_string()),
            SquaresError::InvalidBody("expected value".to_string()),
            SquaresError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk")),
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn store_errors_are_distinct_from_not_found() {
        assert!(!SquaresError::NotFound("k/v".to_string()).is_store_error());
        assert!(!SquaresError::missing("Kind", "kind").is_store_error());
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(SquaresError::from(io).is_store_error());
    }
}
