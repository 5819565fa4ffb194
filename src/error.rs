//! Defines the app level error type and conversions to rendered HTML pages and JSON responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    html::error_view, internal_server_error::InternalServerError, not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a fixed expense that does not exist
    #[error("tried to update a fixed expense that is not in the database")]
    UpdateMissingFixedExpense,

    /// Tried to delete a fixed expense that does not exist
    #[error("tried to delete a fixed expense that is not in the database")]
    DeleteMissingFixedExpense,

    /// Tried to update a market purchase that does not exist
    #[error("tried to update a market purchase that is not in the database")]
    UpdateMissingMarketPurchase,

    /// Tried to delete a market purchase that does not exist
    #[error("tried to delete a market purchase that is not in the database")]
    DeleteMissingMarketPurchase,

    /// An amount was not a finite, non-negative number.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A date was not in the format YYYY-MM-DD.
    #[error("invalid date \"{0}\", expected the format YYYY-MM-DD")]
    InvalidDate(String),

    /// A month key was not in the format YYYY-MM.
    #[error("invalid month \"{0}\", expected the format YYYY-MM")]
    InvalidMonth(String),

    /// An empty string was used as the type of a fixed expense.
    #[error("the expense type cannot be empty")]
    EmptyExpenseType,

    /// The request body could not be parsed.
    #[error("could not parse the request body: {0}")]
    InvalidPayload(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

/// The broad categories of [Error] that clients can act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The record does not exist.
    NotFound,
    /// The client sent data that does not pass validation.
    ValidationFailed,
    /// The record store cannot be reached.
    StoreUnavailable,
    /// Anything else, details are only written to the server logs.
    Internal,
}

impl ErrorKind {
    /// The HTTP status code used to report this kind of error.
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 275 occurs when a CHECK constraint failed, the only checks are on amounts.
            rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 275 => {
                Error::InvalidAmount("amounts cannot be negative".to_owned())
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound
            | Error::UpdateMissingFixedExpense
            | Error::DeleteMissingFixedExpense
            | Error::UpdateMissingMarketPurchase
            | Error::DeleteMissingMarketPurchase => ErrorKind::NotFound,
            Error::InvalidAmount(_)
            | Error::InvalidDate(_)
            | Error::InvalidMonth(_)
            | Error::EmptyExpenseType
            | Error::InvalidPayload(_) => ErrorKind::ValidationFailed,
            Error::DatabaseLockError => ErrorKind::StoreUnavailable,
            Error::InvalidTimezoneError(_) | Error::SqlError(_) => ErrorKind::Internal,
        }
    }

    /// Convert the error into an HTTP response with a JSON body of the form
    /// `{"error": "..."}`.
    pub fn into_json_response(self) -> Response {
        let kind = self.kind();
        let message = match kind {
            ErrorKind::NotFound | ErrorKind::ValidationFailed => self.to_string(),
            ErrorKind::StoreUnavailable => {
                "The record store is unavailable, try again later.".to_owned()
            }
            ErrorKind::Internal => {
                tracing::error!("An unexpected error occurred: {}", self);
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
        };

        (kind.status_code(), Json(json!({ "error": message }))).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidMonth(month) => (
                StatusCode::BAD_REQUEST,
                error_view(
                    "Bad Request",
                    "400",
                    "Invalid month",
                    &format!("\"{month}\" is not a valid month. Pick a month in the format YYYY-MM."),
                ),
            )
                .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            error if error.kind() == ErrorKind::NotFound => NotFoundError.into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::Value;

    use super::{Error, ErrorKind};

    async fn json_body(error: Error) -> (StatusCode, Value) {
        let response = error.into_json_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let (status, body) = json_body(Error::DeleteMissingFixedExpense).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("fixed expense"));
    }

    #[tokio::test]
    async fn validation_errors_are_unprocessable() {
        let (status, body) = json_body(Error::InvalidAmount("\"abc\"".to_owned())).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid amount: \"abc\"");
    }

    #[tokio::test]
    async fn lock_errors_are_store_unavailable() {
        let (status, body) = json_body(Error::DatabaseLockError).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn sql_errors_do_not_leak_details() {
        let (status, body) = json_body(Error::SqlError(rusqlite::Error::InvalidQuery)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"].as_str().unwrap().contains("SQL"));
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        let error = Error::from(rusqlite::Error::QueryReturnedNoRows);

        assert_eq!(error, Error::NotFound);
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }
}
