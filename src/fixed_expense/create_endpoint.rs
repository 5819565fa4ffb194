//! Defines the endpoint for creating a fixed expense.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    fixed_expense::{FixedExpenseState, create_fixed_expense, payload::FixedExpensePayload},
};

/// A route handler for creating a fixed expense, responds with the new expense as JSON.
pub async fn create_fixed_expense_endpoint(
    State(state): State<FixedExpenseState>,
    payload: Result<Json<FixedExpensePayload>, JsonRejection>,
) -> Response {
    let expense = match payload {
        Ok(Json(payload)) => payload.validate(),
        Err(rejection) => Err(Error::InvalidPayload(rejection.body_text())),
    };

    let expense = match expense {
        Ok(expense) => expense,
        Err(error) => {
            tracing::debug!("Rejected new fixed expense: {error}");
            return error.into_json_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match create_fixed_expense(&expense, &connection) {
        Ok(expense) => (StatusCode::CREATED, Json(expense)).into_response(),
        Err(error) => {
            tracing::error!("Could not create fixed expense {expense:?}: {error}");
            error.into_json_response()
        }
    }
}
