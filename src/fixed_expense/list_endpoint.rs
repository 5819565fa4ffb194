//! Defines the endpoint for listing fixed expenses.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    fixed_expense::{FixedExpenseState, get_all_fixed_expenses},
};

/// A route handler that responds with every fixed expense as a JSON array.
pub async fn list_fixed_expenses_endpoint(State(state): State<FixedExpenseState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match get_all_fixed_expenses(&connection) {
        Ok(expenses) => Json(expenses).into_response(),
        Err(error) => {
            tracing::error!("Could not get fixed expenses: {error}");
            error.into_json_response()
        }
    }
}
