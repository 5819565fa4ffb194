//! Defines the endpoint for deleting a fixed expense.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    Error,
    fixed_expense::{FixedExpenseId, FixedExpenseState, core::delete_fixed_expense},
};

/// A route handler for deleting a fixed expense, responds with `{"message": ...}`.
///
/// Deleting an expense that does not exist is reported as not found.
pub async fn delete_fixed_expense_endpoint(
    State(state): State<FixedExpenseState>,
    expense_id: Result<Path<FixedExpenseId>, PathRejection>,
) -> Response {
    let Ok(Path(expense_id)) = expense_id else {
        return Error::DeleteMissingFixedExpense.into_json_response();
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match delete_fixed_expense(expense_id, &connection) {
        Ok(rows_affected) if rows_affected != 0 => {
            tracing::info!("Deleted fixed expense {expense_id}");
            Json(json!({ "message": "Fixed expense deleted successfully" })).into_response()
        }
        Ok(_) => Error::DeleteMissingFixedExpense.into_json_response(),
        Err(error) => {
            tracing::error!("Could not delete fixed expense {expense_id}: {error}");
            error.into_json_response()
        }
    }
}
