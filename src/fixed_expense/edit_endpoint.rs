//! Defines the endpoint for updating a fixed expense.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    fixed_expense::{
        FixedExpenseId, FixedExpenseState,
        core::{get_fixed_expense, update_fixed_expense},
        payload::FixedExpensePayload,
    },
};

/// A route handler for replacing the fields of a fixed expense.
///
/// Responds with the updated expense as JSON, or `{"error": ...}` with a
/// status code that tells validation failures, missing expenses, and store
/// failures apart.
pub async fn edit_fixed_expense_endpoint(
    State(state): State<FixedExpenseState>,
    expense_id: Result<Path<FixedExpenseId>, PathRejection>,
    payload: Result<Json<FixedExpensePayload>, JsonRejection>,
) -> Response {
    let Ok(Path(expense_id)) = expense_id else {
        return Error::UpdateMissingFixedExpense.into_json_response();
    };

    let expense = match payload {
        Ok(Json(payload)) => payload.validate(),
        Err(rejection) => Err(Error::InvalidPayload(rejection.body_text())),
    };

    let expense = match expense {
        Ok(expense) => expense,
        Err(error) => {
            tracing::debug!("Rejected update for fixed expense {expense_id}: {error}");
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

    match update_fixed_expense(expense_id, &expense, &connection) {
        Ok(0) => Error::UpdateMissingFixedExpense.into_json_response(),
        Ok(_) => match get_fixed_expense(expense_id, &connection) {
            Ok(expense) => Json(expense).into_response(),
            Err(error) => {
                tracing::error!("Could not read back fixed expense {expense_id}: {error}");
                error.into_json_response()
            }
        },
        Err(error) => {
            tracing::error!("Could not update fixed expense {expense_id}: {error}");
            error.into_json_response()
        }
    }
}
