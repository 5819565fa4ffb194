//! Fixed monthly expenses such as rent and utilities.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod list_endpoint;
mod payload;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use core::{
    FixedExpense, FixedExpenseId, NewFixedExpense, create_fixed_expense,
    create_fixed_expense_table, get_all_fixed_expenses,
};
pub use create_endpoint::create_fixed_expense_endpoint;
pub use delete_endpoint::delete_fixed_expense_endpoint;
pub use edit_endpoint::edit_fixed_expense_endpoint;
pub use list_endpoint::list_fixed_expenses_endpoint;

#[cfg(test)]
pub(crate) use core::new_test_expense;

/// The state needed by the fixed expense endpoints.
#[derive(Debug, Clone)]
pub struct FixedExpenseState {
    /// The database connection for managing fixed expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for FixedExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
