use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::DatabaseId, iso_date, month::MonthKey};

pub type FixedExpenseId = DatabaseId;

/// A recurring monthly obligation, e.g. rent or the electricity bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpense {
    /// The id for the expense.
    pub id: FixedExpenseId,
    /// The category code, e.g. "aluguel". Unknown codes are allowed.
    #[serde(rename = "type")]
    pub expense_type: String,
    /// The amount due.
    pub amount: f64,
    /// When the expense is due.
    #[serde(with = "iso_date")]
    pub due_date: Date,
    /// Whether the expense has been paid.
    pub paid: bool,
    /// When the expense was paid.
    #[serde(default, with = "iso_date::option")]
    pub paid_date: Option<Date>,
    /// Free text notes.
    pub description: Option<String>,
    /// The month of `due_date`, computed by the database.
    pub month: MonthKey,
    /// The year of `due_date`, computed by the database.
    pub year: i32,
}

/// The user editable fields of a [FixedExpense], already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFixedExpense {
    pub expense_type: String,
    pub amount: f64,
    pub due_date: Date,
    pub paid: bool,
    pub paid_date: Option<Date>,
    pub description: Option<String>,
}

/// Create the fixed expense table.
///
/// `month` and `year` are generated from `due_date` so they can never
/// disagree with it.
pub fn create_fixed_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS fixed_expense (
            id INTEGER PRIMARY KEY,
            expense_type TEXT NOT NULL,
            amount REAL NOT NULL CHECK (amount >= 0),
            due_date TEXT NOT NULL,
            paid INTEGER NOT NULL DEFAULT 0,
            paid_date TEXT,
            description TEXT,
            month TEXT GENERATED ALWAYS AS (substr(due_date, 1, 7)) VIRTUAL,
            year INTEGER GENERATED ALWAYS AS (CAST(substr(due_date, 1, 4) AS INTEGER)) VIRTUAL
        )",
    )?;

    Ok(())
}

const SELECT_FIXED_EXPENSE: &str = "SELECT id, expense_type, amount, due_date, paid, paid_date, \
    description, month, year FROM fixed_expense";

fn map_row_to_fixed_expense(row: &Row) -> Result<FixedExpense, rusqlite::Error> {
    Ok(FixedExpense {
        id: row.get(0)?,
        expense_type: row.get(1)?,
        amount: row.get(2)?,
        due_date: row.get(3)?,
        paid: row.get(4)?,
        paid_date: row.get(5)?,
        description: row.get(6)?,
        month: row.get(7)?,
        year: row.get(8)?,
    })
}

/// Insert a fixed expense and return it with its derived fields.
///
/// # Errors
/// Returns [Error::InvalidAmount] if the amount is negative, or
/// [Error::SqlError] if there is some other SQL error.
pub fn create_fixed_expense(
    expense: &NewFixedExpense,
    connection: &Connection,
) -> Result<FixedExpense, Error> {
    connection.execute(
        "INSERT INTO fixed_expense (expense_type, amount, due_date, paid, paid_date, description) \
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            expense.expense_type,
            expense.amount,
            expense.due_date,
            expense.paid,
            expense.paid_date,
            expense.description,
        ],
    )?;

    let id = connection.last_insert_rowid();

    get_fixed_expense(id, connection)
}

/// Get every fixed expense in the order they were created.
pub fn get_all_fixed_expenses(connection: &Connection) -> Result<Vec<FixedExpense>, Error> {
    connection
        .prepare(&format!("{SELECT_FIXED_EXPENSE} ORDER BY id ASC"))?
        .query_map([], map_row_to_fixed_expense)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Get a single fixed expense.
///
/// # Errors
/// Returns [Error::NotFound] if `id` does not refer to a fixed expense.
pub fn get_fixed_expense(id: FixedExpenseId, connection: &Connection) -> Result<FixedExpense, Error> {
    connection
        .query_one(
            &format!("{SELECT_FIXED_EXPENSE} WHERE id = ?1"),
            params![id],
            map_row_to_fixed_expense,
        )
        .map_err(Error::from)
}

pub(super) type RowsAffected = usize;

/// Replace the user editable fields of the fixed expense `id`.
pub(super) fn update_fixed_expense(
    id: FixedExpenseId,
    expense: &NewFixedExpense,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE fixed_expense
            SET \
                expense_type = ?1, \
                amount = ?2, \
                due_date = ?3, \
                paid = ?4, \
                paid_date = ?5, \
                description = ?6 \
            WHERE id = ?7",
            params![
                expense.expense_type,
                expense.amount,
                expense.due_date,
                expense.paid,
                expense.paid_date,
                expense.description,
                id,
            ],
        )
        .map_err(Error::from)
}

pub(super) fn delete_fixed_expense(
    id: FixedExpenseId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM fixed_expense WHERE id = :id", &[(":id", &id)])
        .map_err(Error::from)
}

#[cfg(test)]
pub(crate) fn new_test_expense(expense_type: &str, amount: f64, due_date: Date) -> NewFixedExpense {
    NewFixedExpense {
        expense_type: expense_type.to_owned(),
        amount,
        due_date,
        paid: false,
        paid_date: None,
        description: None,
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{Error, initialize_db, month::MonthKey};

    use super::{
        create_fixed_expense, delete_fixed_expense, get_all_fixed_expenses, get_fixed_expense,
        new_test_expense, update_fixed_expense,
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).unwrap();
        connection
    }

    #[test]
    fn create_derives_month_and_year() {
        let connection = get_test_connection();

        let expense = create_fixed_expense(
            &new_test_expense("aluguel", 1200.0, date!(2024 - 03 - 15)),
            &connection,
        )
        .unwrap();

        assert_eq!(expense.month, "2024-03".parse::<MonthKey>().unwrap());
        assert_eq!(expense.year, 2024);
        assert!(!expense.paid);
        assert_eq!(expense.paid_date, None);
    }

    #[test]
    fn update_rederives_month_and_year() {
        let connection = get_test_connection();
        let expense = create_fixed_expense(
            &new_test_expense("luz", 180.0, date!(2024 - 03 - 15)),
            &connection,
        )
        .unwrap();

        let mut edited = new_test_expense("luz", 180.0, date!(2024 - 07 - 02));
        update_fixed_expense(expense.id, &edited, &connection).unwrap();
        let got = get_fixed_expense(expense.id, &connection).unwrap();

        assert_eq!(got.month.to_string(), "2024-07");
        assert_eq!(got.year, 2024);

        edited.due_date = date!(2025 - 01 - 02);
        update_fixed_expense(expense.id, &edited, &connection).unwrap();
        let got = get_fixed_expense(expense.id, &connection).unwrap();

        assert_eq!(got.month.to_string(), "2025-01");
        assert_eq!(got.year, 2025);
    }

    #[test]
    fn negative_amount_violates_check() {
        let connection = get_test_connection();

        let result = create_fixed_expense(
            &new_test_expense("agua", -1.0, date!(2024 - 03 - 15)),
            &connection,
        );

        assert!(matches!(result, Err(Error::InvalidAmount(_))));
    }

    #[test]
    fn get_all_returns_insertion_order() {
        let connection = get_test_connection();
        let first = create_fixed_expense(
            &new_test_expense("internet", 99.9, date!(2024 - 06 - 20)),
            &connection,
        )
        .unwrap();
        let second = create_fixed_expense(
            &new_test_expense("aluguel", 1200.0, date!(2024 - 05 - 05)),
            &connection,
        )
        .unwrap();

        let expenses = get_all_fixed_expenses(&connection).unwrap();

        assert_eq!(expenses, vec![first, second]);
    }

    #[test]
    fn missing_expense_is_not_found() {
        let connection = get_test_connection();

        assert_eq!(get_fixed_expense(42, &connection), Err(Error::NotFound));
        assert_eq!(delete_fixed_expense(42, &connection), Ok(0));
    }
}
