//! The request body accepted when creating or updating a fixed expense.

use serde::Deserialize;
use time::Date;

use crate::{Error, amount::AmountInput, fixed_expense::NewFixedExpense, iso_date};

/// A fixed expense as sent by a client.
///
/// Every field is replaced on update. Omitting `paid` marks the expense as
/// unpaid and omitting `paidDate` clears the paid date.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpensePayload {
    #[serde(rename = "type")]
    pub expense_type: String,
    pub amount: AmountInput,
    #[serde(with = "iso_date")]
    pub due_date: Date,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub paid: Option<bool>,
    #[serde(default, with = "iso_date::option")]
    pub paid_date: Option<Date>,
}

impl FixedExpensePayload {
    /// Check the payload and convert it into the fields to store.
    ///
    /// # Errors
    /// Returns [Error::EmptyExpenseType] if the type is blank, or
    /// [Error::InvalidAmount] if the amount is not a finite, non-negative number.
    pub fn validate(self) -> Result<NewFixedExpense, Error> {
        let expense_type = self.expense_type.trim();

        if expense_type.is_empty() {
            return Err(Error::EmptyExpenseType);
        }

        let amount = self.amount.parse()?;

        let description = self
            .description
            .map(|description| description.trim().to_owned())
            .filter(|description| !description.is_empty());

        Ok(NewFixedExpense {
            expense_type: expense_type.to_owned(),
            amount,
            due_date: self.due_date,
            paid: self.paid.unwrap_or(false),
            paid_date: self.paid_date,
            description,
        })
    }
}
