//! Derives the monthly figures shown on the dashboard.
//!
//! Everything here is a pure function of the records passed in. The
//! dashboard loads every record once and then filters and sums in memory.

use crate::{fixed_expense::FixedExpense, market_purchase::MarketPurchase, month::MonthKey};

/// How many months the expense history chart covers.
pub(super) const SERIES_LENGTH: usize = 6;

/// A record that belongs to exactly one calendar month.
pub(super) trait InMonth {
    fn month(&self) -> MonthKey;
}

impl InMonth for FixedExpense {
    fn month(&self) -> MonthKey {
        self.month
    }
}

impl InMonth for MarketPurchase {
    fn month(&self) -> MonthKey {
        self.month
    }
}

/// Keep the records that fall in `month`, preserving their order.
pub(super) fn filter_by_month<'a, T, I>(records: I, month: MonthKey) -> Vec<&'a T>
where
    T: InMonth + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .filter(|record| record.month() == month)
        .collect()
}

/// The totals for a single month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct MonthlySummary {
    pub total_fixed_expenses: f64,
    pub total_market_purchases: f64,
    pub total_expenses: f64,
    pub purchase_count: usize,
}

pub(super) fn summarize(expenses: &[&FixedExpense], purchases: &[&MarketPurchase]) -> MonthlySummary {
    let total_fixed_expenses = expenses.iter().map(|expense| expense.amount).sum::<f64>();
    let total_market_purchases = purchases
        .iter()
        .map(|purchase| purchase.total_amount)
        .sum::<f64>();

    MonthlySummary {
        total_fixed_expenses,
        total_market_purchases,
        total_expenses: total_fixed_expenses + total_market_purchases,
        purchase_count: purchases.len(),
    }
}

/// The display name for an expense type code.
///
/// Codes without a translation are shown as they are, so new types can be
/// added without touching this table.
pub fn expense_type_label(code: &str) -> &str {
    match code {
        "aluguel" => "Aluguel",
        "luz" => "Luz",
        "agua" => "Água",
        "internet" => "Internet",
        other => other,
    }
}

/// The sum of one type of fixed expense.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct CategoryTotal {
    pub label: String,
    pub total: f64,
}

/// Group `expenses` by type in the order each type first appears.
pub(super) fn expenses_by_type(expenses: &[&FixedExpense]) -> Vec<CategoryTotal> {
    let mut codes: Vec<&str> = Vec::new();
    let mut totals: Vec<f64> = Vec::new();

    for expense in expenses {
        match codes.iter().position(|code| *code == expense.expense_type) {
            Some(index) => totals[index] += expense.amount,
            None => {
                codes.push(&expense.expense_type);
                totals.push(expense.amount);
            }
        }
    }

    codes
        .into_iter()
        .zip(totals)
        .map(|(code, total)| CategoryTotal {
            label: expense_type_label(code).to_owned(),
            total,
        })
        .collect()
}

/// The fixed and market totals for one month of the history chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct MonthlyTotals {
    pub month: MonthKey,
    pub fixed_expenses: f64,
    pub market_purchases: f64,
}

/// Totals for the [SERIES_LENGTH] months ending at `selected`, oldest first.
///
/// Takes the full, unfiltered history so that every month in the window
/// is populated.
pub(super) fn six_month_series(
    selected: MonthKey,
    expenses: &[FixedExpense],
    purchases: &[MarketPurchase],
) -> Vec<MonthlyTotals> {
    selected
        .trailing(SERIES_LENGTH)
        .into_iter()
        .map(|month| MonthlyTotals {
            month,
            fixed_expenses: filter_by_month(expenses, month)
                .iter()
                .map(|expense| expense.amount)
                .sum(),
            market_purchases: filter_by_month(purchases, month)
                .iter()
                .map(|purchase| purchase.total_amount)
                .sum(),
        })
        .collect()
}
