//! Itemised lists of the selected month's records.

use maud::{Markup, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    dashboard::aggregation::expense_type_label,
    fixed_expense::FixedExpense,
    html::{CARD_STYLE, LIST_ITEM_STYLE, format_currency},
    market_purchase::MarketPurchase,
};

/// The max number of graphemes of a description to show before truncating
/// and displaying ellipses.
const MAX_DESCRIPTION_GRAPHEMES: usize = 40;

const DAY_MONTH_FORMAT: &[BorrowedFormatItem] = format_description!("[day]/[month]");

fn format_day_month(date: Date) -> String {
    date.format(DAY_MONTH_FORMAT).unwrap_or_else(|error| {
        tracing::error!("Could not format date {date}: {error}");
        date.to_string()
    })
}

/// Shorten long descriptions, returning the full text as a tooltip when cut.
fn format_description(description: &str) -> (String, Option<&str>) {
    let description_length = description.graphemes(true).count();

    if description_length <= MAX_DESCRIPTION_GRAPHEMES {
        (description.to_owned(), None)
    } else {
        let truncated: String = description
            .graphemes(true)
            .take(MAX_DESCRIPTION_GRAPHEMES - 3)
            .collect();

        (format!("{truncated}..."), Some(description))
    }
}

fn list_section(id: &str, title: &str, empty_message: &str, items: &[Markup]) -> Markup {
    html! {
        section id=(id) class={ (CARD_STYLE) " w-full" }
        {
            h3 class="text-xl font-semibold mb-4" { (title) }

            @if items.is_empty() {
                p data-empty-state class="text-gray-600 dark:text-gray-400" { (empty_message) }
            } @else {
                ul
                {
                    @for item in items {
                        (item)
                    }
                }
            }
        }
    }
}

pub(super) fn fixed_expense_list(expenses: &[&FixedExpense]) -> Markup {
    let items: Vec<Markup> = expenses
        .iter()
        .map(|expense| {
            let description = expense.description.as_deref().map(format_description);

            html! {
                li class=(LIST_ITEM_STYLE)
                {
                    div
                    {
                        span data-item-label
                        {
                            (expense_type_label(&expense.expense_type))
                            " - "
                            (format_day_month(expense.due_date))
                        }

                        @if let Some((text, tooltip)) = description {
                            p class="text-sm text-gray-600 dark:text-gray-400" title=[tooltip] { (text) }
                        }
                    }

                    span data-item-amount class="font-medium whitespace-nowrap"
                    {
                        (format_currency(expense.amount))
                    }
                }
            }
        })
        .collect();

    list_section(
        "fixed-expense-list",
        "Fixed Expenses",
        "No fixed expenses for this month.",
        &items,
    )
}

pub(super) fn market_purchase_list(purchases: &[&MarketPurchase]) -> Markup {
    let items: Vec<Markup> = purchases
        .iter()
        .map(|purchase| {
            html! {
                li class=(LIST_ITEM_STYLE)
                {
                    span data-item-label { (format_day_month(purchase.date)) }
                    span data-item-amount class="font-medium whitespace-nowrap"
                    {
                        (format_currency(purchase.total_amount))
                    }
                }
            }
        })
        .collect();

    list_section(
        "market-purchase-list",
        "Market Purchases",
        "No market purchases for this month.",
        &items,
    )
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{MAX_DESCRIPTION_GRAPHEMES, format_day_month, format_description};

    #[test]
    fn formats_day_then_month() {
        assert_eq!(format_day_month(date!(2024 - 06 - 05)), "05/06");
    }

    #[test]
    fn short_descriptions_are_kept() {
        assert_eq!(format_description("June bill"), ("June bill".to_owned(), None));
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let description = "ã".repeat(MAX_DESCRIPTION_GRAPHEMES + 1);

        let (text, tooltip) = format_description(&description);

        assert!(text.ends_with("..."));
        assert_eq!(text.chars().count(), MAX_DESCRIPTION_GRAPHEMES);
        assert_eq!(tooltip, Some(description.as_str()));
    }
}
