//! The summary cards at the top of the dashboard.

use maud::{Markup, html};

use crate::{
    dashboard::aggregation::MonthlySummary,
    html::{CARD_STYLE, format_currency},
};

fn summary_card(id: &str, title: &str, value: &str) -> Markup {
    html! {
        div id=(id) class=(CARD_STYLE)
        {
            h4 class="text-sm font-medium text-gray-600 dark:text-gray-400 mb-2" { (title) }
            div data-value class="text-2xl lg:text-3xl font-bold" { (value) }
        }
    }
}

pub(super) fn summary_cards_view(summary: &MonthlySummary) -> Markup {
    html! {
        section
            id="summary-cards"
            class="w-full grid grid-cols-2 lg:grid-cols-4 gap-4 mb-4"
        {
            (summary_card("total-expenses", "Total Expenses", &format_currency(summary.total_expenses)))
            (summary_card("fixed-expenses-total", "Fixed Expenses", &format_currency(summary.total_fixed_expenses)))
            (summary_card("market-purchases-total", "Market Purchases", &format_currency(summary.total_market_purchases)))
            (summary_card("purchase-count", "Purchases", &summary.purchase_count.to_string()))
        }
    }
}
