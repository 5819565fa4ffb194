//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard, either as a full page
//!   or as the content fragment requested by the month selector
//! - HTML view functions for rendering the dashboard UI
//! - State and query types used by the handler

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use axum_htmx::{HxHistoryRestoreRequest, HxRequest};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{
            MonthlySummary, expenses_by_type, filter_by_month, six_month_series, summarize,
        },
        cards::summary_cards_view,
        charts::{DashboardChart, charts_view, expense_history_chart, expenses_by_type_chart},
        lists::{fixed_expense_list, market_purchase_list},
    },
    endpoints,
    fixed_expense::{FixedExpense, get_all_fixed_expenses},
    html::{
        FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base,
        loading_spinner,
    },
    market_purchase::{MarketPurchase, get_all_market_purchases},
    month::MonthKey,
    timezone::get_local_date,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading expenses and purchases.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query string accepted by the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// The month to show as `YYYY-MM`, defaults to the current month.
    pub month: Option<String>,
}

/// Holds all the data needed to render the dashboard content.
struct DashboardData {
    month: MonthKey,
    load_failed: bool,
    summary: MonthlySummary,
    charts: [DashboardChart; 2],
    fixed_expense_list: Markup,
    market_purchase_list: Markup,
}

/// Display the overview for a month.
///
/// Requests made by the month selector (HTMX requests) only receive the
/// dashboard content so the selector and the rest of the page stay put.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    HxRequest(is_htmx_request): HxRequest,
    HxHistoryRestoreRequest(is_history_restore): HxHistoryRestoreRequest,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let month = selected_month(query.month.as_deref(), &state.local_timezone)?;

    let (expenses, purchases, load_failed) = match load_records(&state.db_connection) {
        Ok((expenses, purchases)) => (expenses, purchases, false),
        Err(error) => {
            tracing::error!("Could not load records for the dashboard: {error}");
            (Vec::new(), Vec::new(), true)
        }
    };

    let data = build_dashboard_data(month, &expenses, &purchases, load_failed);

    if is_htmx_request && !is_history_restore {
        Ok(dashboard_content(&data).into_response())
    } else {
        Ok(dashboard_view(&data).into_response())
    }
}

/// Parse the requested month, falling back to the current local month.
fn selected_month(month: Option<&str>, local_timezone: &str) -> Result<MonthKey, Error> {
    match month.map(str::trim) {
        Some(month) if !month.is_empty() => month.parse(),
        _ => {
            let today = get_local_date(local_timezone).ok_or_else(|| {
                tracing::error!("Invalid timezone {}", local_timezone);
                Error::InvalidTimezoneError(local_timezone.to_owned())
            })?;

            Ok(MonthKey::from_date(today))
        }
    }
}

/// Fetch every fixed expense and market purchase.
///
/// Month filtering happens in memory since the history chart needs records
/// from outside the selected month.
fn load_records(
    db_connection: &Mutex<Connection>,
) -> Result<(Vec<FixedExpense>, Vec<MarketPurchase>), Error> {
    let connection = db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = get_all_fixed_expenses(&connection)?;
    let purchases = get_all_market_purchases(&connection)?;

    Ok((expenses, purchases))
}

fn build_dashboard_data(
    month: MonthKey,
    expenses: &[FixedExpense],
    purchases: &[MarketPurchase],
    load_failed: bool,
) -> DashboardData {
    let month_expenses = filter_by_month(expenses, month);
    let month_purchases = filter_by_month(purchases, month);

    let summary = summarize(&month_expenses, &month_purchases);
    let breakdown = expenses_by_type(&month_expenses);
    let series = six_month_series(month, expenses, purchases);

    let charts = [
        DashboardChart {
            id: "expenses-by-type-chart",
            options: expenses_by_type_chart(&breakdown).to_string(),
        },
        DashboardChart {
            id: "expense-history-chart",
            options: expense_history_chart(&series).to_string(),
        },
    ];

    DashboardData {
        month,
        load_failed,
        summary,
        charts,
        fixed_expense_list: fixed_expense_list(&month_expenses),
        market_purchase_list: market_purchase_list(&month_purchases),
    }
}

fn month_selector(month: MonthKey) -> Markup {
    html!(
        form
            id="month-selector"
            hx-get=(endpoints::DASHBOARD_VIEW)
            hx-target="#dashboard-content"
            hx-swap="outerHTML"
            hx-trigger="change"
            hx-sync="this:replace"
            hx-push-url="true"
            hx-indicator="#indicator"
            class="flex items-end gap-3 mb-6"
        {
            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                input
                    type="month"
                    id="month"
                    name="month"
                    value=(month.to_string())
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            span id="indicator" class="htmx-indicator mb-2"
            {
                (loading_spinner())
                "Loading..."
            }
        }
    )
}

fn load_error_banner() -> Markup {
    html!(
        div
            id="load-error"
            role="alert"
            class="w-full p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50
                dark:bg-gray-800 dark:text-red-400"
        {
            "Could not load your records, the figures below may be incomplete. "
            "Check the server logs for more details."
        }
    )
}

/// Renders the dashboard content that is swapped when the month changes.
///
/// `data-month` records which month the content was rendered for.
fn dashboard_content(data: &DashboardData) -> Markup {
    html!(
        div
            id="dashboard-content"
            data-month=(data.month.to_string())
            class="w-full"
        {
            @if data.load_failed {
                (load_error_banner())
            }

            (summary_cards_view(&data.summary))

            (charts_view(&data.charts))

            div class="grid grid-cols-1 lg:grid-cols-2 gap-4"
            {
                (data.fixed_expense_list)
                (data.market_purchase_list)
            }
        }
    )
}

/// Renders the full dashboard page.
fn dashboard_view(data: &DashboardData) -> Markup {
    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="self-start text-2xl font-bold mb-4" { "Household Ledger" }

            div class="self-start"
            {
                (month_selector(data.month))
            }

            (dashboard_content(data))
        }
    );

    let scripts = [HeadElement::ScriptLink(
        "/static/echarts.6.0.0.min.js".to_owned(),
    )];

    base("Dashboard", &scripts, &content)
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Query, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_htmx::{HxHistoryRestoreRequest, HxRequest};
    use scraper::{Html, Selector};
    use time::{OffsetDateTime, macros::date};

    use crate::{
        fixed_expense::{create_fixed_expense, new_test_expense},
        html::format_currency,
        market_purchase::{NewMarketPurchase, create_market_purchase},
        month::MonthKey,
        test_utils::{
            assert_content_type, assert_status_ok, assert_valid_html,
            must_create_test_connection, parse_html_document, parse_html_fragment, select_text,
        },
    };

    use super::{DashboardQuery, DashboardState, get_dashboard_page};

    fn get_state() -> DashboardState {
        DashboardState {
            db_connection: must_create_test_connection(),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn month_query(month: &str) -> Query<DashboardQuery> {
        Query(DashboardQuery {
            month: Some(month.to_owned()),
        })
    }

    async fn get_page(state: DashboardState, query: Query<DashboardQuery>) -> Html {
        let response = get_dashboard_page(
            State(state),
            HxRequest(false),
            HxHistoryRestoreRequest(false),
            query,
        )
        .await
        .into_response();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        parse_html_document(response).await
    }

    #[track_caller]
    fn card_value(html: &Html, card_id: &str) -> String {
        let values = select_text(html, &format!("#{card_id} [data-value]"));
        assert_eq!(values.len(), 1, "want one value for card {card_id}");
        values[0].clone()
    }

    #[tokio::test]
    async fn empty_month_shows_zeros_and_empty_states() {
        let state = get_state();

        let html = get_page(state, month_query("2024-06")).await;

        assert_valid_html(&html);
        let zero = format_currency(0.0);
        assert_eq!(card_value(&html, "total-expenses"), zero);
        assert_eq!(card_value(&html, "fixed-expenses-total"), zero);
        assert_eq!(card_value(&html, "market-purchases-total"), zero);
        assert_eq!(card_value(&html, "purchase-count"), "0");
        assert_eq!(select_text(&html, "[data-empty-state]").len(), 2);
        assert!(select_text(&html, "#load-error").is_empty());
    }

    #[tokio::test]
    async fn rent_only_month() {
        let state = get_state();
        create_fixed_expense(
            &new_test_expense("aluguel", 1200.0, date!(2024 - 06 - 05)),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let html = get_page(state, month_query("2024-06")).await;

        assert_eq!(card_value(&html, "total-expenses"), format_currency(1200.0));
        assert_eq!(card_value(&html, "fixed-expenses-total"), format_currency(1200.0));
        assert_eq!(card_value(&html, "market-purchases-total"), format_currency(0.0));
        assert_eq!(
            select_text(&html, "#fixed-expense-list [data-item-label]"),
            ["Aluguel - 05/06"]
        );
        assert_eq!(
            select_text(&html, "#market-purchase-list [data-empty-state]").len(),
            1
        );
        let script = select_text(&html, "#dashboard-content script").join("");
        assert!(script.contains("Aluguel"));
    }

    #[tokio::test]
    async fn lists_only_selected_month_in_insertion_order() {
        let state = get_state();
        {
            let connection = state.db_connection.lock().unwrap();
            for (expense_type, due_date) in [
                ("internet", date!(2024 - 06 - 20)),
                ("luz", date!(2024 - 05 - 10)),
                ("agua", date!(2024 - 06 - 12)),
                ("gas", date!(2024 - 06 - 01)),
            ] {
                create_fixed_expense(&new_test_expense(expense_type, 50.0, due_date), &connection)
                    .unwrap();
            }
            for (total_amount, date) in [
                (120.0, date!(2024 - 06 - 30)),
                (80.0, date!(2024 - 07 - 01)),
                (45.5, date!(2024 - 06 - 02)),
            ] {
                create_market_purchase(&NewMarketPurchase { total_amount, date }, &connection)
                    .unwrap();
            }
        }

        let html = get_page(state, month_query("2024-06")).await;

        assert_eq!(
            select_text(&html, "#fixed-expense-list [data-item-label]"),
            ["Internet - 20/06", "Água - 12/06", "gas - 01/06"]
        );
        assert_eq!(
            select_text(&html, "#market-purchase-list [data-item-label]"),
            ["30/06", "02/06"]
        );
        assert_eq!(card_value(&html, "purchase-count"), "2");
        assert_eq!(
            card_value(&html, "market-purchases-total"),
            format_currency(165.5)
        );
        assert_eq!(card_value(&html, "total-expenses"), format_currency(315.5));
    }

    #[tokio::test]
    async fn full_page_has_month_selector() {
        let html = get_page(get_state(), month_query("2024-06")).await;

        let form = html
            .select(&Selector::parse("form#month-selector").unwrap())
            .next()
            .expect("month selector missing");
        assert_eq!(form.value().attr("hx-get"), Some("/dashboard"));
        assert_eq!(form.value().attr("hx-sync"), Some("this:replace"));
        assert_eq!(form.value().attr("hx-target"), Some("#dashboard-content"));
        let input = html
            .select(&Selector::parse("input#month").unwrap())
            .next()
            .expect("month input missing");
        assert_eq!(input.value().attr("type"), Some("month"));
        assert_eq!(input.value().attr("value"), Some("2024-06"));
        assert_eq!(select_text(&html, "#indicator.htmx-indicator").len(), 1);
    }

    #[tokio::test]
    async fn htmx_request_gets_content_only() {
        let response = get_dashboard_page(
            State(get_state()),
            HxRequest(true),
            HxHistoryRestoreRequest(false),
            month_query("2025-01"),
        )
        .await
        .into_response();

        assert_status_ok(&response);
        let html = parse_html_fragment(response).await;
        assert!(select_text(&html, "form#month-selector").is_empty());
        assert!(select_text(&html, "title").is_empty());
        let content = html
            .select(&Selector::parse("#dashboard-content").unwrap())
            .next()
            .expect("dashboard content missing");
        assert_eq!(content.value().attr("data-month"), Some("2025-01"));
    }

    #[tokio::test]
    async fn history_restore_gets_full_page() {
        let response = get_dashboard_page(
            State(get_state()),
            HxRequest(true),
            HxHistoryRestoreRequest(true),
            month_query("2025-01"),
        )
        .await
        .into_response();

        let html = parse_html_document(response).await;
        assert_eq!(select_text(&html, "form#month-selector").len(), 1);
    }

    #[tokio::test]
    async fn defaults_to_current_month() {
        let html = get_page(get_state(), Query(DashboardQuery::default())).await;

        let want = MonthKey::from_date(OffsetDateTime::now_utc().date()).to_string();
        let content = html
            .select(&Selector::parse("#dashboard-content").unwrap())
            .next()
            .expect("dashboard content missing");
        assert_eq!(content.value().attr("data-month"), Some(want.as_str()));
    }

    #[tokio::test]
    async fn invalid_month_is_bad_request() {
        let response = get_dashboard_page(
            State(get_state()),
            HxRequest(false),
            HxHistoryRestoreRequest(false),
            month_query("June 2024"),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn load_failure_shows_banner_with_empty_data() {
        let state = get_state();
        state
            .db_connection
            .lock()
            .unwrap()
            .execute("DROP TABLE market_purchase", [])
            .unwrap();

        let html = get_page(state, month_query("2024-06")).await;

        assert_eq!(select_text(&html, "#load-error").len(), 1);
        assert_eq!(card_value(&html, "total-expenses"), format_currency(0.0));
        assert_eq!(select_text(&html, "[data-empty-state]").len(), 2);
    }
}
