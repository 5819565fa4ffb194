//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    dashboard::get_dashboard_page,
    endpoints,
    fixed_expense::{
        create_fixed_expense_endpoint, delete_fixed_expense_endpoint,
        edit_fixed_expense_endpoint, list_fixed_expenses_endpoint,
    },
    internal_server_error::get_internal_server_error_page,
    market_purchase::{
        create_market_purchase_endpoint, delete_market_purchase_endpoint,
        edit_market_purchase_endpoint, list_market_purchases_endpoint,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let api_routes = Router::new()
        .route(
            endpoints::FIXED_EXPENSES,
            get(list_fixed_expenses_endpoint).post(create_fixed_expense_endpoint),
        )
        .route(
            endpoints::FIXED_EXPENSE,
            put(edit_fixed_expense_endpoint).delete(delete_fixed_expense_endpoint),
        )
        .route(
            endpoints::MARKET_PURCHASES,
            get(list_market_purchases_endpoint).post(create_market_purchase_endpoint),
        )
        .route(
            endpoints::MARKET_PURCHASE,
            put(edit_market_purchase_endpoint).delete(delete_market_purchase_endpoint),
        );

    page_routes
        .merge(api_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }
}
