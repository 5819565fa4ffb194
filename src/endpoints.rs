//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/fixed-expenses/{expense_id}', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The monthly overview of expenses and purchases.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to list and create fixed expenses.
pub const FIXED_EXPENSES: &str = "/api/fixed-expenses";
/// The route to update or delete a single fixed expense.
pub const FIXED_EXPENSE: &str = "/api/fixed-expenses/{expense_id}";
/// The route to list and create market purchases.
pub const MARKET_PURCHASES: &str = "/api/market-purchases";
/// The route to update or delete a single market purchase.
pub const MARKET_PURCHASE: &str = "/api/market-purchases/{purchase_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/users/{user_id}', '{user_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
