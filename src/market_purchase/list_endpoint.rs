//! Defines the endpoint for listing market purchases.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    market_purchase::{MarketPurchaseState, get_all_market_purchases},
};

/// A route handler that responds with every market purchase as a JSON array.
pub async fn list_market_purchases_endpoint(
    State(state): State<MarketPurchaseState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match get_all_market_purchases(&connection) {
        Ok(purchases) => Json(purchases).into_response(),
        Err(error) => {
            tracing::error!("Could not get market purchases: {error}");
            error.into_json_response()
        }
    }
}
