//! Defines the endpoint for deleting a market purchase.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    Error,
    market_purchase::{MarketPurchaseId, MarketPurchaseState, core::delete_market_purchase},
};

pub async fn delete_market_purchase_endpoint(
    State(state): State<MarketPurchaseState>,
    purchase_id: Result<Path<MarketPurchaseId>, PathRejection>,
) -> Response {
    let Ok(Path(purchase_id)) = purchase_id else {
        return Error::DeleteMissingMarketPurchase.into_json_response();
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match delete_market_purchase(purchase_id, &connection) {
        Ok(rows_affected) if rows_affected != 0 => {
            tracing::info!("Deleted market purchase {purchase_id}");
            Json(json!({ "message": "Market purchase deleted successfully" })).into_response()
        }
        Ok(_) => Error::DeleteMissingMarketPurchase.into_json_response(),
        Err(error) => {
            tracing::error!("Could not delete market purchase {purchase_id}: {error}");
            error.into_json_response()
        }
    }
}
