//! Defines the endpoint for recording a market purchase.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    market_purchase::{MarketPurchaseState, create_market_purchase, payload::MarketPurchasePayload},
};

pub async fn create_market_purchase_endpoint(
    State(state): State<MarketPurchaseState>,
    payload: Result<Json<MarketPurchasePayload>, JsonRejection>,
) -> Response {
    let purchase = match payload {
        Ok(Json(payload)) => payload.validate(),
        Err(rejection) => Err(Error::InvalidPayload(rejection.body_text())),
    };

    let purchase = match purchase {
        Ok(purchase) => purchase,
        Err(error) => {
            tracing::debug!("Rejected new market purchase: {error}");
            return error.into_json_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match create_market_purchase(&purchase, &connection) {
        Ok(purchase) => (StatusCode::CREATED, Json(purchase)).into_response(),
        Err(error) => {
            tracing::error!("Could not create market purchase {purchase:?}: {error}");
            error.into_json_response()
        }
    }
}
