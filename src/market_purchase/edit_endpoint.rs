//! Defines the endpoint for correcting a market purchase.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    market_purchase::{
        MarketPurchaseId, MarketPurchaseState,
        core::{get_market_purchase, update_market_purchase},
        payload::MarketPurchasePayload,
    },
};

/// A route handler for replacing the total and date of a market purchase.
///
/// Responds with the updated purchase, including its re-derived month and
/// year, or with `{"error": ...}`.
pub async fn edit_market_purchase_endpoint(
    State(state): State<MarketPurchaseState>,
    purchase_id: Result<Path<MarketPurchaseId>, PathRejection>,
    payload: Result<Json<MarketPurchasePayload>, JsonRejection>,
) -> Response {
    let Ok(Path(purchase_id)) = purchase_id else {
        return Error::UpdateMissingMarketPurchase.into_json_response();
    };

    let purchase = match payload {
        Ok(Json(payload)) => payload.validate(),
        Err(rejection) => Err(Error::InvalidPayload(rejection.body_text())),
    };

    let purchase = match purchase {
        Ok(purchase) => purchase,
        Err(error) => {
            tracing::debug!("Rejected update for market purchase {purchase_id}: {error}");
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

    match update_market_purchase(purchase_id, &purchase, &connection) {
        Ok(0) => Error::UpdateMissingMarketPurchase.into_json_response(),
        Ok(_) => match get_market_purchase(purchase_id, &connection) {
            Ok(purchase) => Json(purchase).into_response(),
            Err(error) => {
                tracing::error!("Could not read back market purchase {purchase_id}: {error}");
                error.into_json_response()
            }
        },
        Err(error) => {
            tracing::error!("Could not update market purchase {purchase_id}: {error}");
            error.into_json_response()
        }
    }
}
