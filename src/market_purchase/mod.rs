//! One-off market (grocery) purchases.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod list_endpoint;
mod payload;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

pub use core::{
    MarketPurchase, MarketPurchaseId, NewMarketPurchase, create_market_purchase,
    create_market_purchase_table, get_all_market_purchases,
};
pub use create_endpoint::create_market_purchase_endpoint;
pub use delete_endpoint::delete_market_purchase_endpoint;
pub use edit_endpoint::edit_market_purchase_endpoint;
pub use list_endpoint::list_market_purchases_endpoint;

/// The state needed by the market purchase endpoints.
#[derive(Debug, Clone)]
pub struct MarketPurchaseState {
    /// The database connection for managing market purchases.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for MarketPurchaseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
