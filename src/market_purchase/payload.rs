//! The request body accepted when creating or updating a market purchase.

use serde::Deserialize;
use time::Date;

use crate::{Error, amount::AmountInput, iso_date, market_purchase::NewMarketPurchase};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPurchasePayload {
    pub total_amount: AmountInput,
    #[serde(with = "iso_date")]
    pub date: Date,
}

impl MarketPurchasePayload {
    pub fn validate(self) -> Result<NewMarketPurchase, Error> {
        Ok(NewMarketPurchase {
            total_amount: self.total_amount.parse()?,
            date: self.date,
        })
    }
}
