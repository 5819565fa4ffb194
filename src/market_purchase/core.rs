use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::DatabaseId, iso_date, month::MonthKey};

pub type MarketPurchaseId = DatabaseId;

/// A single trip to the market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketPurchase {
    pub id: MarketPurchaseId,
    pub total_amount: f64,
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The month of `date`, computed by the database.
    pub month: MonthKey,
    /// The year of `date`, computed by the database.
    pub year: i32,
}

/// The user editable fields of a [MarketPurchase], already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMarketPurchase {
    pub total_amount: f64,
    pub date: Date,
}

pub fn create_market_purchase_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS market_purchase (
            id INTEGER PRIMARY KEY,
            total_amount REAL NOT NULL CHECK (total_amount >= 0),
            date TEXT NOT NULL,
            month TEXT GENERATED ALWAYS AS (substr(date, 1, 7)) VIRTUAL,
            year INTEGER GENERATED ALWAYS AS (CAST(substr(date, 1, 4) AS INTEGER)) VIRTUAL
        )",
    )?;

    Ok(())
}

const SELECT_MARKET_PURCHASE: &str =
    "SELECT id, total_amount, date, month, year FROM market_purchase";

fn map_row_to_market_purchase(row: &Row) -> Result<MarketPurchase, rusqlite::Error> {
    Ok(MarketPurchase {
        id: row.get(0)?,
        total_amount: row.get(1)?,
        date: row.get(2)?,
        month: row.get(3)?,
        year: row.get(4)?,
    })
}

/// Insert a market purchase and return it with its derived fields.
pub fn create_market_purchase(
    purchase: &NewMarketPurchase,
    connection: &Connection,
) -> Result<MarketPurchase, Error> {
    connection.execute(
        "INSERT INTO market_purchase (total_amount, date) VALUES (?1, ?2)",
        params![purchase.total_amount, purchase.date],
    )?;

    get_market_purchase(connection.last_insert_rowid(), connection)
}

/// Get every market purchase in the order they were created.
pub fn get_all_market_purchases(connection: &Connection) -> Result<Vec<MarketPurchase>, Error> {
    connection
        .prepare(&format!("{SELECT_MARKET_PURCHASE} ORDER BY id ASC"))?
        .query_map([], map_row_to_market_purchase)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

pub(super) fn get_market_purchase(
    id: MarketPurchaseId,
    connection: &Connection,
) -> Result<MarketPurchase, Error> {
    connection
        .query_one(
            &format!("{SELECT_MARKET_PURCHASE} WHERE id = ?1"),
            params![id],
            map_row_to_market_purchase,
        )
        .map_err(Error::from)
}

pub(super) type RowsAffected = usize;

pub(super) fn update_market_purchase(
    id: MarketPurchaseId,
    purchase: &NewMarketPurchase,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE market_purchase SET total_amount = ?1, date = ?2 WHERE id = ?3",
            params![purchase.total_amount, purchase.date, id],
        )
        .map_err(Error::from)
}

pub(super) fn delete_market_purchase(
    id: MarketPurchaseId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM market_purchase WHERE id = :id", &[(":id", &id)])
        .map_err(Error::from)
}
