//! Monetary amounts as they arrive in request bodies.

use serde::Deserialize;

use crate::Error;

/// The largest amount a single record may hold.
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

/// An amount sent by a client, either as a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number, e.g. `1200.5`.
    Number(f64),
    /// A string holding a number, e.g. `"1200.50"`.
    Text(String),
}

impl AmountInput {
    /// Convert the input into a finite, non-negative amount.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the text is not a number, or if the
    /// number is negative, NaN, infinite, or larger than [MAX_AMOUNT].
    pub fn parse(&self) -> Result<f64, Error> {
        let amount = match self {
            AmountInput::Number(number) => *number,
            AmountInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidAmount(format!("\"{text}\" is not a number")))?,
        };

        if !amount.is_finite() {
            return Err(Error::InvalidAmount(format!("{amount} is not a finite number")));
        }

        if amount < 0.0 {
            return Err(Error::InvalidAmount(format!("{amount} is negative")));
        }

        if amount > MAX_AMOUNT {
            return Err(Error::InvalidAmount(format!(
                "{amount} is larger than the maximum of {MAX_AMOUNT}"
            )));
        }

        Ok(amount)
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}
