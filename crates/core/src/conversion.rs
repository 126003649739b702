//! Token price table and conversion arithmetic.
//!
//! Prices are quoted in USD. Converting `amount` of token A into token B
//! uses the cross rate `price(A) / price(B)`.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Price list shipped with the binary.
const BUILTIN_PRICES: &str = include_str!("../data/prices.json");

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Enter a valid amount.")]
    InvalidAmount,

    #[error("Price data not available for selected tokens.")]
    PriceUnavailable { from: String, to: String },

    #[error("Invalid price for {currency}: must be a positive number")]
    InvalidPrice { currency: String },

    #[error("Price table is empty")]
    EmptyTable,

    #[error("Failed to parse price table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read price table: {0}")]
    Io(#[from] std::io::Error),
}

/// One entry of the price table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPrice {
    pub currency: String,
    pub price: f64,
}

/// Result of a single conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub rate: f64,
    pub output: f64,
}

impl Conversion {
    /// Output rendered with four decimal places. Exact halfway values round
    /// away from zero.
    pub fn formatted_output(&self) -> String {
        to_fixed_4(self.output)
    }
}

/// 2^53: beyond this `value * 32` is no longer tracked as an exact integer.
const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;

/// `{:.4}` rounds ties to even. A finite `f64` sits exactly halfway between
/// two four-decimal values only when `value * 32` is an odd integer, so
/// those values are rounded by hand and everything else goes to `{:.4}`.
fn to_fixed_4(value: f64) -> String {
    let scaled = value * 32.0;
    if scaled.fract() != 0.0 || scaled.abs() >= EXACT_INT_LIMIT || scaled % 2.0 == 0.0 {
        return format!("{value:.4}");
    }

    // value = j / 32 with j odd, i.e. 625j / 2 units of 1e-4.
    let j = scaled.abs() as i64;
    let units = (625 * j + 1) / 2;
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}.{:04}", units / 10_000, units % 10_000)
}

/// Lookup table from token symbol to USD price.
///
/// Keeps the order in which tokens were first listed so clients can render
/// selectors deterministically.
#[derive(Debug, Clone)]
pub struct PriceTable {
    tokens: Vec<TokenPrice>,
    index: HashMap<String, usize>,
}

impl PriceTable {
    /// Build a table from raw entries.
    ///
    /// A currency listed twice keeps its first position and takes the last
    /// price. Symbols are case-sensitive (`ETH` and `wstETH` are unrelated).
    pub fn from_entries(entries: Vec<TokenPrice>) -> Result<Self, ConversionError> {
        let mut tokens: Vec<TokenPrice> = Vec::with_capacity(entries.len());
        let mut index = HashMap::with_capacity(entries.len());

        for entry in entries {
            if !entry.price.is_finite() || entry.price <= 0.0 {
                return Err(ConversionError::InvalidPrice {
                    currency: entry.currency,
                });
            }
            match index.get(&entry.currency) {
                Some(&pos) => tokens[pos] = entry,
                None => {
                    index.insert(entry.currency.clone(), tokens.len());
                    tokens.push(entry);
                }
            }
        }

        if tokens.is_empty() {
            return Err(ConversionError::EmptyTable);
        }

        Ok(Self { tokens, index })
    }

    /// Parse a JSON array of `{currency, price}` objects.
    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        let entries: Vec<TokenPrice> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConversionError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn builtin() -> Result<Self, ConversionError> {
        Self::from_json(BUILTIN_PRICES)
    }

    pub fn tokens(&self) -> &[TokenPrice] {
        &self.tokens
    }

    pub fn price(&self, currency: &str) -> Option<f64> {
        self.index.get(currency).map(|&pos| self.tokens[pos].price)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Convert `amount` units of `from` into `to`.
    ///
    /// The amount is checked first, then identical tokens short-circuit
    /// with a rate of 1 (even for symbols absent from the table), and only
    /// then are both prices looked up.
    pub fn convert(&self, from: &str, to: &str, amount: f64) -> Result<Conversion, ConversionError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ConversionError::InvalidAmount);
        }

        let rate = if from == to {
            1.0
        } else {
            match (self.price(from), self.price(to)) {
                (Some(from_price), Some(to_price)) => from_price / to_price,
                _ => {
                    return Err(ConversionError::PriceUnavailable {
                        from: from.to_string(),
                        to: to.to_string(),
                    })
                }
            }
        };

        Ok(Conversion {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            rate,
            output: amount * rate,
        })
    }
}
