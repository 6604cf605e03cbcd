use serde::{Deserialize, Serialize};

/// One commodity price row extracted from the market ticker page. All string
/// fields are non-empty and both prices positive; rows that fail either
/// check are dropped during parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPrice {
    pub commodity: String,
    pub variety: String,
    pub max_price: f64,
    pub min_price: f64,
    pub date: String,
}
