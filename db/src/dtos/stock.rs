use bigdecimal::BigDecimal;
use serde::Deserialize;

/// Full stock payload, used for both create and full update.
#[derive(Debug, Clone, Deserialize)]
pub struct StockData {
    pub symbol: String,
    pub company_name: String,
    pub purchase: BigDecimal,
    pub last_div: BigDecimal,
    pub industry: String,
    pub market_cap: i64,
}

/// Partial stock payload; None leaves the column untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockPatch {
    pub symbol: Option<String>,
    pub company_name: Option<String>,
    pub purchase: Option<BigDecimal>,
    pub last_div: Option<BigDecimal>,
    pub industry: Option<String>,
    pub market_cap: Option<i64>,
}
