use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Stock {
    pub id: Uuid,
    pub symbol: String,
    pub company_name: String,
    pub purchase: BigDecimal,
    pub last_div: BigDecimal,
    pub industry: String,
    pub market_cap: i64,
}
