use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Association between one user and one stock.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Portfolio {
    pub id: Uuid,
    pub user_id: Uuid,
    pub stock_id: Uuid,
}
