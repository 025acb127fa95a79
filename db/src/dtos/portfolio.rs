use serde::Deserialize;
use uuid::Uuid;

/// Full portfolio payload, used for create and both update flavors.
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioData {
    pub user_id: Uuid,
    pub stock_id: Uuid,
}

/// Partial portfolio payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortfolioPatch {
    pub user_id: Option<Uuid>,
    pub stock_id: Option<Uuid>,
}
