use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-authored comment, optionally attached to a stock. Deleting the
/// stock detaches the comment (stock_id goes NULL) rather than deleting it.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_on: NaiveDateTime,
    pub user_id: Uuid,
    pub stock_id: Option<Uuid>,
}
