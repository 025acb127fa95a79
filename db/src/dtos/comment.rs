use serde::Deserialize;
use uuid::Uuid;

/// Insert payload for `comments`. The author comes from the bearer claims,
/// not the request body.
#[derive(Debug, Clone)]
pub struct CommentInsert {
    pub title: String,
    pub content: String,
    pub user_id: Uuid,
    pub stock_id: Option<Uuid>,
}

/// Full update payload: title, content and the stock attachment (None
/// detaches the comment).
#[derive(Debug, Clone, Deserialize)]
pub struct CommentData {
    pub title: String,
    pub content: String,
    pub stock_id: Option<Uuid>,
}

/// Partial update payload; None leaves the column untouched. Detaching a
/// comment from its stock goes through a full update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub stock_id: Option<Uuid>,
}
