use chrono::NaiveDateTime;
use uuid::Uuid;

/// Server-side record of an issued refresh token. Consumed (revoked) on
/// rotation so a refresh token can only be redeemed once.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshToken {
    pub jti: Uuid,
    pub user_id: Uuid,
    pub expires_at: NaiveDateTime,
    pub revoked: bool,
    pub created_at: NaiveDateTime,
}
