use chrono::NaiveDateTime;
use uuid::Uuid;

/// A row in `users`. Deliberately not `Serialize`: the password hash never
/// leaves the process. API responses go through `dtos::user::UserResponse`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email_verified: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
