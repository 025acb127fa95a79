use uuid::Uuid;

/// Insert payload for `users`. `password_hash` is None for federated
/// accounts, which have no usable password credential.
#[derive(Debug, Clone)]
pub struct UserInsert {
    pub username: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email_verified: bool,
}

/// Allow-listed profile fields; None leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RefreshTokenInsert {
    pub jti: Uuid,
    pub user_id: Uuid,
    pub expires_at: chrono::NaiveDateTime,
}
