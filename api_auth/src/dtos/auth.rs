use chrono::NaiveDateTime;
use db::models::user::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Access/refresh pair. Field names match what SimpleJWT-era clients expect.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Deserialize)]
pub struct GoogleTokenRequest {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordConfirmRequest {
    pub uid: String,
    pub token: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdateRequest {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Identity claims obtained from Google, by either the tokeninfo check or
/// the userinfo endpoint.
#[derive(Debug, Clone)]
pub struct GoogleUserData {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Public projection of a user record.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub email_verified: bool,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_requires_all_fields() {
        let missing_password = serde_json::json!({
            "username": "newuser",
            "email": "newuser@example.com"
        });
        assert!(serde_json::from_value::<RegisterRequest>(missing_password).is_err());
    }

    #[test]
    fn token_pair_uses_simplejwt_field_names() {
        let pair = TokenPairResponse {
            access: "a".to_string(),
            refresh: "r".to_string(),
        };
        let value = serde_json::to_value(&pair).unwrap();
        assert_eq!(value["access"], "a");
        assert_eq!(value["refresh"], "r");
    }

    #[test]
    fn user_response_drops_credentials() {
        let user = User {
            id: Uuid::new_v4(),
            username: "newuser".to_string(),
            email: "newuser@example.com".to_string(),
            password_hash: Some("$argon2id$...".to_string()),
            first_name: String::new(),
            last_name: String::new(),
            email_verified: false,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        };
        let value = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["username"], "newuser");
    }
}
