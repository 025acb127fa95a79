use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, password_hash::PasswordHasher};
use sqlx::PgPool;
use uuid::Uuid;

use common::error::{AppError, Res};
use db::{dtos::user::UserInsert, models::user::User};

use crate::dtos::auth::{GoogleUserData, RegisterRequest};
use crate::misc::username;

pub fn hash_password(password: &str) -> Res<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Inserts an unverified user with a password credential.
/// Used by registration.
pub async fn create_user_with_credentials(pool: &PgPool, req: &RegisterRequest) -> Res<User> {
    let password_hash = hash_password(&req.password)?;
    db::user::insert(
        pool,
        UserInsert {
            username: req.username.clone(),
            email: req.email.clone(),
            password_hash: Some(password_hash),
            first_name: String::new(),
            last_name: String::new(),
            email_verified: false,
        },
    )
    .await
}

/// Looks up a user by the federated email claim, creating a verified
/// passwordless account on first login. Federation is idempotent in
/// identity: the same email always lands on the same user.
pub async fn get_or_create_federated(pool: &PgPool, data: &GoogleUserData) -> Res<User> {
    if let Some(user) = db::user::get_by_email(pool, &data.email).await? {
        return Ok(user);
    }

    let username = username::generate_unique(pool, &data.email).await?;
    log::info!("Creating federated user {} for {}", username, data.email);
    db::user::insert(
        pool,
        UserInsert {
            username,
            email: data.email.clone(),
            password_hash: None,
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            email_verified: true,
        },
    )
    .await
}

/// Overwrites the password credential and revokes every outstanding refresh
/// token, so sessions minted under the old password die with it.
pub async fn reset_password(pool: &PgPool, user_id: Uuid, password: &str) -> Res<User> {
    let password_hash = hash_password(password)?;
    let user = db::user::set_password_hash(pool, user_id, &password_hash).await?;
    db::refresh_token::revoke_all_for_user(pool, user_id).await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::PasswordHash;
    use argon2::PasswordVerifier;

    #[test]
    fn hash_password_produces_verifiable_phc_string() {
        let hash = hash_password("newpass123").unwrap();
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"newpass123", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"wrongpass", &parsed)
                .is_err()
        );
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("newpass123").unwrap();
        let second = hash_password("newpass123").unwrap();
        assert_ne!(first, second);
    }
}
