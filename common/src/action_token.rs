use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    env_config::JwtConfig,
    error::{AppError, Res},
};

/// What an email-action token authorizes. A verification token cannot be
/// replayed against the reset endpoint and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionPurpose {
    VerifyEmail,
    ResetPassword,
}

impl ActionPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionPurpose::VerifyEmail => "verify_email",
            ActionPurpose::ResetPassword => "reset_password",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ActionClaims {
    sub: Uuid,
    purpose: String,
    exp: usize,
}

/// The signing key folds in the user's security-relevant state. Verifying an
/// email or overwriting a password changes the key, which invalidates every
/// token minted before the change without any server-side bookkeeping.
fn derive_key(
    secret: &str,
    user_id: Uuid,
    password_hash: Option<&str>,
    email_verified: bool,
) -> Vec<u8> {
    format!(
        "{}:{}:{}:{}",
        secret,
        user_id,
        password_hash.unwrap_or(""),
        email_verified
    )
    .into_bytes()
}

/// Mints a single-use token bound to the user's current state.
pub fn generate_action_token(
    user_id: Uuid,
    password_hash: Option<&str>,
    email_verified: bool,
    purpose: ActionPurpose,
    config: &JwtConfig,
) -> Res<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(config.action_expiration_hours))
        .expect("valid timestamp")
        .timestamp();

    let claims = ActionClaims {
        sub: user_id,
        purpose: purpose.as_str().to_string(),
        exp: expiration as usize,
    };

    let key = derive_key(&config.secret, user_id, password_hash, email_verified);
    jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(&key))
        .map_err(AppError::from)
}

/// Checks a token against the user's current state. Fails on signature
/// mismatch (state changed or tampering), expiry, or purpose mismatch.
pub fn validate_action_token(
    token: &str,
    user_id: Uuid,
    password_hash: Option<&str>,
    email_verified: bool,
    purpose: ActionPurpose,
    config: &JwtConfig,
) -> Res<()> {
    let key = derive_key(&config.secret, user_id, password_hash, email_verified);
    let token_data = jsonwebtoken::decode::<ActionClaims>(
        token,
        &DecodingKey::from_secret(&key),
        &Validation::default(),
    )?;

    if token_data.claims.sub != user_id || token_data.claims.purpose != purpose.as_str() {
        return Err(AppError::BadRequest(
            "Invalid or expired token".to_string(),
        ));
    }
    Ok(())
}

/// Encodes a user id as the opaque reference embedded in email links.
pub fn encode_uid(user_id: Uuid) -> String {
    URL_SAFE_NO_PAD.encode(user_id.to_string())
}

/// Decodes an opaque user reference. Any malformed input maps to the same
/// error so the caller can treat it as an invalid link.
pub fn decode_uid(uid: &str) -> Res<Uuid> {
    let invalid = || AppError::BadRequest("Invalid user reference".to_string());
    let bytes = URL_SAFE_NO_PAD.decode(uid).map_err(|_| invalid())?;
    let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
    Uuid::parse_str(&raw).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret".to_string(),
            access_expiration_hours: 1,
            refresh_expiration_days: 7,
            action_expiration_hours: 24,
        }
    }

    #[test]
    fn action_token_roundtrip() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let hash = Some("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA");

        let token = generate_action_token(
            user_id,
            hash,
            false,
            ActionPurpose::VerifyEmail,
            &config,
        )
        .unwrap();

        assert!(
            validate_action_token(
                &token,
                user_id,
                hash,
                false,
                ActionPurpose::VerifyEmail,
                &config
            )
            .is_ok()
        );
    }

    #[test]
    fn purpose_mismatch_rejected() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token =
            generate_action_token(user_id, None, true, ActionPurpose::ResetPassword, &config)
                .unwrap();

        assert!(
            validate_action_token(
                &token,
                user_id,
                None,
                true,
                ActionPurpose::VerifyEmail,
                &config
            )
            .is_err()
        );
    }

    #[test]
    fn verified_flag_change_invalidates_token() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let hash = Some("old-hash");

        let token = generate_action_token(
            user_id,
            hash,
            false,
            ActionPurpose::VerifyEmail,
            &config,
        )
        .unwrap();

        // the flag flipped after the token went out
        assert!(
            validate_action_token(
                &token,
                user_id,
                hash,
                true,
                ActionPurpose::VerifyEmail,
                &config
            )
            .is_err()
        );
    }

    #[test]
    fn password_change_invalidates_reset_token() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = generate_action_token(
            user_id,
            Some("old-hash"),
            true,
            ActionPurpose::ResetPassword,
            &config,
        )
        .unwrap();

        assert!(
            validate_action_token(
                &token,
                user_id,
                Some("new-hash"),
                true,
                ActionPurpose::ResetPassword,
                &config
            )
            .is_err()
        );
    }

    #[test]
    fn uid_roundtrip() {
        let user_id = Uuid::new_v4();
        let uid = encode_uid(user_id);
        assert_eq!(decode_uid(&uid).unwrap(), user_id);
    }

    #[test]
    fn garbage_uid_rejected() {
        assert!(decode_uid("!!!not-base64!!!").is_err());
        assert!(decode_uid("bm90LWEtdXVpZA").is_err()); // decodes, but not a uuid
    }
}
