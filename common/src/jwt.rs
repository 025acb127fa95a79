use actix_web::{HttpMessage, HttpResponse, dev::ServiceRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    env_config::JwtConfig,
    error::{AppError, Res},
};

/// Claims carried by an access token. Mirrors what the front-end needs to
/// render the signed-in state without a follow-up profile call.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JwtClaims {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub email_verified: bool,
    pub exp: usize,
}

pub struct ClaimsSpec {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub email_verified: bool,
}

/// Claims carried by a refresh token. The jti is recorded server-side and
/// consumed on rotation, making each refresh token one-time-use.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshClaims {
    pub user_id: Uuid,
    pub jti: Uuid,
    pub exp: usize,
}

/// Generates an access token based on the user claims and JWT configuration.
pub fn generate_access_jwt(spec: ClaimsSpec, config: &JwtConfig) -> Res<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(config.access_expiration_hours))
        .expect("valid timestamp")
        .timestamp();

    let claims = JwtClaims {
        user_id: spec.user_id,
        username: spec.username,
        email: spec.email,
        email_verified: spec.email_verified,
        exp: expiration as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(AppError::from)
}

/// Generates a refresh token for the given user and jti.
pub fn generate_refresh_jwt(user_id: Uuid, jti: Uuid, config: &JwtConfig) -> Res<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::days(config.refresh_expiration_days))
        .expect("valid timestamp")
        .timestamp();

    let claims = RefreshClaims {
        user_id,
        jti,
        exp: expiration as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(AppError::from)
}

/// Extracts claims object from an access token.
/// Requires the JWT secret.
pub fn validate_access_jwt(token: &str, secret: &str) -> Res<JwtClaims> {
    let token_data = jsonwebtoken::decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Extracts claims object from a refresh token.
/// An access token fails here: its claim set has no jti.
pub fn validate_refresh_jwt(token: &str, secret: &str) -> Res<RefreshClaims> {
    let token_data = jsonwebtoken::decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

pub fn get_jwt_claims_or_error(req: &ServiceRequest) -> Result<JwtClaims, HttpResponse> {
    if let Some(jwt_claims_res) = req.extensions().get::<Res<JwtClaims>>() {
        match jwt_claims_res {
            Ok(claims) => Ok(claims.clone()),
            Err(app_error) => Err(app_error.to_http_response()),
        }
    } else {
        Err(
            AppError::Unauthorized("No authorization token provided".to_string())
                .to_http_response(),
        )
    }
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

    fn spec() -> ClaimsSpec {
        ClaimsSpec {
            user_id: Uuid::new_v4(),
            username: "newuser".to_string(),
            email: "newuser@example.com".to_string(),
            email_verified: false,
        }
    }

    #[test]
    fn access_token_roundtrip() {
        let config = test_config();
        let spec = spec();
        let user_id = spec.user_id;

        let token = generate_access_jwt(spec, &config).unwrap();
        let claims = validate_access_jwt(&token, &config.secret).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.username, "newuser");
        assert_eq!(claims.email, "newuser@example.com");
        assert!(!claims.email_verified);
    }

    #[test]
    fn access_token_rejected_with_wrong_secret() {
        let config = test_config();
        let token = generate_access_jwt(spec(), &config).unwrap();
        assert!(validate_access_jwt(&token, "some-other-secret").is_err());
    }

    #[test]
    fn expired_access_token_rejected() {
        let config = JwtConfig {
            access_expiration_hours: -2,
            ..test_config()
        };
        let token = generate_access_jwt(spec(), &config).unwrap();
        assert!(validate_access_jwt(&token, &config.secret).is_err());
    }

    #[test]
    fn refresh_token_roundtrip() {
        let config = test_config();
        let user_id = Uuid::new_v4();
        let jti = Uuid::new_v4();

        let token = generate_refresh_jwt(user_id, jti, &config).unwrap();
        let claims = validate_refresh_jwt(&token, &config.secret).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.jti, jti);
    }

    #[test]
    fn access_token_is_not_a_refresh_token() {
        let config = test_config();
        let token = generate_access_jwt(spec(), &config).unwrap();
        assert!(validate_refresh_jwt(&token, &config.secret).is_err());
    }
}
