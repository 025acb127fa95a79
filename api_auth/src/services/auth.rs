use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use chrono::{Duration, Utc};
use oauth2::basic::*;
use oauth2::*;
use sqlx::PgPool;
use uuid::Uuid;

use common::{
    env_config::{JwtConfig, OAuthProviderClient},
    error::{AppError, Res},
    jwt::{self, ClaimsSpec},
};
use db::{dtos::user::RefreshTokenInsert, models::user::User};

use crate::dtos::auth::{GoogleUserData, LoginRequest, TokenPairResponse};

const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Create the Google OAuth client object.
pub fn create_oauth_client(
    provider_client: &OAuthProviderClient,
) -> Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
> {
    let client_id = ClientId::new(provider_client.client_id.clone());
    let client_secret = ClientSecret::new(provider_client.client_secret.clone());
    let auth_url =
        AuthUrl::new(provider_client.auth_url.clone()).expect("Invalid authorization endpoint URL");
    let token_url =
        TokenUrl::new(provider_client.token_url.clone()).expect("Invalid token endpoint URL");

    BasicClient::new(client_id)
        .set_client_secret(client_secret)
        .set_auth_uri(auth_url)
        .set_token_uri(token_url)
        .set_redirect_uri(
            RedirectUrl::new(provider_client.redirect_uri.to_string())
                .expect("Invalid redirect URL"),
        )
}

/// Authenticates an existing user against the stored argon2 hash.
/// Unknown usernames, federated accounts without a password credential and
/// wrong passwords all collapse into the same 401.
pub async fn authenticate_user(pool: &PgPool, login_data: &LoginRequest) -> Res<User> {
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let user = db::user::get_by_username(pool, &login_data.username)
        .await?
        .ok_or_else(invalid)?;
    let stored_hash = user.password_hash.as_deref().ok_or_else(invalid)?;

    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Internal(format!("Corrupt password hash: {}", e)))?;
    let is_valid = Argon2::default()
        .verify_password(login_data.password.as_bytes(), &parsed_hash)
        .is_ok();

    if is_valid { Ok(user) } else { Err(invalid()) }
}

/// Issues an access/refresh pair for the user and records the refresh jti so
/// rotation can consume it exactly once.
pub async fn issue_token_pair(
    pool: &PgPool,
    user: &User,
    config: &JwtConfig,
) -> Res<TokenPairResponse> {
    let access = jwt::generate_access_jwt(
        ClaimsSpec {
            user_id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            email_verified: user.email_verified,
        },
        config,
    )?;

    let jti = Uuid::new_v4();
    let expires_at = Utc::now()
        .checked_add_signed(Duration::days(config.refresh_expiration_days))
        .expect("valid timestamp")
        .naive_utc();
    db::refresh_token::insert(
        pool,
        RefreshTokenInsert {
            jti,
            user_id: user.id,
            expires_at,
        },
    )
    .await?;

    let refresh = jwt::generate_refresh_jwt(user.id, jti, config)?;
    Ok(TokenPairResponse { access, refresh })
}

/// Checks a Google id_token against the tokeninfo endpoint and extracts the
/// verified identity claims. A provider rejection maps to 400.
pub async fn verify_google_id_token(
    id_token: &str,
    provider_client: &OAuthProviderClient,
) -> Res<GoogleUserData> {
    let client = reqwest::Client::new();
    let response = client
        .get(GOOGLE_TOKENINFO_URL)
        .query(&[("id_token", id_token)])
        .send()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to reach Google tokeninfo: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::BadRequest("Invalid Google token".to_string()));
    }

    let info: serde_json::Value = response
        .json()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to parse Google tokeninfo: {}", e)))?;

    if !provider_client.client_id.is_empty()
        && info["aud"].as_str() != Some(provider_client.client_id.as_str())
    {
        return Err(AppError::BadRequest(
            "Google token issued for another client".to_string(),
        ));
    }

    let email = info["email"]
        .as_str()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::BadRequest("Google account missing email".to_string()))?
        .to_string();
    let first_name = info["given_name"].as_str().unwrap_or("").to_string();
    let last_name = info["family_name"].as_str().unwrap_or("").to_string();

    Ok(GoogleUserData {
        email,
        first_name,
        last_name,
    })
}

/// Exchanges an authorization code for a Google access token.
pub async fn exchange_google_code(
    code: &str,
    provider_client: &OAuthProviderClient,
) -> Res<String> {
    let client = create_oauth_client(provider_client);

    let http_client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Client should build");

    let token = client
        .exchange_code(AuthorizationCode::new(code.to_string()))
        .request_async(&http_client)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to exchange code. {}", e)))?;

    Ok(token.access_token().secret().to_string())
}

/// Fetches identity claims from Google's userinfo API with an access token.
pub async fn fetch_google_user_data(access_token: &str) -> Res<GoogleUserData> {
    let client = reqwest::Client::new();
    let response = client
        .get(GOOGLE_USERINFO_URL)
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch Google user data: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::Internal(format!(
            "Google API returned error status: {}",
            response.status()
        )));
    }

    let google_user: serde_json::Value = response
        .json()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to parse Google user data: {}", e)))?;

    let email = google_user["email"]
        .as_str()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::BadRequest("Google account missing email".to_string()))?
        .to_string();
    let first_name = google_user["given_name"].as_str().unwrap_or("").to_string();
    let last_name = google_user["family_name"]
        .as_str()
        .unwrap_or("")
        .to_string();

    Ok(GoogleUserData {
        email,
        first_name,
        last_name,
    })
}
