use actix_web::{HttpResponse, Responder, get, http::header::LOCATION, post, web};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use common::action_token::{self, ActionPurpose};
use common::env_config::Config;
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt;
use mailer::Mailer;

use crate::dtos::auth::{
    GoogleTokenRequest, LoginRequest, OAuthCallbackQuery, RefreshRequest, RegisterRequest,
    ResetPasswordConfirmRequest, ResetPasswordRequest, UserResponse,
};
use crate::services;

/// Registers a new user and sends the email-verification link.
///
/// # Input
/// - `req`: JSON payload with username, email and password (all required)
///
/// # Output
/// - Success: 201 Created with the user projection; one email dispatched
/// - Error: 400 Bad Request on blank fields or an existing username/email,
///   500 if the mail transport rejects the message (the user row stays)
#[post("/register")]
pub async fn post_register(
    req: web::Json<RegisterRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
    mailer: web::Data<Mailer>,
) -> Res<impl Responder> {
    let req = req.into_inner();
    if req.username.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }

    let pg_pool: &PgPool = &pool;
    let taken =
        db::user::exists_by_username_or_email(pg_pool, &req.username, &req.email).await?;
    if taken {
        return Err(AppError::BadRequest(
            "User with that username or email already exists".to_string(),
        ));
    }

    let user = services::user::create_user_with_credentials(pg_pool, &req).await?;

    let token = action_token::generate_action_token(
        user.id,
        user.password_hash.as_deref(),
        user.email_verified,
        ActionPurpose::VerifyEmail,
        &config.jwt_config,
    )?;
    let uid = action_token::encode_uid(user.id);
    let verify_url = format!(
        "{}/api/auth/verify-email/{}/{}/",
        config.api_base_url, uid, token
    );
    mailer
        .send_verification_email(&user.email, &user.username, &verify_url)
        .await?;

    Success::created(UserResponse::from(user))
}

/// Verifies an email address from the link sent at registration.
///
/// Every failure mode (bad uid, unknown user, expired/replayed/tampered
/// token) collapses into the same 400 so the link leaks nothing.
#[get("/verify-email/{uid}/{token}")]
pub async fn get_verify_email(
    path: web::Path<(String, String)>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let (uid, token) = path.into_inner();
    let invalid = || AppError::BadRequest("Invalid or expired token".to_string());
    let pg_pool: &PgPool = &pool;

    let user_id = action_token::decode_uid(&uid).map_err(|_| invalid())?;
    let user = db::user::get_by_id(pg_pool, user_id)
        .await?
        .ok_or_else(invalid)?;

    action_token::validate_action_token(
        &token,
        user.id,
        user.password_hash.as_deref(),
        user.email_verified,
        ActionPurpose::VerifyEmail,
        &config.jwt_config,
    )
    .map_err(|_| invalid())?;

    db::user::set_email_verified(pg_pool, user.id).await?;
    Success::ok(json!({ "detail": "Email verified successfully." }))
}

/// Password login. Issues an access/refresh pair; the access claims carry
/// username, email and the verification flag.
#[post("/token")]
pub async fn post_token(
    login_data: web::Json<LoginRequest>,
    config: web::Data<Arc<Config>>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;
    let user = services::auth::authenticate_user(pg_pool, &login_data.into_inner()).await?;
    let tokens = services::auth::issue_token_pair(pg_pool, &user, &config.jwt_config).await?;
    Success::ok(tokens)
}

/// Rotates a refresh token. The presented jti is consumed atomically; a
/// replayed or revoked token gets 401 and no new pair.
#[post("/token/refresh")]
pub async fn post_token_refresh(
    req: web::Json<RefreshRequest>,
    config: web::Data<Arc<Config>>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;

    let claims = jwt::validate_refresh_jwt(&req.refresh, &config.jwt_config.secret)
        .map_err(|_| AppError::Unauthorized("Invalid or expired refresh token".to_string()))?;

    db::refresh_token::consume(pg_pool, claims.jti)
        .await?
        .ok_or_else(|| {
            AppError::Unauthorized("Refresh token is no longer valid".to_string())
        })?;

    let user = db::user::get_by_id(pg_pool, claims.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

    let tokens = services::auth::issue_token_pair(pg_pool, &user, &config.jwt_config).await?;
    Success::ok(tokens)
}

/// Google federation, direct-token style: the front-end already holds an
/// id_token and posts it here for verification against the provider.
#[post("/google-login")]
pub async fn post_google_login(
    req: web::Json<GoogleTokenRequest>,
    config: web::Data<Arc<Config>>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    if req.token.trim().is_empty() {
        return Err(AppError::BadRequest("Missing token".to_string()));
    }
    let pg_pool: &PgPool = &pool;

    let user_data =
        services::auth::verify_google_id_token(&req.token, &config.google_client).await?;
    let user = services::user::get_or_create_federated(pg_pool, &user_data).await?;
    let tokens = services::auth::issue_token_pair(pg_pool, &user, &config.jwt_config).await?;
    Success::ok(tokens)
}

/// Google federation, redirect style: Google sends the user here with an
/// authorization code; the code is exchanged server-side and the browser is
/// bounced to the front-end callback with the token pair and basic profile
/// fields in the query string.
#[get("/google-login")]
pub async fn get_google_login(
    query: web::Query<OAuthCallbackQuery>,
    config: web::Data<Arc<Config>>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &pool;

    let access_token =
        services::auth::exchange_google_code(&query.code, &config.google_client).await?;
    let user_data = services::auth::fetch_google_user_data(&access_token).await?;
    let user = services::user::get_or_create_federated(pg_pool, &user_data).await?;
    let tokens = services::auth::issue_token_pair(pg_pool, &user, &config.jwt_config).await?;

    let mut redirect = url::Url::parse(&config.web_app_auth_callback_url)
        .map_err(|e| AppError::Internal(format!("Invalid callback URL: {}", e)))?;
    redirect
        .query_pairs_mut()
        .append_pair("access", &tokens.access)
        .append_pair("refresh", &tokens.refresh)
        .append_pair("username", &user.username)
        .append_pair("email", &user.email);

    Ok(HttpResponse::Found()
        .append_header((LOCATION, redirect.to_string()))
        .finish())
}

/// Requests a password-reset email. The response is uniform whether or not
/// the address matches an account, so the endpoint cannot be used to
/// enumerate users.
#[post("/reset-password")]
pub async fn post_reset_password(
    req: web::Json<ResetPasswordRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
    mailer: web::Data<Mailer>,
) -> Res<impl Responder> {
    if req.email.trim().is_empty() {
        return Err(AppError::BadRequest("Missing email".to_string()));
    }
    let detail = json!({
        "detail": "If that email matches an account, a reset link has been sent."
    });
    let pg_pool: &PgPool = &pool;

    let Some(user) = db::user::get_by_email(pg_pool, &req.email).await? else {
        return Success::ok(detail);
    };

    let token = action_token::generate_action_token(
        user.id,
        user.password_hash.as_deref(),
        user.email_verified,
        ActionPurpose::ResetPassword,
        &config.jwt_config,
    )?;
    let uid = action_token::encode_uid(user.id);
    let reset_url = format!("{}/reset-password/{}/{}", config.frontend_url, uid, token);
    mailer
        .send_password_reset_email(&user.email, &user.username, &reset_url)
        .await?;

    Success::ok(detail)
}

/// Confirms a password reset. The token validates against the user's
/// pre-reset state, so it dies the moment the password changes; outstanding
/// refresh tokens are revoked with it.
#[post("/reset-password-confirm")]
pub async fn post_reset_password_confirm(
    req: web::Json<ResetPasswordConfirmRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let req = req.into_inner();
    if req.password.is_empty() {
        return Err(AppError::BadRequest("Missing password".to_string()));
    }
    let invalid = || AppError::BadRequest("Invalid or expired token".to_string());
    let pg_pool: &PgPool = &pool;

    let user_id = action_token::decode_uid(&req.uid).map_err(|_| invalid())?;
    let user = db::user::get_by_id(pg_pool, user_id)
        .await?
        .ok_or_else(invalid)?;

    action_token::validate_action_token(
        &req.token,
        user.id,
        user.password_hash.as_deref(),
        user.email_verified,
        ActionPurpose::ResetPassword,
        &config.jwt_config,
    )
    .map_err(|_| invalid())?;

    services::user::reset_password(pg_pool, user.id, &req.password).await?;
    Success::ok(json!({ "detail": "Password reset successfully." }))
}
