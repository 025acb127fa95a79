use actix_web::{Responder, patch, web};
use sqlx::PgPool;
use std::sync::Arc;

use common::{
    error::{AppError, Res},
    http::Success,
    jwt::JwtClaims,
};
use db::dtos::user::ProfileUpdate;

use crate::dtos::auth::{ProfileUpdateRequest, UserResponse};

/// Updates the authenticated user's own profile. Only the allow-listed
/// fields (username, first name, last name) are touched; anything else in
/// the body is ignored by deserialization.
#[patch("/profile")]
pub async fn patch_profile(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<ProfileUpdateRequest>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let update = req.into_inner();
    let pg_pool: &PgPool = &pool;

    if let Some(username) = update.username.as_deref() {
        if username.trim().is_empty() {
            return Err(AppError::BadRequest("Username cannot be blank".to_string()));
        }
        if db::user::username_taken_by_other(pg_pool, username, claims.user_id).await? {
            return Err(AppError::BadRequest("Username already exists".to_string()));
        }
    }

    let user = db::user::update_profile(
        pg_pool,
        claims.user_id,
        ProfileUpdate {
            username: update.username,
            first_name: update.first_name,
            last_name: update.last_name,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Success::ok(UserResponse::from(user))
}
