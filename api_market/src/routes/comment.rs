use std::sync::Arc;

use actix_web::{Responder, delete, get, patch, post, put, web};
use sqlx::PgPool;
use uuid::Uuid;

use common::{
    error::Res,
    http::Success,
    jwt::JwtClaims,
};
use db::dtos::comment::{CommentData, CommentPatch};

use crate::services;

/// Lists all comments, newest first.
#[get("")]
pub async fn get_comments(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let comments = services::comment::list(&pool).await?;
    Success::ok(comments)
}

/// Creates a comment authored by the authenticated user, optionally
/// attached to a stock.
#[post("")]
pub async fn post_comment(
    claims: web::ReqData<JwtClaims>,
    req: web::Json<CommentData>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let comment = services::comment::create(&pool, claims.user_id, req.into_inner()).await?;
    Success::created(comment)
}

/// Retrieves a comment by id. 404 when absent.
#[get("/{id}")]
pub async fn get_comment(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let comment = services::comment::get(&pool, path.into_inner()).await?;
    Success::ok(comment)
}

/// Replaces a comment's title, content and stock attachment.
#[put("/{id}")]
pub async fn put_comment(
    path: web::Path<Uuid>,
    req: web::Json<CommentData>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let comment = services::comment::update(&pool, path.into_inner(), req.into_inner()).await?;
    Success::ok(comment)
}

/// Partially updates a comment.
#[patch("/{id}")]
pub async fn patch_comment(
    path: web::Path<Uuid>,
    req: web::Json<CommentPatch>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let comment = services::comment::patch(&pool, path.into_inner(), req.into_inner()).await?;
    Success::ok(comment)
}

/// Deletes a comment.
#[delete("/{id}")]
pub async fn delete_comment(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    services::comment::delete(&pool, path.into_inner()).await?;
    Success::no_content()
}
