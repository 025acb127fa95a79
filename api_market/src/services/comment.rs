use sqlx::PgPool;
use uuid::Uuid;

use common::error::{AppError, Res};
use db::{
    dtos::comment::{CommentData, CommentInsert, CommentPatch},
    models::comment::Comment,
};

async fn check_stock(pool: &PgPool, stock_id: Option<Uuid>) -> Res<()> {
    if let Some(stock_id) = stock_id {
        if !db::stock::exists_by_id(pool, stock_id).await? {
            return Err(AppError::BadRequest(
                "Referenced stock does not exist".to_string(),
            ));
        }
    }
    Ok(())
}

pub async fn list(pool: &PgPool) -> Res<Vec<Comment>> {
    db::comment::list_all(pool).await
}

pub async fn get(pool: &PgPool, comment_id: Uuid) -> Res<Comment> {
    db::comment::get_by_id(pool, comment_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
}

/// The author is the bearer of the access token, not a body field.
pub async fn create(pool: &PgPool, author_id: Uuid, data: CommentData) -> Res<Comment> {
    check_stock(pool, data.stock_id).await?;
    db::comment::insert(
        pool,
        CommentInsert {
            title: data.title,
            content: data.content,
            user_id: author_id,
            stock_id: data.stock_id,
        },
    )
    .await
}

pub async fn update(pool: &PgPool, comment_id: Uuid, data: CommentData) -> Res<Comment> {
    check_stock(pool, data.stock_id).await?;
    db::comment::update(pool, comment_id, data)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
}

pub async fn patch(pool: &PgPool, comment_id: Uuid, data: CommentPatch) -> Res<Comment> {
    check_stock(pool, data.stock_id).await?;
    db::comment::patch(pool, comment_id, data)
        .await?
        .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
}

pub async fn delete(pool: &PgPool, comment_id: Uuid) -> Res<()> {
    if db::comment::delete(pool, comment_id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound("Comment not found".to_string()))
    }
}
