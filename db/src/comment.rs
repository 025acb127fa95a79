use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::comment::{CommentData, CommentInsert, CommentPatch},
    models::comment::Comment,
};

pub async fn list_all<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<Vec<Comment>> {
    sqlx::query_as::<_, Comment>("SELECT * FROM comments ORDER BY created_on DESC")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    comment_id: Uuid,
) -> Res<Option<Comment>> {
    sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = $1")
        .bind(comment_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: CommentInsert,
) -> Res<Comment> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (title, content, user_id, stock_id)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(data.title)
    .bind(data.content)
    .bind(data.user_id)
    .bind(data.stock_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    comment_id: Uuid,
    data: CommentData,
) -> Res<Option<Comment>> {
    sqlx::query_as::<_, Comment>(
        "UPDATE comments SET title = $1, content = $2, stock_id = $3 WHERE id = $4 RETURNING *",
    )
    .bind(data.title)
    .bind(data.content)
    .bind(data.stock_id)
    .bind(comment_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn patch<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    comment_id: Uuid,
    data: CommentPatch,
) -> Res<Option<Comment>> {
    sqlx::query_as::<_, Comment>(
        r#"
        UPDATE comments
        SET title = COALESCE($1, title),
            content = COALESCE($2, content),
            stock_id = COALESCE($3, stock_id)
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(data.title)
    .bind(data.content)
    .bind(data.stock_id)
    .bind(comment_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Returns true when a row was deleted.
pub async fn delete<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    comment_id: Uuid,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected() > 0)
}
