use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::user::{ProfileUpdate, UserInsert},
    models::user::User,
};

pub async fn exists_by_username_or_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    username: &str,
    email: &str,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)",
    )
    .bind(username)
    .bind(email)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn exists_by_username<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    username: &str,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
        .bind(username)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

/// True when another user already holds the username. Used by profile
/// updates, where the caller's own row must not count as a collision.
pub async fn username_taken_by_other<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    username: &str,
    user_id: Uuid,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 AND id <> $2)",
    )
    .bind(username)
    .bind(user_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_by_username<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    username: &str,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: UserInsert,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, password_hash, first_name, last_name, email_verified)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(data.username)
    .bind(data.email)
    .bind(data.password_hash)
    .bind(data.first_name)
    .bind(data.last_name)
    .bind(data.email_verified)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn set_email_verified<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET email_verified = TRUE, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(user_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn set_password_hash<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    password_hash: &str,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET password_hash = $1, updated_at = now() WHERE id = $2 RETURNING *",
    )
    .bind(password_hash)
    .bind(user_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update_profile<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    data: ProfileUpdate,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET username = COALESCE($1, username),
            first_name = COALESCE($2, first_name),
            last_name = COALESCE($3, last_name),
            updated_at = now()
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(data.username)
    .bind(data.first_name)
    .bind(data.last_name)
    .bind(user_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}
