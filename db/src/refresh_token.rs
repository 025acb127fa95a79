use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::user::RefreshTokenInsert, models::refresh_token::RefreshToken};

pub async fn insert<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: RefreshTokenInsert,
) -> Res<()> {
    sqlx::query("INSERT INTO refresh_tokens (jti, user_id, expires_at) VALUES ($1, $2, $3)")
        .bind(data.jti)
        .bind(data.user_id)
        .bind(data.expires_at)
        .execute(executor)
        .await?;
    Ok(())
}

/// Atomically redeems a refresh token: the row flips to revoked and comes
/// back exactly once. A second call with the same jti returns None, as does
/// an expired or unknown jti.
pub async fn consume<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    jti: Uuid,
) -> Res<Option<RefreshToken>> {
    sqlx::query_as::<_, RefreshToken>(
        r#"
        UPDATE refresh_tokens
        SET revoked = TRUE
        WHERE jti = $1 AND revoked = FALSE AND expires_at > now()
        RETURNING *
        "#,
    )
    .bind(jti)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Revokes every outstanding refresh token for the user. Called when the
/// password credential is overwritten.
pub async fn revoke_all_for_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<()> {
    sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE user_id = $1 AND revoked = FALSE")
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(())
}
