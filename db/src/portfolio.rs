use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::portfolio::{PortfolioData, PortfolioPatch},
    models::portfolio::Portfolio,
};

pub async fn list_all<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
) -> Res<Vec<Portfolio>> {
    sqlx::query_as::<_, Portfolio>("SELECT * FROM portfolios")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    portfolio_id: Uuid,
) -> Res<Option<Portfolio>> {
    sqlx::query_as::<_, Portfolio>("SELECT * FROM portfolios WHERE id = $1")
        .bind(portfolio_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: PortfolioData,
) -> Res<Portfolio> {
    sqlx::query_as::<_, Portfolio>(
        "INSERT INTO portfolios (user_id, stock_id) VALUES ($1, $2) RETURNING *",
    )
    .bind(data.user_id)
    .bind(data.stock_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    portfolio_id: Uuid,
    data: PortfolioData,
) -> Res<Option<Portfolio>> {
    sqlx::query_as::<_, Portfolio>(
        "UPDATE portfolios SET user_id = $1, stock_id = $2 WHERE id = $3 RETURNING *",
    )
    .bind(data.user_id)
    .bind(data.stock_id)
    .bind(portfolio_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn patch<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    portfolio_id: Uuid,
    data: PortfolioPatch,
) -> Res<Option<Portfolio>> {
    sqlx::query_as::<_, Portfolio>(
        r#"
        UPDATE portfolios
        SET user_id = COALESCE($1, user_id),
            stock_id = COALESCE($2, stock_id)
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(data.user_id)
    .bind(data.stock_id)
    .bind(portfolio_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Returns true when a row was deleted.
pub async fn delete<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    portfolio_id: Uuid,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM portfolios WHERE id = $1")
        .bind(portfolio_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected() > 0)
}
