use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::stock::{StockData, StockPatch},
    models::stock::Stock,
};

pub async fn list_all<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<Vec<Stock>> {
    sqlx::query_as::<_, Stock>("SELECT * FROM stocks ORDER BY symbol")
        .fetch_all(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    stock_id: Uuid,
) -> Res<Option<Stock>> {
    sqlx::query_as::<_, Stock>("SELECT * FROM stocks WHERE id = $1")
        .bind(stock_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn exists_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    stock_id: Uuid,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM stocks WHERE id = $1)")
        .bind(stock_id)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

/// True when the symbol is held by a stock other than `exclude` (pass None
/// for create).
pub async fn symbol_taken<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    symbol: &str,
    exclude: Option<Uuid>,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM stocks WHERE symbol = $1 AND ($2::uuid IS NULL OR id <> $2))",
    )
    .bind(symbol)
    .bind(exclude)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: StockData,
) -> Res<Stock> {
    sqlx::query_as::<_, Stock>(
        r#"
        INSERT INTO stocks (symbol, company_name, purchase, last_div, industry, market_cap)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(data.symbol)
    .bind(data.company_name)
    .bind(data.purchase)
    .bind(data.last_div)
    .bind(data.industry)
    .bind(data.market_cap)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn update<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    stock_id: Uuid,
    data: StockData,
) -> Res<Option<Stock>> {
    sqlx::query_as::<_, Stock>(
        r#"
        UPDATE stocks
        SET symbol = $1, company_name = $2, purchase = $3, last_div = $4,
            industry = $5, market_cap = $6
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(data.symbol)
    .bind(data.company_name)
    .bind(data.purchase)
    .bind(data.last_div)
    .bind(data.industry)
    .bind(data.market_cap)
    .bind(stock_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn patch<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    stock_id: Uuid,
    data: StockPatch,
) -> Res<Option<Stock>> {
    sqlx::query_as::<_, Stock>(
        r#"
        UPDATE stocks
        SET symbol = COALESCE($1, symbol),
            company_name = COALESCE($2, company_name),
            purchase = COALESCE($3, purchase),
            last_div = COALESCE($4, last_div),
            industry = COALESCE($5, industry),
            market_cap = COALESCE($6, market_cap)
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(data.symbol)
    .bind(data.company_name)
    .bind(data.purchase)
    .bind(data.last_div)
    .bind(data.industry)
    .bind(data.market_cap)
    .bind(stock_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

/// Returns true when a row was deleted.
pub async fn delete<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    stock_id: Uuid,
) -> Res<bool> {
    let result = sqlx::query("DELETE FROM stocks WHERE id = $1")
        .bind(stock_id)
        .execute(executor)
        .await
        .map_err(AppError::from)?;
    Ok(result.rows_affected() > 0)
}
