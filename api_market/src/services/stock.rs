use sqlx::PgPool;
use uuid::Uuid;

use common::error::{AppError, Res};
use db::{
    dtos::stock::{StockData, StockPatch},
    models::stock::Stock,
};

pub async fn list(pool: &PgPool) -> Res<Vec<Stock>> {
    db::stock::list_all(pool).await
}

pub async fn get(pool: &PgPool, stock_id: Uuid) -> Res<Stock> {
    db::stock::get_by_id(pool, stock_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Stock not found".to_string()))
}

pub async fn create(pool: &PgPool, data: StockData) -> Res<Stock> {
    if db::stock::symbol_taken(pool, &data.symbol, None).await? {
        return Err(AppError::BadRequest(
            "Stock with that symbol already exists".to_string(),
        ));
    }
    db::stock::insert(pool, data).await
}

pub async fn update(pool: &PgPool, stock_id: Uuid, data: StockData) -> Res<Stock> {
    if db::stock::symbol_taken(pool, &data.symbol, Some(stock_id)).await? {
        return Err(AppError::BadRequest(
            "Stock with that symbol already exists".to_string(),
        ));
    }
    db::stock::update(pool, stock_id, data)
        .await?
        .ok_or_else(|| AppError::NotFound("Stock not found".to_string()))
}

pub async fn patch(pool: &PgPool, stock_id: Uuid, data: StockPatch) -> Res<Stock> {
    if let Some(symbol) = data.symbol.as_deref() {
        if db::stock::symbol_taken(pool, symbol, Some(stock_id)).await? {
            return Err(AppError::BadRequest(
                "Stock with that symbol already exists".to_string(),
            ));
        }
    }
    db::stock::patch(pool, stock_id, data)
        .await?
        .ok_or_else(|| AppError::NotFound("Stock not found".to_string()))
}

pub async fn delete(pool: &PgPool, stock_id: Uuid) -> Res<()> {
    if db::stock::delete(pool, stock_id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound("Stock not found".to_string()))
    }
}
