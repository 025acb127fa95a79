use sqlx::PgPool;
use uuid::Uuid;

use common::error::{AppError, Res};
use db::{
    dtos::portfolio::{PortfolioData, PortfolioPatch},
    models::portfolio::Portfolio,
};

/// A portfolio row must point at a live user and a live stock; dangling
/// references map to 400.
async fn check_referents(
    pool: &PgPool,
    user_id: Option<Uuid>,
    stock_id: Option<Uuid>,
) -> Res<()> {
    if let Some(user_id) = user_id {
        if db::user::get_by_id(pool, user_id).await?.is_none() {
            return Err(AppError::BadRequest(
                "Referenced user does not exist".to_string(),
            ));
        }
    }
    if let Some(stock_id) = stock_id {
        if !db::stock::exists_by_id(pool, stock_id).await? {
            return Err(AppError::BadRequest(
                "Referenced stock does not exist".to_string(),
            ));
        }
    }
    Ok(())
}

pub async fn list(pool: &PgPool) -> Res<Vec<Portfolio>> {
    db::portfolio::list_all(pool).await
}

pub async fn get(pool: &PgPool, portfolio_id: Uuid) -> Res<Portfolio> {
    db::portfolio::get_by_id(pool, portfolio_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))
}

pub async fn create(pool: &PgPool, data: PortfolioData) -> Res<Portfolio> {
    check_referents(pool, Some(data.user_id), Some(data.stock_id)).await?;
    db::portfolio::insert(pool, data).await
}

pub async fn update(pool: &PgPool, portfolio_id: Uuid, data: PortfolioData) -> Res<Portfolio> {
    check_referents(pool, Some(data.user_id), Some(data.stock_id)).await?;
    db::portfolio::update(pool, portfolio_id, data)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))
}

pub async fn patch(pool: &PgPool, portfolio_id: Uuid, data: PortfolioPatch) -> Res<Portfolio> {
    check_referents(pool, data.user_id, data.stock_id).await?;
    db::portfolio::patch(pool, portfolio_id, data)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))
}

pub async fn delete(pool: &PgPool, portfolio_id: Uuid) -> Res<()> {
    if db::portfolio::delete(pool, portfolio_id).await? {
        Ok(())
    } else {
        Err(AppError::NotFound("Portfolio not found".to_string()))
    }
}
