use std::sync::Arc;

use actix_web::{Responder, delete, get, patch, post, put, web};
use sqlx::PgPool;
use uuid::Uuid;

use common::{error::Res, http::Success};
use db::dtos::portfolio::{PortfolioData, PortfolioPatch};

use crate::services;

/// Lists all portfolios.
#[get("")]
pub async fn get_portfolios(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let portfolios = services::portfolio::list(&pool).await?;
    Success::ok(portfolios)
}

/// Creates a portfolio linking a user to a stock. 400 when either referent
/// does not exist.
#[post("")]
pub async fn post_portfolio(
    req: web::Json<PortfolioData>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let portfolio = services::portfolio::create(&pool, req.into_inner()).await?;
    Success::created(portfolio)
}

/// Retrieves a portfolio by id. 404 when absent.
#[get("/{id}")]
pub async fn get_portfolio(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let portfolio = services::portfolio::get(&pool, path.into_inner()).await?;
    Success::ok(portfolio)
}

/// Replaces a portfolio.
#[put("/{id}")]
pub async fn put_portfolio(
    path: web::Path<Uuid>,
    req: web::Json<PortfolioData>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let portfolio =
        services::portfolio::update(&pool, path.into_inner(), req.into_inner()).await?;
    Success::ok(portfolio)
}

/// Partially updates a portfolio.
#[patch("/{id}")]
pub async fn patch_portfolio(
    path: web::Path<Uuid>,
    req: web::Json<PortfolioPatch>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let portfolio = services::portfolio::patch(&pool, path.into_inner(), req.into_inner()).await?;
    Success::ok(portfolio)
}

/// Deletes a portfolio.
#[delete("/{id}")]
pub async fn delete_portfolio(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    services::portfolio::delete(&pool, path.into_inner()).await?;
    Success::no_content()
}
