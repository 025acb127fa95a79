use std::sync::Arc;

use actix_web::{Responder, delete, get, patch, post, put, web};
use sqlx::PgPool;
use uuid::Uuid;

use common::{
    env_config::Config,
    error::Res,
    http::Success,
};
use db::dtos::stock::{StockData, StockPatch};

use crate::services;

/// Lists all stocks.
#[get("")]
pub async fn get_stocks(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let stocks = services::stock::list(&pool).await?;
    Success::ok(stocks)
}

/// Creates a stock. 400 when the symbol is already taken.
#[post("")]
pub async fn post_stock(
    req: web::Json<StockData>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let stock = services::stock::create(&pool, req.into_inner()).await?;
    Success::created(stock)
}

/// Retrieves a stock by id. 404 when absent.
#[get("/{id}")]
pub async fn get_stock(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let stock = services::stock::get(&pool, path.into_inner()).await?;
    Success::ok(stock)
}

/// Replaces a stock.
#[put("/{id}")]
pub async fn put_stock(
    path: web::Path<Uuid>,
    req: web::Json<StockData>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let stock = services::stock::update(&pool, path.into_inner(), req.into_inner()).await?;
    Success::ok(stock)
}

/// Partially updates a stock.
#[patch("/{id}")]
pub async fn patch_stock(
    path: web::Path<Uuid>,
    req: web::Json<StockPatch>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let stock = services::stock::patch(&pool, path.into_inner(), req.into_inner()).await?;
    Success::ok(stock)
}

/// Deletes a stock. Attached portfolios cascade; comments detach.
#[delete("/{id}")]
pub async fn delete_stock(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    services::stock::delete(&pool, path.into_inner()).await?;
    Success::no_content()
}

/// Relays a live quote for the stock's symbol from the FMP API.
#[get("/{id}/quote")]
pub async fn get_stock_quote(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let stock = services::stock::get(&pool, path.into_inner()).await?;
    let quote = services::quote::fetch_quote(&config.fmp, &stock.symbol).await?;
    Success::ok(quote)
}
