use actix_web::web;

pub mod routes {
    pub mod comment;
    pub mod portfolio;
    pub mod stock;
}
pub mod services {
    pub mod comment;
    pub mod portfolio;
    pub mod quote;
    pub mod stock;
}

pub fn mount_stocks() -> actix_web::Scope {
    web::scope("/stocks")
        .service(routes::stock::get_stocks)
        .service(routes::stock::post_stock)
        .service(routes::stock::get_stock_quote)
        .service(routes::stock::get_stock)
        .service(routes::stock::put_stock)
        .service(routes::stock::patch_stock)
        .service(routes::stock::delete_stock)
}

pub fn mount_portfolios() -> actix_web::Scope {
    web::scope("/portfolios")
        .service(routes::portfolio::get_portfolios)
        .service(routes::portfolio::post_portfolio)
        .service(routes::portfolio::get_portfolio)
        .service(routes::portfolio::put_portfolio)
        .service(routes::portfolio::patch_portfolio)
        .service(routes::portfolio::delete_portfolio)
}

pub fn mount_comments() -> actix_web::Scope {
    web::scope("/comments")
        .service(routes::comment::get_comments)
        .service(routes::comment::post_comment)
        .service(routes::comment::get_comment)
        .service(routes::comment::put_comment)
        .service(routes::comment::patch_comment)
        .service(routes::comment::delete_comment)
}
