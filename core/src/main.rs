mod cors;

use actix_web::{
    App, HttpServer,
    middleware::NormalizePath,
    web::{self},
};
use common::env_config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();

    // get info
    let is_production = config.environment == "production";
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    // init mail transport, shared across workers
    let mailer =
        web::Data::new(mailer::Mailer::new(&config.smtp).expect("Failed to set up mail transport"));

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(config_data.clone()))
            .app_data(mailer.clone())
            .wrap(logger::middleware()) // 4th
            .wrap(extractor::middleware()) // 3rd
            .wrap(cors::middleware(&origin)) // 2nd
            .wrap(NormalizePath::trim()) // 1st
            .service(
                web::scope("/api")
                    .wrap(api_auth::auth_middleware())
                    .service(api_auth::mount_auth())
                    .service(api_market::mount_stocks())
                    .service(api_market::mount_portfolios())
                    .service(api_market::mount_comments()),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
