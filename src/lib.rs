#[macro_use]
extern crate diesel;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::io;
use std::sync::Arc;

#[cfg(test)]
#[macro_use]
mod test_support;

pub mod config;
pub mod db;
pub mod errors;
pub mod extractors;
pub mod models;
pub mod routes;
pub mod schema;
pub mod validation;

fn init_logger() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "newsdesk=info,actix_web=info");
    }
    env_logger::init();
}

fn startup_error(e: anyhow::Error) -> io::Error {
    log::error!("{:#}", e);
    io::Error::new(io::ErrorKind::Other, format!("{:#}", e))
}

pub async fn run() -> io::Result<()> {
    init_logger();
    let config = config::Config::from_env().map_err(startup_error)?;
    let pool = db::create_connection_pool(&config).map_err(startup_error)?;
    let store: db::SharedStore = Arc::new(db::PgStore::new(pool));
    log::info!(
        "listening on {} with {} database connections",
        config.bind_address,
        config.pool_size
    );
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::new().max_age(3600).finish())
            .data(store.clone())
            .app_data(errors::json_config())
            .configure(routes::configure)
            .default_service(web::route().to(errors::route_not_found))
    })
    .bind(&config.bind_address)?
    .run()
    .await
}
