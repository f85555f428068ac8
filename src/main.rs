use actix_cors::Cors;
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;
use dotenvy::dotenv;
use std::sync::Arc;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod models;
mod payment;
mod routes;
mod store;
#[cfg(test)]
mod test_util;

use config::Config;
use db::{init_db, init_store};
use payment::{PaymentGateway, StripeGateway};
use store::Store;

use crate::docs::ApiDoc;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index(config: Data<Config>) -> impl Responder {
    format!("Server is running on {}", config.server_addr)
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily("logs", "worksync.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let level = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|l| l.parse().ok())
        .unwrap_or(tracing::Level::DEBUG);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!("Server starting...");

    let db = init_db(&config.database_url, &config.database_name).await?;
    let store: Arc<dyn Store> = Arc::new(init_store(&db).await?);
    info!(database = %config.database_name, "Database connected");

    let gateway: Arc<dyn PaymentGateway> = Arc::new(StripeGateway::new(
        config.payment_api_base.clone(),
        config.payment_secret_key.clone(),
    ));

    let limiters = routes::Limiters::from_config(&config)?;
    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .wrap(Cors::permissive())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(Data::new(config.clone()))
            .app_data(Data::from(store.clone()))
            .app_data(Data::from(gateway.clone()))
            .service(index)
            .configure(|cfg| routes::configure(cfg, &limiters))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run()
    .await?;

    info!("Server stopped");
    Ok(())
}
