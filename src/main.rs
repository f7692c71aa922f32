use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use adopto_service::{
    api::state::AppState,
    infrastructure::{database::mongo_context::MongoContext, MongoPetRepository},
    routes::{configure, normalize_path},
    utils::config::AppConfig,
};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mongo_context = match MongoContext::init(
        &config.database_url,
        &config.database_name,
        config.database_timeout,
    ).await {
        Ok(context) => context,
        Err(e) => {
            log::error!("Failed to connect to MongoDB: {}", e);
            std::process::exit(1);
        }
    };

    let pet_repo = MongoPetRepository::new(&mongo_context);
    if let Err(e) = pet_repo.ensure_indexes().await {
        log::warn!("Could not create pet indexes: {}", e);
    }

    let app_state = AppState::new(Arc::new(pet_repo));
    let (host, port) = config.bind_address();

    log::info!("Adopto backend listening on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(Cors::permissive())
            .wrap(normalize_path())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind((host, port))?
    .run()
    .await?;

    mongo_context.shutdown().await;
    Ok(())
}
