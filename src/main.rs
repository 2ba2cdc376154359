// Third-party dependencies
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::info;
use std::sync::Arc;

use roster_service::config::Config;
use roster_service::routes::{auth_routes, teammate_routes};
use roster_service::services::tracker_service::TrackerService;
use roster_service::utils::record_storage::{JsonFileStore, RecordStore};
use roster_service::utils::Authentication;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    info!("🚀 Starting roster service at {}", config.bind_address);

    std::fs::create_dir_all(&config.storage_root)?;

    let store: Arc<dyn RecordStore> = Arc::new(JsonFileStore::new(config.storage_root.clone()));
    let tracker = web::Data::new(TrackerService::new(store.clone(), config.rollback_policy));
    let store_data = web::Data::new(store);
    let bind_address = config.bind_address.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(tracker.clone())
            .app_data(store_data.clone())
            .configure(auth_routes::init_routes)
            .service(
                web::scope("")
                    .wrap(Authentication)
                    .configure(|cfg| {
                        auth_routes::init_protected_routes(cfg);
                        teammate_routes::init_routes(cfg);
                    }),
            )
    })
        .bind(bind_address)?
        .run()
        .await
}
