use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use rescue_match::config::{LoggingSettings, Settings};
use rescue_match::core::MatchOrchestrator;
use rescue_match::routes::{self, AppState};
use rescue_match::services::{AnimalStore, CachedStore, DocumentStoreClient};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "json" => subscriber.json().init(),
        "pretty" => subscriber.pretty().init(),
        _ => subscriber.compact().init(),
    }
}

fn io_error(message: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::Other, message)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Logging settings come from the config itself, so load it first
    let settings = Settings::load()
        .map_err(|e| io_error(format!("Configuration error: {}", e)))?;

    init_logging(&settings.logging);

    info!("Starting rescue-match service...");

    let client = DocumentStoreClient::new(
        settings.store.endpoint.clone(),
        settings.store.api_key.clone(),
        settings.store.project_id.clone(),
        settings.store.database_id.clone(),
        settings.store.collection.clone(),
    )
    .map_err(|e| {
        error!("Failed to build document store client: {}", e);
        io_error(format!("Store client error: {}", e))
    })?;

    info!("Document store client initialized ({})", settings.store.endpoint);

    let store: Arc<dyn AnimalStore> = if settings.cache.enabled {
        info!(
            "Pool cache enabled ({} entries, TTL: {}s)",
            settings.cache.pool_cache_size, settings.cache.ttl_secs
        );
        Arc::new(CachedStore::new(client, settings.cache.pool_cache_size, settings.cache.ttl_secs))
    } else {
        Arc::new(client)
    };

    // Build application state
    let app_state = AppState {
        orchestrator: MatchOrchestrator::new(store),
        matching: settings.matching.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
