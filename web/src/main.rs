use movie_search::{PageController, SearchClient};
use std::sync::Arc;
use web::ServerConfig;

#[tokio::main]
async fn main() {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let client = SearchClient::new(config.client.clone());
    match client.health().await {
        Ok(health) if health.is_ok() => log::info!("Backend at {} is healthy", config.client.base_url()),
        Ok(health) => log::warn!("Backend at {} reported {:?}", config.client.base_url(), health.status),
        Err(e) => log::warn!("Backend at {} is unreachable: {}", config.client.base_url(), e),
    }

    let app = web::router(Arc::new(PageController::new(client)));

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };
    log::info!("Listening on {}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
