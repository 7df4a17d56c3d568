use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::{
    catalog::ServiceCatalog,
    runtime,
    storage::JsonFileStore,
};

use crate::routes;
use crate::state::ServerState;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load the app config, falling back to defaults + env vars when no
/// config.toml is present.
fn load_config() -> configs::AppConfig {
    match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(_) => {
            let mut cfg = configs::AppConfig::default();
            if let Ok(host) = env::var("SERVER_HOST") {
                cfg.server.host = host;
            }
            if let Some(port) = env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
                cfg.server.port = port;
            }
            if let Ok(dir) = env::var("DATA_DIR") {
                cfg.storage.data_dir = dir;
            }
            if let Ok(dir) = env::var("FRONTEND_DIR") {
                cfg.storage.frontend_dir = dir;
            }
            cfg
        }
    }
}

fn bind_addr(cfg: &configs::AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config();
    runtime::ensure_env(&cfg.storage.frontend_dir, &cfg.storage.data_dir).await?;

    // Snapshot-backed catalog; every mutation rewrites data/services.json
    let store = JsonFileStore::new(&cfg.storage.data_dir).await?;
    let catalog = ServiceCatalog::new(store)
        .with_read_delay(Duration::from_millis(cfg.catalog.simulated_latency_ms));
    let state = ServerState { catalog: Arc::new(catalog) };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(state, &cfg.storage.frontend_dir, cors);

    // Bind and serve
    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting partner portal server");
    println!("starting partner portal server at {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
