use sea_orm::{ConnectOptions, Database};
use tracing::info;

use scanpass_core::config::Config;
use scanpass_core::tracing::init_tracing;

use scanpass_codes::config::CodesConfig;
use scanpass_codes::router::build_router;
use scanpass_codes::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = CodesConfig::from_env().expect("failed to load config from environment");

    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .connect_timeout(config.storage_timeout())
        .acquire_timeout(config.storage_timeout())
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("failed to connect to database");

    let state = AppState::new(db, &config.public_base_url, config.storage_timeout());

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.codes_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("codes service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
