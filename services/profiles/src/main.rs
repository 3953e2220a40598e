use sea_orm::Database;
use tracing::info;

use tavola_core::config::Config as _;
use tavola_core::tracing::init_tracing;
use tavola_profiles::config::ProfilesConfig;
use tavola_profiles::router::build_router;
use tavola_profiles::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ProfilesConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        service_key: config.service_key,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.profiles_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("profiles service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
