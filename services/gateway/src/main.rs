use tracing::info;

use tavola_core::tracing::init_tracing;
use tavola_gateway::config::GatewayConfig;
use tavola_gateway::infra::profiles::HttpProfileDirectory;
use tavola_gateway::infra::provider::{ApiCredentials, HttpIdentityProvider};
use tavola_gateway::router::build_router;
use tavola_gateway::shell::AuthStateFeed;
use tavola_gateway::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = GatewayConfig::from_env();

    // One HTTP client for the whole process; every provider client clones it
    // and shares the connection pool.
    let http = reqwest::Client::new();

    let identity = HttpIdentityProvider::new(
        http.clone(),
        &config.provider_url,
        ApiCredentials::Anon(config.provider_anon_key.clone()),
    );
    let admin_identity = HttpIdentityProvider::new(
        http.clone(),
        &config.provider_url,
        ApiCredentials::ServiceRole(config.provider_service_role_key.clone()),
    );
    let profiles = HttpProfileDirectory::new(
        http,
        &config.profiles_url,
        config.profiles_service_key.clone(),
    );

    let state = AppState {
        identity,
        admin_identity,
        profiles,
        auth_feed: AuthStateFeed::new(),
        jwt_secret: config.jwt_secret,
        cookie_domain: config.cookie_domain,
        site_url: config.site_url,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.gateway_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("gateway listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
