use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::{InMemoryUserRepository, UserDirectory};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let state = AppState {
        config,
        users: UserDirectory::new(InMemoryUserRepository::new()),
    };

    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.cors)?;

    // Merge probe endpoints at the root
    let app = router
        .merge(health_router(state.config.app))
        .merge(api::ping::router());

    info!(
        environment = ?state.config.environment,
        "Starting Users API (shutdown timeout {:?})",
        state.config.server.shutdown_timeout
    );

    let directory = state.users.clone();
    create_production_app(app, &state.config.server, async move {
        // The table lives only in memory and is dropped with the process
        match directory.list().await {
            Ok(remaining) => info!(users = remaining.len(), "Discarding in-memory users"),
            Err(e) => tracing::warn!("Could not read users during shutdown: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
