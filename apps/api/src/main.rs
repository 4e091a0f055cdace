use axum_helpers::{create_app, create_router, health_router, TokenService};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::handlers::UsersState;
use domain_users::{InMemoryUserRepository, UserService};
use tracing::info;

mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre before any fallible operation
    install_color_eyre();

    // Load configuration from environment variables; a missing or
    // malformed signing setting fails startup here rather than at the
    // first login.
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let repository = InMemoryUserRepository::new();
    let service = UserService::new(repository);
    let tokens = TokenService::new(config.jwt.clone());

    let state = UsersState {
        service,
        tokens,
        environment: config.environment.clone(),
    };

    let api_routes = domain_users::handlers::router(state);
    let router = create_router::<openapi::ApiDoc>(api_routes);
    let app = router.merge(health_router(config.app));

    info!("Starting {} {}", config.app.name, config.app.version);
    create_app(app, &config.server).await?;

    info!("Shutdown complete");
    Ok(())
}
