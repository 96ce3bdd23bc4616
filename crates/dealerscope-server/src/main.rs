mod api;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = dealerscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = dealerscope_db::PoolConfig::from_app_config(&config);
    let pool = dealerscope_db::connect_pool(&config.database_url, pool_config).await?;
    dealerscope_db::run_migrations(&pool).await?;

    let places = match config.places_base_url.as_deref() {
        Some(base_url) => dealerscope_places::PlacesClient::with_base_url(
            &config.places_api_key,
            config.places_request_timeout_secs,
            base_url,
        )?,
        None => dealerscope_places::PlacesClient::new(
            &config.places_api_key,
            config.places_request_timeout_secs,
        )?,
    };

    let app = build_app(AppState {
        pool,
        places: Arc::new(places),
        discovery: dealerscope_discovery::DiscoveryConfig::from_app_config(&config),
        default_radius_miles: config.default_radius_miles,
    });

    tracing::info!(bind_addr = %config.bind_addr, env = %config.env, "starting server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
