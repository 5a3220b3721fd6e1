use secrecy::ExposeSecret;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use patient_registration::api::{self, AppState};
use patient_registration::config::Config;
use patient_registration::db::{self, PgRegistrationStore};
use patient_registration::jobs::token_expiry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "patient_registration=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting patient registration service...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // The scheduler must outlive the server or its jobs stop firing
    let mut _scheduler = None;

    let state = match &config.service_database_url {
        Some(database_url) => {
            let pool = db::create_pool(database_url.expose_secret()).await?;
            tracing::info!("Database pool created");

            if config.run_migrations {
                db::run_migrations(&pool).await?;
                tracing::info!("Database migrations completed");
            }

            if config.token_sweep_enabled {
                _scheduler = Some(
                    token_expiry::start_scheduler(pool.clone(), &config.token_sweep_schedule)
                        .await?,
                );
            }

            AppState::new(Arc::new(PgRegistrationStore::new(pool)))
        }
        None => {
            tracing::warn!(
                "SERVICE_DATABASE_URL not set; registration requests will fail with 500"
            );
            AppState::unconfigured()
        }
    };

    let app = api::app(state, &config.allowed_origins);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install CTRL+C signal handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, cleaning up...");
}
