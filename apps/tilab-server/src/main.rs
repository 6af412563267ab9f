//! TILAB server: configuration, logging, database, migrations and HTTP serving.

mod cli;
mod config;
mod logging;

use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use lab_loans::LabLoansModule;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::cli::Cli;
use crate::config::{AppConfig, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    config.apply_cli(&cli);

    if cli.print_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    logging::init_logging(&config.logging)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting tilab-server");

    run(config).await
}

async fn run(config: AppConfig) -> Result<()> {
    let db = connect(&config.database).await?;

    let module = LabLoansModule::new(config.lab_loans.clone());
    if config.database.run_migrations {
        module.migrate(&db).await.context("failed to run migrations")?;
    } else {
        tracing::info!("skipping database migrations");
    }
    module.init(db.clone());

    let router = module
        .register_rest(Router::new())?
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    tracing::info!(bind = %listener.local_addr()?, "listening");

    let cancel = CancellationToken::new();
    tokio::spawn(wait_for_signal(cancel.clone()));

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn connect(config: &DatabaseConfig) -> Result<Arc<DatabaseConnection>> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .with_context(|| format!("failed to connect to database at {}", config.url))?;
    tracing::info!(url = %config.url, "database connected");

    Ok(Arc::new(db))
}

/// Cancel `token` on SIGINT or SIGTERM
async fn wait_for_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received SIGINT (Ctrl+C), initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("received SIGTERM, initiating graceful shutdown");
        },
    }

    token.cancel();
}
