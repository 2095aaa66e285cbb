use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use tracing::{info, warn};

use super::{connect_and_migrate, load_config};
use crate::auth::provision_admin;
use crate::database::{DatabaseManager, MemoryStorage, PgStorage, Storage};
use crate::state::AppState;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Keep all data in process memory instead of PostgreSQL")]
    pub in_memory: bool,
}

pub async fn handle(args: ServeArgs) -> anyhow::Result<()> {
    let config = load_config()?;
    info!("Starting in {:?} mode", config.environment);

    let (storage, db): (Arc<dyn Storage>, Option<DatabaseManager>) = if args.in_memory {
        warn!("Using in-memory storage; data is lost on exit");
        (Arc::new(MemoryStorage::new()), None)
    } else {
        let db = connect_and_migrate(&config).await?;
        db.health_check().await.context("database health check failed")?;
        (Arc::new(PgStorage::new(db.pool().clone())), Some(db))
    };

    match &config.admin.password {
        Some(password) => {
            provision_admin(storage.clone(), &config.admin.username, password)
                .await
                .context("failed to provision admin user")?;
        }
        None => info!("ADMIN_PASSWORD not set; skipping admin provisioning"),
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let app = crate::app(AppState::new(config, storage));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(db) = db {
        db.close().await;
    }
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
