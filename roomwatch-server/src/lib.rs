use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::app::create_app;
use crate::configs::{FileStorage, Settings};
use crate::repositories::SnapshotRepository;
use crate::services::{RegistryService, SweeperService};

pub mod app;
pub mod configs;
pub mod errors;
pub mod handles;
pub mod models;
pub mod repositories;
pub mod services;

pub async fn run(settings: &Arc<Settings>) -> anyhow::Result<()> {
    let storage = FileStorage::new(&settings.snapshot.directory)
        .await
        .with_context(|| format!("cannot open snapshot directory {}", settings.snapshot.directory))?;
    tracing::info!("snapshots stored in {}", storage.directory().display());

    let registry_service = Arc::new(
        RegistryService::load(SnapshotRepository::new(Arc::new(storage)))
            .await
            .context("failed to load catalog snapshots")?,
    );

    let shutdown = CancellationToken::new();

    let sweeper = SweeperService::new(registry_service.clone(), &settings.sweeper)
        .start(shutdown.clone());

    let served = serve(settings, create_app(registry_service), shutdown.clone()).await;

    shutdown.cancel();
    sweeper.stop().await;

    served
}

async fn serve(
    settings: &Settings,
    app: axum::Router,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let ip_addr = settings
        .server
        .host
        .parse::<IpAddr>()
        .context("invalid server host")?;

    let address = SocketAddr::from((ip_addr, settings.server.port));

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    tracing::info!("listening on {:?}", address);

    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            tokio::select! {
                _ = shutdown_signal() => tracing::info!("shutdown requested"),
                _ = shutdown.cancelled() => {}
            }
            shutdown.cancel();
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
