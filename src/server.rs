use std::{future::Future, io, net::SocketAddr, time::Duration};

use tokio::{net::TcpListener, sync::oneshot};
use tracing::{debug, info, warn};

use crate::{api, context::Context};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("server failed: {0}")]
    Serve(#[source] io::Error),
    #[error("server task panicked: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub struct Config {
    pub port: u16,
    pub shutdown_grace_period: Duration,
}

/// Serves the API until SIGINT/SIGTERM, then drains in-flight requests for at most the
/// configured grace period.
pub async fn run(context: Context, config: Config) -> Result<(), ServerError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!(%addr, "Server started");

    serve(
        listener,
        context,
        config.shutdown_grace_period,
        shutdown_signal(),
    )
    .await
}

async fn serve(
    listener: TcpListener,
    context: Context,
    shutdown_grace_period: Duration,
    signal: impl Future<Output = ()>,
) -> Result<(), ServerError> {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let app = api::router(context);

    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
    });

    signal.await;
    info!("Shutting down server…");

    request_shutdown(shutdown_tx);

    match tokio::time::timeout(shutdown_grace_period, server).await {
        Ok(result) => {
            result?.map_err(ServerError::Serve)?;

            info!("Server exited");
        }
        Err(_) => warn!(
            grace_period = ?shutdown_grace_period,
            "Server forced to shutdown with requests still in flight"
        ),
    }

    Ok(())
}

/// Returns `false` when the server task had already stopped listening for the signal.
fn request_shutdown(shutdown_tx: oneshot::Sender<()>) -> bool {
    match shutdown_tx.send(()) {
        Ok(()) => true,
        Err(()) => {
            debug!("Server task exited before the shutdown signal was sent");

            false
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(?error, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                warn!(?error, "Failed to listen for SIGTERM");
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
