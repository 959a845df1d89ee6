//! Graceful shutdown on process signals.

use std::io;

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

/// Failure installing one of the shutdown signal handlers.
#[derive(Debug, Error)]
#[error("failed to install {signal} handler: {source}")]
pub(crate) struct ShutdownSignalError {
    signal: &'static str,
    #[source]
    source: io::Error,
}

/// Waits for an interrupt or terminate signal, then asks the server to
/// stop accepting connections and drain in-flight requests.
pub(crate) async fn listen(handle: ServerHandle) -> Result<(), ShutdownSignalError> {
    let interrupt = async {
        signal::ctrl_c().await.map_err(|source| ShutdownSignalError {
            signal: "Ctrl+C",
            source,
        })
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(|source| ShutdownSignalError {
                signal: "SIGTERM",
                source,
            })?
            .recv()
            .await;

        Ok::<(), ShutdownSignalError>(())
    };

    #[cfg(windows)]
    let terminate = async {
        signal::windows::ctrl_c()
            .map_err(|source| ShutdownSignalError {
                signal: "terminate",
                source,
            })?
            .recv()
            .await;

        Ok::<(), ShutdownSignalError>(())
    };

    tokio::select! {
        result = interrupt => {
            result?;
            info!("interrupt received, shutting down");
        }
        result = terminate => {
            result?;
            info!("terminate received, shutting down");
        }
    }

    handle.stop_graceful(None);

    Ok(())
}
