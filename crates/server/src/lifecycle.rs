//! Server startup and shutdown
//!
//! After a shutdown signal the listener stops accepting connections and
//! in-flight requests get `shutdown_timeout_secs` to finish. Whatever is
//! still running after that is dropped.

use std::future::Future;
use std::time::Duration;

use axum::Router;
use revkv::Store;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::router::build_router;

/// Open a store, bind, and serve until Ctrl-C or SIGTERM
pub async fn serve(config: ServerConfig) -> Result<(), ServerError> {
    let store = Store::with_config(config.store)?;
    let listener = TcpListener::bind(config.socket_addr()).await?;
    info!(
        addr = %listener.local_addr()?,
        max_entries = config.store.max_entries,
        page_size = config.store.page_size,
        "revkv listening"
    );

    serve_until(
        listener,
        build_router(store),
        shutdown_signal(),
        config.shutdown_timeout(),
    )
    .await
}

/// Serve `app` on `listener` until `signal` resolves, then drain
///
/// Returns early with the server's error if it stops on its own.
pub async fn serve_until<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    drain_timeout: Duration,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        joined = &mut server => return finish(joined),
        _ = signal => {}
    }

    info!(
        timeout_secs = drain_timeout.as_secs(),
        "shutdown requested, draining connections"
    );
    let _ = stop_tx.send(());

    match tokio::time::timeout(drain_timeout, &mut server).await {
        Ok(joined) => {
            finish(joined)?;
            info!("server stopped");
            Ok(())
        }
        Err(_) => {
            warn!("drain timed out, dropping open connections");
            server.abort();
            Ok(())
        }
    }
}

fn finish(
    joined: Result<std::io::Result<()>, tokio::task::JoinError>,
) -> Result<(), ServerError> {
    match joined {
        Ok(result) => Ok(result?),
        Err(e) => Err(ServerError::Task(e.to_string())),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
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
