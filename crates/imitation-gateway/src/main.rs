use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod app;
mod http;
mod transport;
mod ws;

/// Bounded grace period after a shutdown signal before the process exits
/// regardless of whether in-flight sessions have wound down.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = imitation_core::config::Settings::load();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&settings.server.log_filter)
                .unwrap_or_else(|_| "imitation_gateway=info,tower_http=info".into()),
        )
        .init();

    let bind_addr = settings.server.bind_addr.clone();
    let state = Arc::new(app::AppState::new(settings));
    let shutdown = state.shutdown.clone();
    let router = app::build_router(state);

    let addr: SocketAddr = bind_addr.parse()?;
    info!(%addr, "imitation gateway listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    Ok(())
}

/// Waits for SIGINT/SIGTERM, trips the shared shutdown token so background
/// tasks can observe it, then gives in-flight sessions `SHUTDOWN_GRACE`
/// before letting Axum's graceful-shutdown future resolve and the process
/// exit.
async fn shutdown_signal(shutdown: tokio_util::sync::CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received, draining in-flight sessions");
    shutdown.cancel();
    tokio::time::sleep(SHUTDOWN_GRACE).await;
}
