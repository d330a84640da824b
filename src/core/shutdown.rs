use tokio::signal;

/// Resolves on Ctrl+C or, on unix, SIGTERM.
pub(crate) async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        let Ok(mut stream) = signal::unix::signal(signal::unix::SignalKind::terminate()) else {
            tracing::error!("Failed to listen for SIGTERM");
            return std::future::pending::<()>().await;
        };
        stream.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!(signal = "SIGINT", "Stopping inventory service"),
        _ = terminate => tracing::info!(signal = "SIGTERM", "Stopping inventory service"),
    }
}
