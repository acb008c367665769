use axum::Router;
use eyre::Report;
use payrail_primitives::models::AppConfig;
use std::net::SocketAddr;
use tracing::info;

pub async fn serve(router: Router, config: &AppConfig) -> Result<(), Report> {
    let addr: SocketAddr = config
        .bind_addr()
        .parse()
        .map_err(|e| eyre::eyre!("Invalid bind address {:?}: {}", config.bind_addr(), e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Payrail listening on http://{}", addr);
    info!(
        "API docs: {}/swagger-ui/  metrics: {}/metrics",
        config.app_url, config.app_url
    );

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Ctrl+C received, draining in-flight requests"),
        _ = terminate => info!("SIGTERM received, draining in-flight requests"),
    }
}
