use std::net::SocketAddr;

use tokio::signal;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use questionnaire::config::Config;
use questionnaire::db;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(&config.log_level)
        }))
        .init();

    tracing::info!("Starting questionnaire service");

    // No storage, no service: any failure here aborts startup.
    let pool = db::connect(&config.database_url, config.db_max_connections).await?;
    db::init_schema(&pool).await?;

    tracing::info!("Schema ready at {}", config.database_url);

    let addr = SocketAddr::new(config.host, config.port);
    let grace = config.shutdown_grace;
    let app = questionnaire::build_app(pool.clone(), config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {addr}");

    let (signalled_tx, mut signalled_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = signalled_tx.send(true);
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            result??;
        }
        _ = signalled_rx.changed() => {
            match tokio::time::timeout(grace, &mut server).await {
                Ok(result) => result??,
                Err(_) => {
                    tracing::warn!("In-flight requests still running after {grace:?}, aborting");
                    server.abort();
                }
            }
        }
    }

    pool.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
