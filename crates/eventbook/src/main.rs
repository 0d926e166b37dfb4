mod app;
mod config;
mod context;
mod events;
mod gateway;
mod handlers;
mod identity;
mod logging;
mod state;
mod storage;
mod users;

use anyhow::Result;
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};

use crate::{
    app::create_app,
    config::Config,
    logging::{LogFormat, Logger},
    state::AppState,
};

/// Eventbook - Browse events and keep a list of the ones you want to attend
#[derive(Parser, Debug)]
#[command(name = "eventbook")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "4000", env = "PORT")]
    port: u16,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "LOG_FORMAT")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_subscriber(cli.log_format);
    let log = Logger::root("eventbook");

    let config = Config::from_env();
    let state = AppState::new(&config, &log).await?;

    // Build the application router
    let app = create_app(state, config.request_timeout());

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!(parent: log.span(), "listening on {}", listener.local_addr()?);

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(log.clone()))
        .await?;

    tracing::info!(parent: log.span(), "Server stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal(log: Logger) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(parent: log.span(), error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(parent: log.span(), error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!(parent: log.span(), "Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!(parent: log.span(), "Received SIGTERM, shutting down...");
        }
    }
}
