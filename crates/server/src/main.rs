//! BrightDesk CRM backend server.
//!
//! Serves the JSON query surface and runs the in-process maintenance jobs
//! (heartbeat, low-stock restocking, weekly report). The order-reminder
//! job lives in the CLI so its outcome can drive an exit code.

#![cfg_attr(not(test), forbid(unsafe_code))]

use brightdesk_server::config::CrmConfig;
use brightdesk_server::jobs::{HeartbeatJob, LogSink, LowStockJob, ReportJob, heartbeat, low_stock, report};
use brightdesk_server::state::AppState;
use brightdesk_server::{app, db};

#[tokio::main]
async fn main() {
    // Load .env if present; real environment wins.
    dotenvy::dotenv().ok();

    let config = CrmConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter.
    // Defaults to info level for our crate if RUST_LOG is not set.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "brightdesk_server=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created");

    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Migrations applied");

    // Background jobs. Each loop awaits its own run before the next tick,
    // so a single process never overlaps runs of the same job.
    HeartbeatJob::new(
        config.local_base_url(),
        LogSink::for_job(heartbeat::LOG_FILE, &config.base_dir),
        config.heartbeat_interval,
    )
    .spawn();
    LowStockJob::new(
        pool.clone(),
        LogSink::for_job(low_stock::LOG_FILE, &config.base_dir),
        config.low_stock_interval,
    )
    .spawn();
    ReportJob::new(
        pool.clone(),
        LogSink::for_job(report::LOG_FILE, &config.base_dir),
        config.report_interval,
    )
    .spawn();

    let addr = config.socket_addr();
    let state = AppState::new(config, pool);
    let router = app(state);

    tracing::info!("CRM backend listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
