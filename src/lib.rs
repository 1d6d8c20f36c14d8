pub mod application_state;
pub mod config;
pub mod error;
pub mod motor;
pub mod routes;
pub mod services;
pub mod utils;

use axum::extract::ConnectInfo;
use axum::http::Request;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

use crate::application_state::{AppStateMutex, ApplicationState};
use crate::config::AppConfig;
use crate::error::MotorError;

pub fn configure_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
                info!("RUST_LOG not set, using default log level 'info'");
                EnvFilter::new("info") // Default log level if not set
            }),
        )
        .with_thread_ids(true)
        .with_thread_names(false)
        .with_writer(std::io::stdout) // log to stdout for compat with containerized environments
        .init();
}

/// Attaches the chassis hardware and builds the Axum application with routes
/// and shared state. A TraceLayer is added for logging client request details.
/// Fails if the pins cannot be resolved and claimed; the service must not
/// come up partially configured.
pub fn build_app(app_config: AppConfig) -> Result<(AppStateMutex, Router), MotorError> {
    let app_state = Arc::new(Mutex::new(ApplicationState::attach(app_config)?));

    let app = Router::new()
        .route("/", get(routes::root))
        .route("/status", get(routes::status::detailed_health))
        .route("/status/raw", get(routes::status::raw_status))
        .route("/drive/{code}", get(routes::drive::drive_chassis))
        .route("/reset", post(routes::reset::open_session))
        .with_state(app_state.clone())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_ip_addr = request
                    .extensions()
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.to_string())
                    .unwrap_or_else(|| "unknown".to_string());

                // '%' is tracing syntax used to format the span name
                tracing::span!(
                    Level::INFO,
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    client_ip = %request_ip_addr,
                )
            }),
        );

    Ok((app_state, app))
}

pub async fn start_server(app: Router, config: AppConfig) {
    let bind_address: SocketAddr = format!("{}", config.api.listen_address).parse().unwrap();
    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .expect("Failed to bind to address");

    let shutdown_handler = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received shutdown signal, shutting down gracefully...");
    };

    info!("Starting server, API listening on {}", bind_address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_handler)
    .await
    .expect("Failed to start server");
}
