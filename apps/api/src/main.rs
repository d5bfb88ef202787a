mod config;
mod errors;
mod extract;
mod metrics;
mod notification;
mod routes;
mod scheduling;
mod screening;
mod state;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::metrics::MetricsAggregator;
use crate::notification::SmtpMailer;
use crate::routes::build_router;
use crate::scheduling::ledger::InterviewLedger;
use crate::scheduling::zoom::ZoomScheduler;
use crate::screening::catalog::RoleCatalog;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; missing credentials must fail here, not
    // mid-evaluation.
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screening API v{}", env!("CARGO_PKG_VERSION"));

    // Role catalog: built-in reference roles, or an operator-supplied file.
    let catalog = match &config.role_catalog_path {
        Some(path) => RoleCatalog::from_json_file(path)
            .with_context(|| format!("loading role catalog from '{path}'"))?,
        None => RoleCatalog::builtin(),
    };
    catalog.validate().context("validating role catalog")?;
    info!("Role catalog loaded ({} roles)", catalog.profiles().count());

    // Mail relay client
    let mailer = SmtpMailer::new(
        &config.smtp_host,
        &config.sender_email,
        &config.email_app_password,
    )
    .context("configuring SMTP relay")?;
    info!("SMTP relay configured ({})", config.smtp_host);

    // Conferencing client
    let scheduler = ZoomScheduler::new(
        config.zoom_oauth_base.clone(),
        config.zoom_api_base.clone(),
        config.zoom_account_id.clone(),
        config.zoom_client_id.clone(),
        config.zoom_client_secret.clone(),
        config.interview_tz_offset,
    );
    info!("Conferencing client initialized");

    let port = config.port;
    let state = AppState {
        config,
        catalog: Arc::new(catalog),
        scheduler: Arc::new(scheduler),
        mailer: Arc::new(mailer),
        metrics: Arc::new(Mutex::new(MetricsAggregator::default())),
        ledger: Arc::new(Mutex::new(InterviewLedger::default())),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
