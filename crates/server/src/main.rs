//! SmartCart checkout server.
//!
//! This binary serves the cart and checkout API on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework
//! - `PostgreSQL` for users, products, carts, orders, and the email outbox
//! - One transaction per checkout: row locks, settlement, order rows, stock
//!   decrements, cart clear, and the confirmation-email enqueue
//! - Background worker drains the email outbox over SMTP
//!
//! # Security
//!
//! Identity arrives pre-authenticated in the `x-user-id` header. This
//! binary trusts the gateway in front of it and must not be exposed
//! directly to the public internet.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Router, routing::get};
use sentry::integrations::tracing as sentry_tracing;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smartcart_server::config::Config;
use smartcart_server::services::{Mailer, OutboxWorker};
use smartcart_server::state::AppState;
use smartcart_server::{db, routes};

/// Start Sentry if a DSN is configured. The returned guard flushes queued
/// events on drop and has to live for the whole process.
fn init_sentry(config: &Config) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            traces_sample_rate: config.sentry_traces_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("sentry error reporting enabled");
    Some(guard)
}

/// Wire up the tracing subscriber: `RUST_LOG` override, JSON output on
/// Fly.io, plain text locally, warnings and errors forwarded to Sentry.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "smartcart_server=info,tower_http=debug".into());

    let is_fly = std::env::var("FLY_APP_NAME").is_ok();
    let json_layer = is_fly.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_fly).then(tracing_subscriber::fmt::layer);

    let sentry_layer = sentry_tracing::layer().event_filter(|metadata| match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_layer)
        .init();
}

#[tokio::main]
async fn main() {
    let config = Config::from_env().expect("Failed to load configuration");

    // Sentry first so the subscriber can forward to it
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");
    tracing::info!("database pool ready");

    // Schema is managed out of band: cargo run -p smartcart-cli -- migrate

    // Checkout enqueues confirmation emails unconditionally; the drain
    // worker only runs when SMTP is configured. Without it rows wait as
    // pending until a worker with SMTP access picks them up.
    if let Some(smtp) = config.smtp() {
        let mailer = Mailer::new(smtp).expect("Failed to create SMTP transport");
        let worker = OutboxWorker::new(pool.clone(), mailer, config.outbox.clone());
        tokio::spawn(worker.run());
    } else {
        tracing::warn!("SMTP not configured, confirmation emails will stay pending");
    }

    let state = AppState::new(config.clone(), pool);

    let app = Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
        // Sentry layers go outermost so every request is covered
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let listen_addr = config.socket_addr();
    tracing::info!("listening on {}", listen_addr);

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness probe. Says nothing about dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness probe: 200 when the database answers, 503 when it does not.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").execute(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Resolve when the process is asked to stop, via Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install interrupt handler");
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
        () = interrupt => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections");
}
