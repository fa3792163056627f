//! Startup sequencer: connect to the document store, then listen.
//!
//! The order is fixed. Pure configuration (route table, middleware, CORS)
//! is built first and needs no database. The single bounded connection
//! attempt comes next. Only when it succeeds is the TCP listener bound. Any
//! failure before the bind moves the [`Lifecycle`] to
//! [`ServerPhase::Terminated`](crate::domain::ServerPhase::Terminated) and
//! returns the error, and the caller exits the process with status 1.

use std::future::Future;
use std::sync::Arc;

use axum::ServiceExt;
use axum::extract::Request;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::api::{self, RouteTable};
use crate::app_state::AppState;
use crate::config::{DatabaseConfig, ServerConfig};
use crate::domain::Lifecycle;
use crate::error::StartupError;
use crate::middleware;
use crate::middleware::path::{self, App};
use crate::persistence::SharedStore;
use crate::persistence::postgres::PostgresDocumentStore;

/// Builds the routed, layered application without state.
///
/// # Errors
///
/// Returns [`StartupError`] if the route table or CORS configuration is
/// invalid.
pub fn build_app(config: &ServerConfig) -> Result<axum::Router<AppState>, StartupError> {
    let table = RouteTable::standard()?;
    let router = api::build_router(&table);
    Ok(middleware::apply(router, config, &table)?)
}

/// Connects to PostgreSQL and returns the shared store handle.
///
/// # Errors
///
/// See [`PostgresDocumentStore::connect`].
pub async fn connect_postgres(database: DatabaseConfig) -> Result<SharedStore, StartupError> {
    let store = PostgresDocumentStore::connect(&database).await?;
    Ok(Arc::new(store))
}

/// Runs the server until `shutdown` resolves.
///
/// `connect` is awaited exactly once; the listener is bound only after it
/// yields a store.
///
/// # Errors
///
/// Returns [`StartupError`] if configuration is invalid, the connection
/// attempt fails, the listener cannot be bound, or the server loop fails.
pub async fn run<C, S>(
    config: ServerConfig,
    lifecycle: Lifecycle,
    connect: C,
    shutdown: S,
) -> Result<(), StartupError>
where
    C: Future<Output = Result<SharedStore, StartupError>>,
    S: Future<Output = ()> + Send + 'static,
{
    let (listener, app) = match prepare(&config, &lifecycle, connect).await {
        Ok(ready) => ready,
        Err(err) => {
            error!(error = %err, "startup failed");
            if let Err(e) = lifecycle.mark_terminated() {
                warn!(error = %e, "could not record termination");
            }
            return Err(err);
        }
    };

    let addr = listener.local_addr().map_err(StartupError::Serve)?;
    lifecycle.mark_listening(addr)?;
    info!(%addr, "server listening");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(StartupError::Serve)?;

    info!("server stopped");
    Ok(())
}

async fn prepare<C>(
    config: &ServerConfig,
    lifecycle: &Lifecycle,
    connect: C,
) -> Result<(TcpListener, App), StartupError>
where
    C: Future<Output = Result<SharedStore, StartupError>>,
{
    let app = build_app(config)?;

    info!(
        timeout_secs = config.database.connect_timeout.as_secs(),
        "connecting to database"
    );
    let store = connect.await?;
    info!("connected to database");

    let app = path::normalize(app.with_state(AppState::new(store, lifecycle.clone())));

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    Ok((listener, app))
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
