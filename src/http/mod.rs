//! HTTP surface: routing table, server loop and graceful shutdown.

mod error;
mod handlers;
mod response;


use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::infra::NoteStore;
use crate::service::NoteService;

pub use error::ApiError;
pub use handlers::SharedService;
pub use response::{Envelope, ErrorBody, ValidationBody};

/// Builds the routing table for the notes API.
///
/// Unknown paths, and known paths with an unsupported method, answer 404.
pub fn router<S: NoteStore>(service: SharedService<S>) -> Router {
    Router::new()
        .route(
            "/notes",
            get(handlers::list_notes::<S>)
                .post(handlers::create_note::<S>)
                .fallback(handlers::route_not_found),
        )
        .route(
            "/notes/:id",
            get(handlers::get_note::<S>)
                .patch(handlers::update_note::<S>)
                .delete(handlers::delete_note::<S>)
                .fallback(handlers::route_not_found),
        )
        .fallback(handlers::route_not_found)
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

/// Binds `host:port` and serves until Ctrl-C.
pub async fn serve<S: NoteStore>(host: &str, port: u16, service: NoteService<S>) -> Result<()> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr().context("failed to read bound address")?;
    info!(addr = %local, "notes API listening");

    axum::serve(listener, router(Arc::new(service)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl-C, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
