//! HTTP server publishing the rendered dashboard.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use log::info;
use tokio::net::TcpListener;

/// Shared state of the request handlers.
#[derive(Debug)]
struct AppState {
    page: String,
}

/// Creates the router: `GET /` returns the page, `GET /health` returns `ok`.
pub fn router(page: String) -> Router {
    let state = Arc::new(AppState { page });
    Router::new()
        .route("/", get(get_page))
        .route("/health", get(health))
        .with_state(state)
}

/// Serves the page on the given address until the process receives Ctrl+C.
pub async fn serve(addr: SocketAddr, page: String) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Serving dashboard on http://{}", listener.local_addr()?);
    println!("Dashboard is available at http://{}", listener.local_addr()?);

    axum::serve(listener, router(page))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

async fn get_page(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.clone())
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
