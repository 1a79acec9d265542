use std::net::SocketAddr;

use axum::Router;
use axum::routing::any;
use tasker_store::TaskStore;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::router::{self, API_BASE, TaskRouter};

/// Listen address.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8888,
        }
    }
}

/// Build the full application router with all routes and layers.
pub fn build_router(store: TaskStore) -> Router {
    Router::new()
        .nest(API_BASE, TaskRouter::new(store).routes())
        .route(&format!("{API_BASE}/"), any(router::missing_category))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Bind and start serving. Port 0 picks a free port.
pub async fn start(config: ServerConfig, store: TaskStore) -> Result<ServerHandle, std::io::Error> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr = listener.local_addr()?;
    let router = build_router(store);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        let shutdown = async move {
            let _ = shutdown_rx.await;
        };
        if let Err(e) = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
        {
            tracing::error!(error = %e, "server stopped with error");
        }
    });

    tracing::info!(url = %format!("http://{addr}{API_BASE}"), "Tasker API listening");

    Ok(ServerHandle {
        addr,
        shutdown: shutdown_tx,
        server,
    })
}

/// Handle returned by `start()`; keeps the server task alive.
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    server: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Stop accepting connections and wait for in-flight requests.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.server.await {
            tracing::warn!(error = %e, "server task did not shut down cleanly");
        }
        tracing::info!("server stopped");
    }
}
