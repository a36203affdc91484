//! The HTTP surface of the adapter: one `POST` route per operation, each taking a JSON body.
//!
//! Routes keep the names of the cloud functions they replace.

use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::command::{KeyRequest, UpsertRequest};
use crate::{Entity, RecordAdapter, Result, SquaresError, StoreEngine};

/// route of the upsert handler
pub const UPSERT_PATH: &str = "/setInfinityOneSquare";
/// route of the get handler
pub const GET_PATH: &str = "/getInfinityOneSquare";
/// route of the delete handler
pub const DELETE_PATH: &str = "/delInfinityOneSquare";

/// An HTTP server implementation over a [`StoreEngine`].
/// It exposes the upsert, get and delete handlers of a [`RecordAdapter`] as `POST` routes
/// that accept a JSON body.
///
/// Store calls are blocking, so every request runs its store call on tokio's blocking pool.
///
/// # Example
/// Create and run a server listening on "127.0.0.1:4000", keeping its entities in memory
/// ```rust,no_run
/// use squares::{MemoryStore, SquaresServer};
/// # async fn run() -> squares::Result<()> {
/// let server = SquaresServer::new(MemoryStore::new());
/// server.run("127.0.0.1:4000".parse().expect("valid address")).await?;
/// # Ok(())
/// # }
/// ```
pub struct SquaresServer<E: StoreEngine> {
    adapter: RecordAdapter<E>,
}

impl<E: StoreEngine> SquaresServer<E> {
    /// Create a new `SquaresServer` using the given [`StoreEngine`] implementation.
    pub fn new(engine: E) -> Self {
        SquaresServer {
            adapter: RecordAdapter::new(engine),
        }
    }

    /// builds the router holding the three handlers
    pub fn router(&self) -> Router {
        Router::new()
            .route(UPSERT_PATH, post(upsert::<E>))
            .route(GET_PATH, post(get::<E>))
            .route(DELETE_PATH, post(delete::<E>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.adapter.clone())
    }

    /// binds to the given address and serves requests until the process receives Ctrl-C
    ///
    /// # Errors
    /// returns [`SquaresError::Io`] if the server could not be started
    pub async fn run(self, addr: SocketAddr) -> Result<()> {
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// serves requests on an already bound `listener` until the process receives Ctrl-C
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        info!("Listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("server stopped");
        Ok(())
    }
}

async fn upsert<E: StoreEngine>(
    State(adapter): State<RecordAdapter<E>>,
    body: std::result::Result<Json<UpsertRequest>, JsonRejection>,
) -> Result<String> {
    let req = decode(body)?;
    debug!("Receive upsert request: {:?}", req);
    run_blocking(move || adapter.upsert(req)).await
}

async fn get<E: StoreEngine>(
    State(adapter): State<RecordAdapter<E>>,
    body: std::result::Result<Json<KeyRequest>, JsonRejection>,
) -> Result<Json<Entity>> {
    let req = decode(body)?;
    debug!("Receive get request: {:?}", req);
    run_blocking(move || adapter.get(&req)).await.map(Json)
}

async fn delete<E: StoreEngine>(
    State(adapter): State<RecordAdapter<E>>,
    body: std::result::Result<Json<KeyRequest>, JsonRejection>,
) -> Result<String> {
    let req = decode(body)?;
    debug!("Receive delete request: {:?}", req);
    run_blocking(move || adapter.delete(&req)).await
}

/// turns a body that could not be decoded into a [`SquaresError::InvalidBody`], so it is
/// answered like every other failure
fn decode<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    match body {
        Ok(Json(req)) => Ok(req),
        Err(rejection) => {
            let err = SquaresError::InvalidBody(rejection.body_text());
            error!("{}", err);
            Err(err)
        }
    }
}

async fn run_blocking<T, F>(op: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op).await?
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("could not listen for the shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
