//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// Thin axum projection of the matching engine core. Two routes, matching the
// external HTTP contract: POST /place_trade and GET /get_orderbook/:symbol,
// plus a health check for ops.
//--------------------------------------------------------------------------------------------------

mod dto;
mod error;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::core::MultiBook;

pub use error::{ApiError, ApiResult};

/// HTTP front end over a shared `MultiBook`.
pub struct Api {
    addr: SocketAddr,
    multi_book: Arc<MultiBook>,
}

impl Api {
    pub fn new(addr: SocketAddr, multi_book: Arc<MultiBook>) -> Self {
        Self { addr, multi_book }
    }

    pub fn routes(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST])
            .allow_origin(tower_http::cors::Any);

        Router::new()
            .route("/healthz", get(routes::health))
            .route("/place_trade", post(routes::place_trade))
            .route("/get_orderbook/:symbol", get(routes::get_orderbook))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.multi_book.clone())
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let app = self.routes();
        info!(addr = %self.addr, "listening");
        let listener = TcpListener::bind(self.addr).await?;
        axum::serve(listener, app).await?;
        Ok(())
    }
}
