//! Dashboard-facing HTTP API.

pub mod handlers;
pub mod router;
pub mod state;

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

pub use self::{router::create_router, state::AppState};
use crate::prelude::*;

pub async fn serve(address: SocketAddr, router: Router) -> Result {
    let listener =
        TcpListener::bind(address).await.with_context(|| format!("failed to bind `{address}`"))?;
    info!(%address, "listening…");
    axum::serve(listener, router).await.context("the server has failed")
}
