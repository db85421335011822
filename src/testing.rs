//! Local stand-in for the upstream feeds.

use axum::{Router, http::StatusCode, routing::get};
use reqwest::Url;
use tokio::net::TcpListener;

use crate::prelude::*;

/// Serve the body with the status on a random local port, and return the feed URL.
pub async fn spawn_upstream(status: StatusCode, body: &'static str) -> Result<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    let router = Router::new().route("/feed.json", get(move || async move { (status, body) }));
    tokio::spawn(async move { axum::serve(listener, router).await });
    Ok(Url::parse(&format!("http://{address}/feed.json"))?)
}
