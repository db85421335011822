use axum::{
    extract::{Query, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    api::Feed,
    core::{Kind, Record, flatten_demand, flatten_production},
    error::Error,
    http::state::AppState,
    prelude::*,
};

type Flatten = fn(&str) -> Result<Vec<Record>, Error>;

/// The dashboard sends the selected date, but the filtering happens on its side.
#[derive(Deserialize)]
pub struct FeedQuery {
    #[serde(rename = "date")]
    pub date: Option<String>,
}

/// `GET /api/elecDemand`
pub async fn get_demand(State(state): State<AppState>, Query(query): Query<FeedQuery>) -> Response {
    respond(&state.demand, Kind::Demand, flatten_demand, &query).await
}

/// `GET /api/elecProduction`
pub async fn get_production(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Response {
    respond(&state.production, Kind::Production, flatten_production, &query).await
}

/// Always responds with `200 OK`: failures are reported as a plain-text body,
/// the dashboard only checks `response.ok` and then fails to parse it.
#[instrument(skip_all, fields(kind = %kind))]
async fn respond(feed: &Feed, kind: Kind, flatten: Flatten, query: &FeedQuery) -> Response {
    if let Some(date) = &query.date {
        debug!(%date, "ignoring the date filter");
    }
    match fetch_and_flatten(feed, flatten).await {
        Ok(body) => (StatusCode::OK, [(CONTENT_TYPE, "application/json")], body).into_response(),
        Err(error) => {
            warn!(?error, "failed to serve the feed");
            let message = format!("Failed to retrieve {kind} data: {error}");
            (StatusCode::OK, message).into_response()
        }
    }
}

async fn fetch_and_flatten(feed: &Feed, flatten: Flatten) -> Result<String, Error> {
    let text = feed.fetch().await?;
    let records = flatten(&text)?;
    serde_json::to_string(&records).map_err(Error::Serialize)
}
