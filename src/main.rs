mod api;
mod cli;
mod core;
mod error;
mod http;
mod prelude;
mod tables;
#[cfg(test)]
mod testing;

use axum::http::HeaderValue;
use clap::{Parser, crate_version};

use crate::{
    api::{Feed, client},
    cli::{Args, Command, InspectArgs, ServeArgs},
    core::{Kind, Record, flatten},
    http::{AppState, create_router},
    prelude::*,
    tables::build_records_table,
};

#[tokio::main]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let client = client::try_new()?;

    match args.command {
        Command::Serve(serve_args) => {
            let state = AppState::builder()
                .demand(args.feeds.feed(&client, Kind::Demand))
                .production(args.feeds.feed(&client, Kind::Production))
                .build();
            serve(serve_args, state).await?;
        }
        Command::Inspect(InspectArgs { kind }) => {
            inspect(&args.feeds.feed(&client, kind), kind).await?;
        }
    }

    info!("done!");
    Ok(())
}

async fn serve(args: ServeArgs, state: AppState) -> Result {
    let allowed_origin = HeaderValue::from_str(&args.allowed_origin)
        .with_context(|| format!("invalid allowed origin `{}`", args.allowed_origin))?;
    info!(demand_url = %state.demand.url(), production_url = %state.production.url(), "serving…");
    http::serve(args.address, create_router(state, allowed_origin)).await
}

#[instrument(skip_all, fields(kind = %kind))]
async fn inspect(feed: &Feed, kind: Kind) -> Result {
    let layout = kind.layout();
    let records = flatten(&feed.fetch().await?, layout)?;
    if let Some(Record::Metadata(metadata)) = records.first() {
        info!(
            date_start = ?metadata.date_start,
            date_end = ?metadata.date_end,
            recent_hour = ?metadata.recent_hour,
            metadata.most_recent_index,
            metadata.n_dates_with_data,
            "gotcha",
        );
    }
    println!("{}", build_records_table(layout, &records));
    Ok(())
}
