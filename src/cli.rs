use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use reqwest::{Client, Url};

use crate::{api::Feed, core::Kind};

pub const DEFAULT_DEMAND_URL: &str =
    "https://www.hydroquebec.com/data/documents-donnees/donnees-ouvertes/json/demande.json";
pub const DEFAULT_PRODUCTION_URL: &str =
    "https://www.hydroquebec.com/data/documents-donnees/donnees-ouvertes/json/production.json";

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub feeds: FeedArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the flattened feeds to the dashboard.
    #[clap(name = "serve")]
    Serve(ServeArgs),

    /// Fetch and flatten a single feed, and print it as a table.
    #[clap(name = "inspect")]
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct FeedArgs {
    #[clap(long = "demand-url", env = "DEMAND_URL", default_value = DEFAULT_DEMAND_URL)]
    pub demand_url: Url,

    #[clap(long = "production-url", env = "PRODUCTION_URL", default_value = DEFAULT_PRODUCTION_URL)]
    pub production_url: Url,
}

impl FeedArgs {
    pub fn feed(&self, client: &Client, kind: Kind) -> Feed {
        let url = match kind {
            Kind::Demand => &self.demand_url,
            Kind::Production => &self.production_url,
        };
        Feed::new(client.clone(), url.clone())
    }
}

#[derive(Parser)]
pub struct ServeArgs {
    #[clap(long = "bind", env = "BIND_ADDRESS", default_value = "0.0.0.0:5037")]
    pub address: SocketAddr,

    /// The only origin allowed to call the API, normally the dashboard.
    #[clap(long = "allowed-origin", env = "ALLOWED_ORIGIN", default_value = "http://localhost:3000")]
    pub allowed_origin: String,
}

#[derive(Parser)]
pub struct InspectArgs {
    #[clap(value_enum)]
    pub kind: Kind,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_verify_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["gridfeed", "serve"]);
        assert_eq!(args.feeds.demand_url.as_str(), DEFAULT_DEMAND_URL);
        assert_eq!(args.feeds.production_url.as_str(), DEFAULT_PRODUCTION_URL);
        let Command::Serve(serve) = args.command else {
            panic!("expected `serve`");
        };
        assert_eq!(serve.address.port(), 5037);
        assert_eq!(serve.allowed_origin, "http://localhost:3000");
    }

    #[test]
    fn test_inspect_production() {
        let args = Args::parse_from(["gridfeed", "inspect", "production"]);
        assert!(matches!(args.command, Command::Inspect(InspectArgs { kind: Kind::Production })));
    }
}
