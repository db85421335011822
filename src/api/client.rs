use reqwest::Client;

use crate::prelude::*;

/// Build the client shared by all the feeds.
///
/// The feeds are fetched as is: no custom headers and the default timeouts.
pub fn try_new() -> Result<Client> {
    Client::builder().build().context("failed to build the HTTP client")
}
