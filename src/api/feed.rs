use reqwest::{Client, Url};

use crate::{error::Error, prelude::*};

/// One of the utility open-data JSON feeds.
#[must_use]
#[derive(Clone)]
pub struct Feed {
    client: Client,
    url: Url,
}

impl Feed {
    pub const fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch the raw document text, failing on any non-success status.
    #[instrument(skip_all, fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<String, Error> {
        info!("fetching…");
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "the feed has failed");
            return Err(Error::UpstreamFetch { status });
        }
        let text = response.text().await?;
        info!(%status, n_bytes = text.len(), "fetched");
        Ok(text)
    }
}
