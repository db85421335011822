use reqwest::StatusCode;

/// Everything that may go wrong while serving a feed.
///
/// The messages end up in the response body verbatim, so the dashboard users see them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to retrieve data. Status code: {}", status.as_u16())]
    UpstreamFetch { status: StatusCode },

    #[error("Failed to retrieve data: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse the feed document: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Invalid observation date `{value}`, expected `MM/dd/yyyy HH:mm:ss`")]
    DateParse { value: String },

    #[error("Failed to serialize the records: {0}")]
    Serialize(#[source] serde_json::Error),
}
