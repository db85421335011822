use bon::Builder;

use crate::api::Feed;

/// Shared by all the handlers, immutable.
#[must_use]
#[derive(Clone, Builder)]
pub struct AppState {
    pub demand: Feed,
    pub production: Feed,
}
