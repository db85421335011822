pub mod client;
pub mod feed;

pub use self::feed::Feed;
