//! Static cloud feeds.
//!
//! Unsigned GETs against the game's static content bucket: the current
//! raffle drawing, the cloud bitbook post, and the cloud gift drop. Each
//! takes the current time in .NET ticks as a cache-busting parameter.

use chrono::Utc;
use serde_json::Value;
use skysync_protocol::{
    payload, BitbookFeedPost, RaffleDetails, SyncError, BITBOOK_FEED_URL, CLOUD_GIFT_FEED_URL,
    RAFFLE_DETAILS_URL,
};

use crate::client::SyncClient;
use crate::save::ticks::datetime_to_ticks;
use crate::transport::{Transport, TransportRequest};

impl<T: Transport> SyncClient<T> {
    /// Details of the current raffle drawing.
    pub fn raffle_details(&self) -> Result<RaffleDetails, SyncError> {
        payload(&self.fetch_feed(RAFFLE_DETAILS_URL)?)
    }

    /// The current cloud bitbook post.
    pub fn bitbook_cloud_feed(&self) -> Result<BitbookFeedPost, SyncError> {
        payload(&self.fetch_feed(BITBOOK_FEED_URL)?)
    }

    /// The current cloud gift drop, if any. The shape varies, so the raw
    /// JSON is returned.
    pub fn cloud_gift_feed(&self) -> Result<Value, SyncError> {
        self.fetch_feed(CLOUD_GIFT_FEED_URL)
    }

    fn fetch_feed(&self, url: &str) -> Result<Value, SyncError> {
        let ticks = datetime_to_ticks(Utc::now());
        tracing::debug!(url, ticks, "fetching static feed");
        let mut request = TransportRequest::get(url);
        request.query.push(("t".to_string(), ticks.to_string()));
        self.transport_execute(request)
            .map_err(|e| SyncError::Transport(e.to_string()))
    }
}
