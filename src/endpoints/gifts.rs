//! Item sending and the gift feed.

use serde_json::json;
use skysync_protocol::{
    classify, payload, Disposition, SyncError, SyncItemType, SyncOp, SyncOutcome, Visits,
};

use crate::auth::fields;
use crate::client::SyncClient;
use crate::config::is_valid_player_id;
use crate::transport::Transport;

impl<T: Transport> SyncClient<T> {
    /// Send an item (a bitizen, a visiting doorman) to another player.
    /// `item_blocks` is the item in block form. Sending to yourself is
    /// routed through the configured burn bot, since the servers refuse
    /// self-sends.
    pub fn send_item(
        &self,
        item_type: SyncItemType,
        send_to: &str,
        item_blocks: &str,
    ) -> Result<SyncOutcome<()>, SyncError> {
        let (mut from_id, mut from_ss) = self.require_authenticated()?;
        if !is_valid_player_id(send_to) {
            return Err(SyncError::invalid("send-to id", send_to));
        }
        if send_to == from_id {
            match &self.config().burn_bot {
                Some(bot) => {
                    from_id = bot.player_id.as_str();
                    from_ss = bot.player_ss.as_str();
                }
                None => return Err(SyncError::NotAuthenticated),
            }
        }
        tracing::info!(%item_type, send_to, "sending item");

        let salt = self.next_salt();
        let hash_input =
            fields::item_send(item_type.literal(), from_id, send_to, salt, item_blocks, from_ss);
        let response = self.post(
            SyncOp::SendItem,
            &format!("{item_type}/{from_id}/{send_to}/{salt}"),
            hash_input,
            json!({ "itemStr": item_blocks }),
        )?;

        match classify(&response, "Sent")? {
            Disposition::Negative(negative) => Ok(SyncOutcome::Negative(negative)),
            Disposition::Positive => Ok(SyncOutcome::Success(())),
        }
    }

    /// List the gifts waiting for the player.
    pub fn get_gifts(&self) -> Result<SyncOutcome<Visits>, SyncError> {
        let (player_id, player_ss) = self.require_authenticated()?;
        tracing::info!(player_id, "fetching gifts");

        let salt = self.next_salt();
        let hash_input = fields::standard(player_id, salt, player_ss);
        let response = self.get(SyncOp::GetGifts, &format!("{player_id}/{salt}"), hash_input)?;

        match classify(&response, "Found")? {
            Disposition::Negative(negative) => Ok(SyncOutcome::Negative(negative)),
            Disposition::Positive => Ok(SyncOutcome::Success(payload(&response)?)),
        }
    }

    /// Mark a gift as received so it leaves the feed.
    pub fn receive_gift(&self, gift_id: &str) -> Result<SyncOutcome<()>, SyncError> {
        let (player_id, player_ss) = self.require_authenticated()?;
        tracing::info!(player_id, gift_id, "receiving gift");

        let salt = self.next_salt();
        let hash_input = fields::gift_receive(player_id, gift_id, salt, player_ss);
        let response = self.get(
            SyncOp::ReceiveGift,
            &format!("{player_id}/{gift_id}/{salt}"),
            hash_input,
        )?;

        match classify(&response, "Received")? {
            Disposition::Negative(negative) => Ok(SyncOutcome::Negative(negative)),
            Disposition::Positive => Ok(SyncOutcome::Success(())),
        }
    }
}
