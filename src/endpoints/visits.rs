//! Player visits.

use skysync_codec::catalog::save_schema;
use skysync_protocol::{
    classify, payload, Disposition, SyncError, SyncItemType, SyncOp, SyncOutcome, Visits,
};

use crate::auth::fields;
use crate::client::SyncClient;
use crate::save::extract::extract_field;
use crate::transport::Transport;

impl<T: Transport> SyncClient<T> {
    /// Visit a player: download our own save, extract the doorman, and
    /// send it as a Visit item so they can visit back.
    pub fn visit_player(&self, friend_id: &str) -> Result<SyncOutcome<()>, SyncError> {
        tracing::info!(friend_id, "visiting player");
        let save = match self.download_save()? {
            SyncOutcome::Success(save) => save,
            SyncOutcome::Negative(negative) => return Ok(SyncOutcome::Negative(negative)),
        };
        let doorman = extract_field(&save.blocks, save_schema(), "doorman")?;
        self.send_item(SyncItemType::Visit, friend_id, &doorman)
    }

    /// List visits waiting for the player.
    pub fn get_visits(&self) -> Result<SyncOutcome<Visits>, SyncError> {
        let (player_id, player_ss) = self.require_authenticated()?;
        tracing::info!(player_id, "fetching visits");

        let salt = self.next_salt();
        let hash_input = fields::standard(player_id, salt, player_ss);
        let response = self.get(SyncOp::GetVisits, &format!("{player_id}/{salt}"), hash_input)?;

        match classify(&response, "Found")? {
            Disposition::Negative(negative) => Ok(SyncOutcome::Negative(negative)),
            Disposition::Positive => Ok(SyncOutcome::Success(payload(&response)?)),
        }
    }
}
