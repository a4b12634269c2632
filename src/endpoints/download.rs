//! Cloud save download.

use skysync_codec::decompress_save;
use skysync_protocol::{
    classify, payload, Disposition, DownloadedSave, Envelope, SyncError, SyncOp, SyncOutcome,
};

use crate::auth::{fields, validate};
use crate::client::SyncClient;
use crate::transport::Transport;

/// A downloaded, validated, decompressed cloud save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudSave {
    /// Version the servers hold.
    pub version: u32,
    /// The save in decompressed block form.
    pub blocks: String,
}

impl<T: Transport> SyncClient<T> {
    /// Download the player's current cloud save. Validates the response
    /// hash over the compressed payload before decompressing.
    pub fn download_save(&self) -> Result<SyncOutcome<CloudSave>, SyncError> {
        let (player_id, player_ss) = self.require_authenticated()?;
        tracing::info!(player_id, "downloading current cloud save");

        let salt = self.next_salt();
        let hash_input = fields::standard(player_id, salt, player_ss);
        let response = self.get(SyncOp::PullSave, &format!("{player_id}/{salt}"), hash_input)?;

        match classify(&response, "Found")? {
            Disposition::Negative(negative) => Ok(SyncOutcome::Negative(negative)),
            Disposition::Positive => {
                let save: DownloadedSave = payload(&response)?;
                let envelope = Envelope::from_value(&response)?;
                let expected = self.expected_hash(
                    &envelope,
                    validate::pull_save_input(player_id, salt, save.id, &save.data, player_ss),
                )?;
                validate::confirm("download_save", &save.h, &expected)?;

                let blocks = decompress_save(&save.data)?;
                tracing::info!(version = save.id, bytes = blocks.len(), "cloud save unpacked");
                Ok(SyncOutcome::Success(CloudSave {
                    version: save.id,
                    blocks,
                }))
            }
        }
    }
}
