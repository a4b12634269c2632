//! Save checkpoint (snapshot) operations.

use skysync_codec::decompress_save;
use skysync_protocol::{
    classify, payload, Disposition, Envelope, PulledSnapshot, SnapshotList, SyncError, SyncOp,
    SyncOutcome,
};

use crate::auth::{fields, validate};
use crate::client::SyncClient;
use crate::endpoints::download::CloudSave;
use crate::save::meta::{generate_upload_metadata, UploadOptions};
use crate::transport::Transport;

impl<T: Transport> SyncClient<T> {
    /// List the player's stored snapshots.
    pub fn retrieve_snapshot_list(&self) -> Result<SyncOutcome<SnapshotList>, SyncError> {
        let (player_id, player_ss) = self.require_authenticated()?;
        tracing::info!(player_id, "listing snapshots");

        let salt = self.next_salt();
        let hash_input = fields::standard(player_id, salt, player_ss);
        let response = self.get(
            SyncOp::SnapshotList,
            &format!("{player_id}/{salt}"),
            hash_input,
        )?;

        match classify(&response, "Found")? {
            Disposition::Negative(negative) => Ok(SyncOutcome::Negative(negative)),
            Disposition::Positive => Ok(SyncOutcome::Success(payload(&response)?)),
        }
    }

    /// Store `save_blocks` as a named checkpoint. Snapshots carry no
    /// version of their own, so the metadata omits one.
    pub fn push_snapshot(
        &self,
        save_blocks: &str,
        options: &UploadOptions,
    ) -> Result<SyncOutcome<()>, SyncError> {
        let (player_id, player_ss) = self.require_authenticated()?;
        tracing::info!(player_id, "pushing snapshot");

        let (metadata, compressed) = generate_upload_metadata(save_blocks, None, options)?;
        let form = serde_json::to_value(&metadata)
            .map_err(|e| SyncError::MalformedResponse(e.to_string()))?;

        let salt = self.next_salt();
        let hash_input = fields::with_payload(player_id, salt, &compressed, player_ss);
        let response = self.post(
            SyncOp::PushSnapshot,
            &format!("{player_id}/{salt}"),
            hash_input,
            form,
        )?;

        match classify(&response, "Saved")? {
            Disposition::Negative(negative) => Ok(SyncOutcome::Negative(negative)),
            Disposition::Positive => Ok(SyncOutcome::Success(())),
        }
    }

    /// Fetch one snapshot by id, validate its hash, and decompress it.
    pub fn pull_snapshot(&self, snapshot_id: u32) -> Result<SyncOutcome<CloudSave>, SyncError> {
        let (player_id, player_ss) = self.require_authenticated()?;
        tracing::info!(player_id, snapshot_id, "pulling snapshot");

        let salt = self.next_salt();
        let hash_input = fields::snapshot_pull(player_id, snapshot_id, salt, player_ss);
        let response = self.get(
            SyncOp::PullSnapshot,
            &format!("{player_id}/{snapshot_id}/{salt}"),
            hash_input,
        )?;

        match classify(&response, "Found")? {
            Disposition::Negative(negative) => Ok(SyncOutcome::Negative(negative)),
            Disposition::Positive => {
                let snapshot: PulledSnapshot = payload(&response)?;
                let envelope = Envelope::from_value(&response)?;
                let expected = self.expected_hash(
                    &envelope,
                    validate::pull_snapshot_input(
                        player_id,
                        salt,
                        snapshot.id,
                        &snapshot.data,
                        player_ss,
                    ),
                )?;
                validate::confirm("pull_snapshot", &snapshot.h, &expected)?;

                let blocks = decompress_save(&snapshot.data)?;
                Ok(SyncOutcome::Success(CloudSave {
                    version: snapshot.id,
                    blocks,
                }))
            }
        }
    }
}
