//! Cloud save upload.

use skysync_protocol::{
    classify, payload, Disposition, SyncError, SyncOp, SyncOutcome, UploadReceipt,
};

use crate::auth::fields;
use crate::client::SyncClient;
use crate::save::meta::{generate_upload_metadata, UploadOptions};
use crate::transport::Transport;

impl<T: Transport> SyncClient<T> {
    /// Push `save_blocks` to the cloud as `version`. The compressed payload
    /// is part of the request signature, so the servers detect any
    /// mismatch between the signed and posted bytes.
    ///
    /// `NotSaved` means the servers judged the incumbent save better; see
    /// [`crate::save::make_save_better_than`].
    pub fn upload_save(
        &self,
        save_blocks: &str,
        version: u32,
        options: &UploadOptions,
    ) -> Result<SyncOutcome<UploadReceipt>, SyncError> {
        let (player_id, player_ss) = self.require_authenticated()?;
        tracing::info!(player_id, version, "uploading save");

        let (metadata, compressed) =
            generate_upload_metadata(save_blocks, Some(version), options)?;
        let form = serde_json::to_value(&metadata)
            .map_err(|e| SyncError::MalformedResponse(e.to_string()))?;

        let salt = self.next_salt();
        let hash_input = fields::with_payload(player_id, salt, &compressed, player_ss);
        let response = self.post(
            SyncOp::PushSave,
            &format!("{player_id}/{salt}"),
            hash_input,
            form,
        )?;

        match classify(&response, "Saved")? {
            Disposition::Negative(negative) => Ok(SyncOutcome::Negative(negative)),
            Disposition::Positive => {
                let receipt: UploadReceipt = payload(&response)?;
                tracing::info!(saved_as = %receipt.id, "save pushed");
                Ok(SyncOutcome::Success(receipt))
            }
        }
    }
}
