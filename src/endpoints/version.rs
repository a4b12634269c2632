//! Cloud save version check.

use skysync_protocol::{
    classify, payload, CurrentVersion, Disposition, Envelope, SyncError, SyncOp, SyncOutcome,
};

use crate::auth::{fields, validate};
use crate::client::SyncClient;
use crate::transport::Transport;

impl<T: Transport> SyncClient<T> {
    /// Fetch the version of the current cloud save. `NotFound` means the
    /// account has never pushed one.
    ///
    /// The response's hash covers the returned version, so a tampered or
    /// corrupted version number fails validation here rather than
    /// surfacing later as a refused upload.
    pub fn check_for_newer_save(&self) -> Result<SyncOutcome<u32>, SyncError> {
        let (player_id, player_ss) = self.require_authenticated()?;
        tracing::info!(player_id, "checking for newer cloud save");

        let salt = self.next_salt();
        let hash_input = fields::standard(player_id, salt, player_ss);
        let response = self.get(
            SyncOp::CurrentVersion,
            &format!("{player_id}/{salt}"),
            hash_input,
        )?;

        match classify(&response, "Found")? {
            Disposition::Negative(negative) => Ok(SyncOutcome::Negative(negative)),
            Disposition::Positive => {
                let version: CurrentVersion = payload(&response)?;
                let envelope = Envelope::from_value(&response)?;
                let expected = self.expected_hash(
                    &envelope,
                    validate::current_version_input(player_id, salt, version.id, player_ss),
                )?;
                validate::confirm("check_for_newer_save", &version.h, &expected)?;
                tracing::info!(cloud_version = version.id, "cloud save version verified");
                Ok(SyncOutcome::Success(version.id))
            }
        }
    }
}
