//! Friend reads and the add-friend composition.
//!
//! Friend reads work for any player id, friend or not, and do not need an
//! authenticated session: unauthenticated sessions sign with the
//! configured burn-bot credentials instead.

use serde_json::json;
use skysync_codec::catalog::save_schema;
use skysync_codec::{concat, parse, SaveValue};
use skysync_protocol::{
    classify, payload, Disposition, Envelope, FriendMeta, FriendTower, SnapshotList, SyncError,
    SyncOp, SyncOutcome, UploadReceipt,
};

use crate::auth::{fields, validate};
use crate::client::SyncClient;
use crate::config::is_valid_player_id;
use crate::endpoints::download::CloudSave;
use crate::save::meta::UploadOptions;
use crate::transport::Transport;

fn check_friend_id(friend_id: &str) -> Result<(), SyncError> {
    if is_valid_player_id(friend_id) {
        Ok(())
    } else {
        Err(SyncError::invalid("friend id", friend_id))
    }
}

impl<T: Transport> SyncClient<T> {
    /// Fetch a player's profile metadata (level, avatar, golden tickets).
    pub fn pull_friend_meta(
        &self,
        friend_id: &str,
    ) -> Result<SyncOutcome<FriendMeta>, SyncError> {
        check_friend_id(friend_id)?;
        let (requester_id, requester_ss) = self.requester()?;
        tracing::info!(friend_id, "pulling friend metadata");

        let salt = self.next_salt();
        let hash_input = fields::friend_meta(requester_id, salt, friend_id, requester_ss);
        let response = self.post(
            SyncOp::FriendPullMeta,
            &format!("{requester_id}/{salt}"),
            hash_input,
            json!({ "friends": friend_id }),
        )?;

        match classify(&response, "Found")? {
            Disposition::Negative(negative) => Ok(SyncOutcome::Negative(negative)),
            Disposition::Positive => Ok(SyncOutcome::Success(payload(&response)?)),
        }
    }

    /// Download a player's tower. The validation hash for this endpoint
    /// additionally covers the friend id the server echoes back.
    pub fn pull_friend_tower(
        &self,
        friend_id: &str,
    ) -> Result<SyncOutcome<CloudSave>, SyncError> {
        check_friend_id(friend_id)?;
        let (requester_id, requester_ss) = self.requester()?;
        tracing::info!(friend_id, "pulling friend tower");

        let salt = self.next_salt();
        let hash_input = fields::friend_read(requester_id, friend_id, salt, requester_ss);
        let response = self.get(
            SyncOp::FriendPullTower,
            &format!("{requester_id}/{friend_id}/{salt}"),
            hash_input,
        )?;

        match classify(&response, "Found")? {
            Disposition::Negative(negative) => Ok(SyncOutcome::Negative(negative)),
            Disposition::Positive => {
                let tower: FriendTower = payload(&response)?;
                let envelope = Envelope::from_value(&response)?;
                let expected = self.expected_hash(
                    &envelope,
                    validate::friend_tower_input(
                        requester_id,
                        &tower.player_id,
                        salt,
                        tower.id,
                        &tower.data,
                        requester_ss,
                    ),
                )?;
                validate::confirm("pull_friend_tower", &tower.h, &expected)?;

                let blocks = skysync_codec::decompress_save(&tower.data)?;
                Ok(SyncOutcome::Success(CloudSave {
                    version: tower.id,
                    blocks,
                }))
            }
        }
    }

    /// List a player's snapshots.
    pub fn retrieve_friend_snapshot_list(
        &self,
        friend_id: &str,
    ) -> Result<SyncOutcome<SnapshotList>, SyncError> {
        check_friend_id(friend_id)?;
        let (requester_id, requester_ss) = self.requester()?;
        tracing::info!(friend_id, "pulling friend snapshot list");

        let salt = self.next_salt();
        let hash_input = fields::friend_read(requester_id, friend_id, salt, requester_ss);
        let response = self.get(
            SyncOp::FriendSnapshotList,
            &format!("{requester_id}/{friend_id}/{salt}"),
            hash_input,
        )?;

        match classify(&response, "Found")? {
            Disposition::Negative(negative) => Ok(SyncOutcome::Negative(negative)),
            Disposition::Positive => Ok(SyncOutcome::Success(payload(&response)?)),
        }
    }

    /// Add a friend. The friends list lives inside the save data, so this
    /// is a composition: fetch the current version, download the save,
    /// append to the `friends` block, and upload the result.
    pub fn add_friend(&self, friend_id: &str) -> Result<SyncOutcome<UploadReceipt>, SyncError> {
        check_friend_id(friend_id)?;
        tracing::info!(friend_id, "adding friend");

        let version = match self.check_for_newer_save()? {
            SyncOutcome::Success(version) => version,
            SyncOutcome::Negative(negative) => return Ok(SyncOutcome::Negative(negative)),
        };
        let save = match self.download_save()? {
            SyncOutcome::Success(save) => save,
            SyncOutcome::Negative(negative) => return Ok(SyncOutcome::Negative(negative)),
        };

        let mut record = parse(&save.blocks, save_schema());
        let friends = match record.scalar("friends") {
            Some(existing) => format!("{existing}|{friend_id}"),
            None => friend_id.to_string(),
        };
        record.insert("friends", SaveValue::Scalar(friends));
        let blocks = concat(&record, save_schema())?;

        self.upload_save(&blocks, version, &UploadOptions::default())
    }
}
