//! Hourly raffle operations.

use skysync_protocol::{classify, Disposition, Negative, SyncError, SyncOp, SyncOutcome};

use crate::auth::fields;
use crate::client::SyncClient;
use crate::transport::Transport;

impl<T: Transport> SyncClient<T> {
    /// Enter the current hourly raffle drawing.
    pub fn enter_raffle(&self) -> Result<SyncOutcome<()>, SyncError> {
        self.raffle_request(SyncOp::EnterRaffle, "entering raffle")
    }

    /// Enter the next several raffles at once.
    pub fn enter_multi_raffle(&self) -> Result<SyncOutcome<()>, SyncError> {
        self.raffle_request(SyncOp::EnterMultiRaffle, "entering multi-raffle")
    }

    /// Whether the player is entered in the current drawing.
    pub fn check_entered_raffle(&self) -> Result<bool, SyncError> {
        match self.raffle_request(SyncOp::EnteredCurrent, "checking raffle entry")? {
            SyncOutcome::Success(()) => Ok(true),
            SyncOutcome::Negative(Negative::NotEntered) => Ok(false),
            SyncOutcome::Negative(other) => Err(SyncError::MalformedResponse(format!(
                "unexpected raffle outcome {other:?}"
            ))),
        }
    }

    fn raffle_request(
        &self,
        op: SyncOp,
        action: &'static str,
    ) -> Result<SyncOutcome<()>, SyncError> {
        let (player_id, player_ss) = self.require_authenticated()?;
        tracing::info!(player_id, action);

        let salt = self.next_salt();
        let hash_input = fields::standard(player_id, salt, player_ss);
        let response = self.get(op, &format!("{player_id}/{salt}"), hash_input)?;

        match classify(&response, "Entered")? {
            Disposition::Negative(negative) => Ok(SyncOutcome::Negative(negative)),
            Disposition::Positive => Ok(SyncOutcome::Success(())),
        }
    }
}
