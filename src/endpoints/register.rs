//! Account provisioning and device verification.

use serde_json::json;
use skysync_protocol::{
    classify, payload, Disposition, Envelope, NewUser, PlayerDetails, PlayerRecord, SyncError,
    SyncOp, SyncOutcome, VerifiedDevice,
};

use crate::auth::fields;
use crate::client::SyncClient;
use crate::config::{is_valid_email, is_valid_verification_code};
use crate::transport::{Transport, TransportRequest};

impl<T: Transport> SyncClient<T> {
    /// Provision a fresh account. Unusually, this request is signed with
    /// two salts and no player key, and the response carries no `success`
    /// literal, only credentials or an error.
    pub fn new_user(&self) -> Result<NewUser, SyncError> {
        tracing::info!("requesting new account");
        let salt1 = self.next_salt();
        let salt2 = self.next_salt();
        let hash_input = fields::user_register(salt1, salt2);
        let response = self.get(SyncOp::Register, &format!("{salt1}/{salt2}"), hash_input)?;

        if let Some(message) = response.get("error").and_then(|e| e.as_str()) {
            return Err(SyncError::Server(message.to_string()));
        }
        payload(&response)
    }

    /// Ask the servers to email a verification code to the configured
    /// address. The request is signed with the burn bot's credentials; the
    /// player has no session key yet.
    pub fn register_email(&self) -> Result<SyncOutcome<()>, SyncError> {
        let email = self
            .config()
            .player
            .player_email
            .as_deref()
            .filter(|email| is_valid_email(email))
            .ok_or_else(|| SyncError::invalid("email", ""))?
            .to_string();
        let bot = self
            .config()
            .burn_bot
            .as_ref()
            .ok_or(SyncError::NotAuthenticated)?
            .clone();
        tracing::info!("registering email for verification");

        let salt = self.next_salt();
        let hash_input = fields::email_register(&bot.player_id, salt, &email, &bot.player_ss);
        let response = self.post(
            SyncOp::RegisterEmail,
            &format!("{}/{salt}", bot.player_id),
            hash_input,
            json!({ "email": email, "promote": 1 }),
        )?;

        match classify(&response, "NewDevice")? {
            Disposition::Negative(negative) => Ok(SyncOutcome::Negative(negative)),
            Disposition::Positive => Ok(SyncOutcome::Success(())),
        }
    }

    /// Confirm the emailed verification code and receive the session
    /// credentials. This endpoint is unsigned: the path carries only the
    /// burn bot id and the code. The returned `player_ss` is the session
    /// key to persist into the config.
    pub fn verify_device(&self, verification_code: &str) -> Result<VerifiedDevice, SyncError> {
        if !is_valid_verification_code(verification_code) {
            return Err(SyncError::invalid("verification code", verification_code));
        }
        let bot = self
            .config()
            .burn_bot
            .as_ref()
            .ok_or(SyncError::NotAuthenticated)?;
        tracing::info!("verifying device");

        let url = format!(
            "{}{}{}/{verification_code}",
            self.config().host,
            SyncOp::VerifyDevice.path_prefix(),
            bot.player_id
        );
        let response = self
            .transport_execute(TransportRequest::get(url))
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        let envelope = Envelope::from_value(&response)?;
        if let Some(message) = envelope.error {
            return Err(SyncError::Server(message));
        }
        match envelope.success.as_deref() {
            Some("NewDevice") => {
                let verified: VerifiedDevice = payload(&response)?;
                tracing::info!(player_id = %verified.player_id, "device verified");
                Ok(verified)
            }
            other => Err(SyncError::MalformedResponse(format!(
                "unexpected verify_device literal {other:?}"
            ))),
        }
    }

    /// Fetch the player's account record.
    pub fn player_details(&self) -> Result<SyncOutcome<PlayerRecord>, SyncError> {
        let (player_id, player_ss) = self.require_authenticated()?;
        tracing::info!(player_id, "fetching player details");

        let salt = self.next_salt();
        let hash_input = fields::standard(player_id, salt, player_ss);
        let response = self.get(
            SyncOp::PlayerDetails,
            &format!("{player_id}/{salt}"),
            hash_input,
        )?;

        match classify(&response, "Found")? {
            Disposition::Negative(negative) => Ok(SyncOutcome::Negative(negative)),
            Disposition::Positive => {
                let details: PlayerDetails = payload(&response)?;
                Ok(SyncOutcome::Success(details.player))
            }
        }
    }
}
