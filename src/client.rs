//! Client composition root.
//!
//! A [`SyncClient`] binds a finalized config, a transport collaborator, a
//! signer backend (direct or proxied, fixed at construction), and a salt
//! source. Endpoint operations live in [`crate::endpoints`] as `impl`
//! blocks over this type; the helpers here cover the request path shared by
//! all of them: build the signed URL (or the proxy query), execute, and
//! resolve the expected validation hash for payload-bearing responses.

use serde_json::Value;
use skysync_protocol::{Envelope, SyncError, SyncOp};

use crate::auth::{DirectSigner, ProxySigner, RandomSalt, SaltSource, Signer};
use crate::config::{ConfigError, SyncConfig};
use crate::transport::{default_headers, Transport, TransportRequest};

/// An authenticated (or burn-bot-backed) session against the sync servers.
pub struct SyncClient<T: Transport> {
    config: SyncConfig,
    transport: T,
    signer: Box<dyn Signer>,
    salt: Box<dyn SaltSource>,
}

impl<T: Transport> SyncClient<T> {
    /// Finalize `config` and build a session. The signer backend follows
    /// the config: proxied when the proxy is enabled, direct otherwise.
    pub fn new(config: SyncConfig, transport: T) -> Result<Self, SyncError> {
        let config = config.finalize().map_err(config_error)?;
        let signer: Box<dyn Signer> = match (&config.secret_salt, config.proxy.enabled) {
            (_, true) => Box::new(ProxySigner),
            (Some(secret), false) => Box::new(DirectSigner::new(secret.clone())),
            // finalize() force-enables the proxy when the secret is absent.
            (None, false) => Box::new(ProxySigner),
        };
        Ok(Self {
            config,
            transport,
            signer,
            salt: Box::new(RandomSalt),
        })
    }

    /// Substitute the salt source (fixed salts reproduce recorded traffic).
    pub fn with_salt_source(mut self, salt: Box<dyn SaltSource>) -> Self {
        self.salt = salt;
        self
    }

    /// The finalized configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub(crate) fn next_salt(&self) -> u32 {
        self.salt.next_salt()
    }

    /// Execute an unsigned request (device verification, static feeds).
    pub(crate) fn transport_execute(
        &self,
        request: TransportRequest,
    ) -> Result<Value, crate::transport::TransportError> {
        self.transport.execute(request)
    }

    /// Fail before any network call when the session has no credentials.
    pub(crate) fn require_authenticated(&self) -> Result<(&str, &str), SyncError> {
        if !self.config.authenticated {
            return Err(SyncError::NotAuthenticated);
        }
        let player_ss = self
            .config
            .player
            .player_ss
            .as_deref()
            .ok_or(SyncError::NotAuthenticated)?;
        Ok((self.config.player.player_id.as_str(), player_ss))
    }

    /// The credentials a read uses: the player when authenticated, else the
    /// configured burn bot. No burn bot means the read cannot be made.
    pub(crate) fn requester(&self) -> Result<(&str, &str), SyncError> {
        if self.config.authenticated {
            return self.require_authenticated();
        }
        match &self.config.burn_bot {
            Some(bot) => {
                tracing::info!(burn_bot = %bot.player_id, "proxying read through burn bot");
                Ok((bot.player_id.as_str(), bot.player_ss.as_str()))
            }
            None => Err(SyncError::NotAuthenticated),
        }
    }

    /// Execute one signed GET.
    pub(crate) fn get(
        &self,
        op: SyncOp,
        path_params: &str,
        hash_input: String,
    ) -> Result<Value, SyncError> {
        self.send(op, path_params, hash_input, None)
    }

    /// Execute one signed POST with a form body.
    pub(crate) fn post(
        &self,
        op: SyncOp,
        path_params: &str,
        hash_input: String,
        form: Value,
    ) -> Result<Value, SyncError> {
        self.send(op, path_params, hash_input, Some(form))
    }

    fn send(
        &self,
        op: SyncOp,
        path_params: &str,
        hash_input: String,
        form: Option<Value>,
    ) -> Result<Value, SyncError> {
        let endpoint = format!("{}{path_params}", op.path_prefix());
        let request = if self.config.proxy.enabled {
            self.proxy_request(op, &endpoint, hash_input, form)?
        } else {
            let signature = self.signer.sign(&hash_input);
            TransportRequest {
                method: op.method(),
                url: format!("{}{endpoint}/{signature}", self.config.host),
                query: Vec::new(),
                headers: default_headers(),
                form,
            }
        };
        tracing::debug!(op = ?op, method = %request.method, url = %request.url, "sending sync request");
        self.transport
            .execute(request)
            .map_err(|e| SyncError::Transport(e.to_string()))
    }

    /// Build the proxied form of a request: the unfinished hash input and
    /// the target endpoint travel as query parameters for the proxy to
    /// complete and forward.
    fn proxy_request(
        &self,
        op: SyncOp,
        endpoint: &str,
        hash_input: String,
        form: Option<Value>,
    ) -> Result<TransportRequest, SyncError> {
        let address = self
            .config
            .proxy
            .address
            .as_deref()
            .ok_or_else(|| SyncError::invalid("proxy address", ""))?;
        let mut headers = default_headers();
        if let Some(api_key) = &self.config.proxy.api_key {
            headers.push(("Authorization".to_string(), format!("Bearer {api_key}")));
        }
        Ok(TransportRequest {
            method: op.method(),
            url: address.to_string(),
            query: vec![
                ("hash".to_string(), self.signer.sign(&hash_input)),
                ("endpoint".to_string(), endpoint.to_string()),
            ],
            headers,
            form,
        })
    }

    /// The hash a payload-bearing response must match: the proxy-computed
    /// hash in proxied mode (local recomputation is impossible without the
    /// secret), otherwise the signer's completion of `validation_input`.
    pub(crate) fn expected_hash(
        &self,
        envelope: &Envelope,
        validation_input: String,
    ) -> Result<String, SyncError> {
        if self.signer.is_proxied() {
            envelope.proxied_hash.clone().ok_or_else(|| {
                SyncError::MalformedResponse(
                    "proxied response carries no proxiedHash".into(),
                )
            })
        } else {
            Ok(self.signer.sign(&validation_input))
        }
    }
}

fn config_error(error: ConfigError) -> SyncError {
    match error {
        ConfigError::InvalidPlayerId(id) => SyncError::invalid("player id", id),
        ConfigError::MissingCredentials | ConfigError::MissingProxyAddress => {
            SyncError::NotAuthenticated
        }
        other => SyncError::invalid("config", other.to_string()),
    }
}
