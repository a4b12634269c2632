//! Client configuration.
//!
//! A session needs the player's cloud credentials and either the shared
//! signing secret (direct mode) or a signing-proxy address (proxied mode).
//! Friend reads can additionally fall back to a pre-provisioned burn-bot
//! account when the session itself is unauthenticated. Config round-trips
//! through TOML.

use std::path::Path;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use skysync_protocol::DEFAULT_SYNC_HOST;
use thiserror::Error;

/// Errors loading, saving, or finalizing a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Neither a session key nor an email address was supplied, so the
    /// session could never authenticate or register.
    #[error("player needs either a session key or an email address")]
    MissingCredentials,

    #[error("invalid player id `{0}`")]
    InvalidPlayerId(String),

    /// Proxied mode was selected without a proxy address to send to.
    #[error("proxy mode is enabled but no proxy address is configured")]
    MissingProxyAddress,
}

/// The player's own credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlayerConfig {
    /// Cloud player id (five characters, A-Z and 0-9).
    pub player_id: String,
    /// Per-session key issued by device verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_ss: Option<String>,
    /// Email address the account is registered under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_email: Option<String>,
}

/// Signing-proxy settings for sessions that do not hold the shared secret.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProxyConfig {
    /// Route requests through the signing proxy.
    #[serde(default)]
    pub enabled: bool,
    /// Proxy base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Bearer token for the proxy, if it requires one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Credentials of a pre-provisioned account used to proxy unauthenticated
/// read operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurnBot {
    pub player_id: String,
    pub player_ss: String,
}

/// Full client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Sync server base URL.
    #[serde(default = "default_host")]
    pub host: String,
    /// Shared signing secret, when known. Absence force-enables the proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_salt: Option<String>,
    /// Whether the session holds working credentials. Derived during
    /// [`SyncConfig::finalize`]; persisted for transparency.
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burn_bot: Option<BurnBot>,
    pub player: PlayerConfig,
}

fn default_host() -> String {
    DEFAULT_SYNC_HOST.to_string()
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            secret_salt: None,
            authenticated: false,
            proxy: ProxyConfig::default(),
            burn_bot: None,
            player: PlayerConfig::default(),
        }
    }
}

impl SyncConfig {
    /// Minimal config for a known player.
    pub fn for_player(
        player_id: impl Into<String>,
        player_ss: Option<String>,
        player_email: Option<String>,
    ) -> Self {
        Self {
            player: PlayerConfig {
                player_id: player_id.into(),
                player_ss,
                player_email,
            },
            ..Self::default()
        }
    }

    /// Apply the session rules and validate:
    ///
    /// - the player needs a session key or an email address;
    /// - a missing signing secret force-enables the proxy;
    /// - proxied mode needs an address;
    /// - a session key marks the session authenticated;
    /// - the player id must be well-formed.
    pub fn finalize(mut self) -> Result<Self, ConfigError> {
        if self.player.player_ss.is_none() && self.player.player_email.is_none() {
            return Err(ConfigError::MissingCredentials);
        }

        if self.secret_salt.is_none() && !self.proxy.enabled {
            tracing::warn!("no signing secret configured, enabling the signing proxy");
            self.proxy.enabled = true;
        }
        if self.proxy.enabled && self.proxy.address.is_none() {
            return Err(ConfigError::MissingProxyAddress);
        }

        if !is_valid_player_id(&self.player.player_id) {
            return Err(ConfigError::InvalidPlayerId(self.player.player_id));
        }

        if self.player.player_ss.is_some() {
            self.authenticated = true;
        }
        Ok(self)
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

/// Cloud player ids are five characters of A-Z and 0-9.
pub fn is_valid_player_id(player_id: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9A-Z]{5}$").expect("player id pattern compiles"))
        .is_match(player_id)
}

/// Device verification codes are four alphanumeric characters.
pub fn is_valid_verification_code(code: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9A-Za-z]{4}$").expect("verification code pattern compiles"))
        .is_match(code)
}

/// Permissive RFC2822-style email check; the server does the real
/// verification by mailing a code.
pub fn is_valid_email(email: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[0-9A-Za-z][0-9A-Za-z.-]*\.[A-Za-z]{2,}$")
            .expect("email pattern compiles")
    })
    .is_match(email)
}
