use std::env;

use bss_common::{parse_boolean_flag, Secret};
use log::*;

use crate::errors::ServerError;

/// The header Bling sends the body signature in.
pub const BLING_SIGNATURE_HEADER: &str = "X-Bling-Signature-256";

const DEFAULT_BSS_HOST: &str = "127.0.0.1";
const DEFAULT_BSS_PORT: u16 = 8460;

/// The server configuration. Built once at startup from the environment and passed by reference
/// into the server; nothing reads environment variables at request time.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Bling webhook configuration
    pub bling: BlingConfig,
}

#[derive(Clone, Debug, Default)]
pub struct BlingConfig {
    /// The shared secret Bling signs webhook bodies with.
    pub hmac_secret: Secret<String>,
    /// Disable only for local testing; requests are then accepted unsigned.
    pub hmac_checks: bool,
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, database_url: String::default(), bling: BlingConfig::default() }
    }

    /// Builds the configuration from the environment. Host, port and database URL fall back to
    /// defaults with a log entry; a missing signing secret is a fatal error (see
    /// [`BlingConfig::try_from_env`]).
    pub fn try_from_env() -> Result<Self, ServerError> {
        let host = env::var("BSS_HOST").ok().unwrap_or_else(|| DEFAULT_BSS_HOST.into());
        let port = env::var("BSS_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for BSS_PORT. {e} Using the default, {DEFAULT_BSS_PORT}, instead."
                    );
                    DEFAULT_BSS_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_BSS_PORT);
        let database_url = env::var("BSS_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ BSS_DATABASE_URL is not set. Please set it to the URL for the order database.");
            String::default()
        });
        let bling = BlingConfig::try_from_env()?;
        Ok(Self { host, port, database_url, bling })
    }
}

impl BlingConfig {
    /// Loads the webhook signing configuration. The server cannot authenticate deliveries without
    /// a secret, so an absent `BSS_HMAC_SECRET` is a startup failure rather than a per-request
    /// one, unless signature checks have been explicitly disabled with `BSS_HMAC_CHECKS=0`.
    pub fn try_from_env() -> Result<Self, ServerError> {
        let hmac_checks = parse_boolean_flag(env::var("BSS_HMAC_CHECKS").ok(), true);
        let hmac_secret = Secret::new(env::var("BSS_HMAC_SECRET").unwrap_or_default());
        if hmac_secret.is_empty() {
            if hmac_checks {
                return Err(ServerError::ConfigurationError(
                    "BSS_HMAC_SECRET is not set. The server cannot authenticate Bling webhooks without it."
                        .to_string(),
                ));
            }
            warn!(
                "🚨️ BSS_HMAC_SECRET is not set and signature checks are disabled. Unsigned requests will be \
                 accepted. Never run a production instance like this. 🚨️"
            );
        }
        Ok(Self { hmac_secret, hmac_checks })
    }
}
