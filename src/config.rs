//! Runtime configuration.
//!
//! One explicit record, populated once at boot. Precedence per option:
//! command-line flag, then environment variable, then the built-in
//! default (clap's `env` support implements exactly this order).

use crate::error::Error;
use clap::Parser;
use sha2::{Digest, Sha512_256};
use std::net::SocketAddr;
use std::sync::Arc;

pub type SharedConfig = Arc<Config>;

const DEFAULT_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_ENDPOINT: &str = "/ddns";

/// Dynamic DNS update endpoint for DigitalOcean-managed domains.
#[derive(Parser, Debug, Clone)]
#[command(name = "doddns", version, about)]
pub struct Config {
    /// Address to listen on.
    #[arg(long, default_value = DEFAULT_ADDRESS)]
    pub address: SocketAddr,

    /// Endpoint path to handle updates.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// DigitalOcean API token.
    #[arg(
        long,
        env = "DIGITALOCEAN_API_TOKEN",
        default_value = "",
        hide_env_values = true
    )]
    pub digitalocean_api_token: String,

    /// Security token required from clients; derived from the API token
    /// when left unset.
    #[arg(long, env = "SECURITY_TOKEN", default_value = "", hide_env_values = true)]
    pub security_token: String,

    /// Limit of requests per second.
    #[arg(long, env = "LIMIT_RPS", default_value_t = 0.01)]
    pub limit_rps: f64,

    /// Limit of a single burst size.
    #[arg(long, env = "LIMIT_BURST", default_value_t = 1)]
    pub limit_burst: u32,
}

impl Config {
    /// Checks startup invariants and fills in the derived security
    /// token. The derived token is logged exactly once so an operator
    /// who never configured one can still authenticate clients.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigInvalid`] when the API token is missing,
    /// the endpoint is not an absolute path, or the limiter parameters
    /// are out of range.
    pub fn finalize(mut self) -> Result<Self, Error> {
        if self.digitalocean_api_token.is_empty() {
            return Err(Error::ConfigInvalid(
                "DigitalOcean API token is required".to_string(),
            ));
        }
        if !self.endpoint.starts_with('/') {
            return Err(Error::ConfigInvalid(
                "endpoint must be an absolute path".to_string(),
            ));
        }
        if !(self.limit_rps > 0.0) {
            return Err(Error::ConfigInvalid(
                "limit-rps must be positive".to_string(),
            ));
        }
        if self.limit_burst < 1 {
            return Err(Error::ConfigInvalid(
                "limit-burst must be at least 1".to_string(),
            ));
        }

        if self.security_token.is_empty() {
            self.security_token = derived_token(&self.digitalocean_api_token);
            tracing::info!("new auth token: {}", self.security_token);
        }

        Ok(self)
    }
}

/// Hex encoding of SHA-512/256 over the API token. Stable across
/// restarts for the same token, so clients keep working without an
/// operator ever choosing a secret.
#[must_use]
pub fn derived_token(api_token: &str) -> String {
    hex::encode(Sha512_256::digest(api_token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            address: "0.0.0.0:8080".parse().unwrap(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            digitalocean_api_token: "test-api-token".to_string(),
            security_token: String::new(),
            limit_rps: 0.01,
            limit_burst: 1,
        }
    }

    #[test]
    fn derives_a_stable_token_when_unset() {
        let config = base_config().finalize().unwrap();
        // SHA-512/256("test-api-token"), hex encoded.
        assert_eq!(
            config.security_token,
            "cc15178394fbf2a4253a260a78f2c49043673203e2c41fe0c6dbd652145b0167"
        );
        assert_eq!(
            config.security_token,
            derived_token("test-api-token"),
        );
    }

    #[test]
    fn keeps_an_explicit_security_token() {
        let mut config = base_config();
        config.security_token = "chosen".to_string();
        let config = config.finalize().unwrap();
        assert_eq!(config.security_token, "chosen");
    }

    #[test]
    fn requires_an_api_token() {
        let mut config = base_config();
        config.digitalocean_api_token = String::new();
        assert!(matches!(config.finalize(), Err(Error::ConfigInvalid(_))));
    }

    #[test]
    fn rejects_bad_limiter_parameters() {
        let mut config = base_config();
        config.limit_rps = 0.0;
        assert!(matches!(config.finalize(), Err(Error::ConfigInvalid(_))));

        let mut config = base_config();
        config.limit_burst = 0;
        assert!(matches!(config.finalize(), Err(Error::ConfigInvalid(_))));
    }

    #[test]
    fn rejects_relative_endpoint_paths() {
        let mut config = base_config();
        config.endpoint = "ddns".to_string();
        assert!(matches!(config.finalize(), Err(Error::ConfigInvalid(_))));
    }
}
