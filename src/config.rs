// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | HS256 secret for bearer token verification | Required |
//! | `JWT_ISSUER` | Expected JWT issuer claim | Optional |
//! | `CHAIN_RPC_URL` | EVM JSON-RPC endpoint | Optional (chain features disabled when unset) |
//! | `CHAIN_EXPLORER_URL` | Block explorer base URL for links | `https://sepolia.etherscan.io` |
//! | `DONATION_REGISTRY_ADDRESS` | Donation registry contract address | Optional |
//! | `SERVICE_WALLET_KEY` | Hex private key for the custodial donation wallet | Optional |
//! | `MIN_CONFIRMATIONS` | Confirmation depth required to accept a payment | `1` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;

/// Environment variable name for the HS256 token secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the expected token issuer.
pub const JWT_ISSUER_ENV: &str = "JWT_ISSUER";

/// Environment variable name for the EVM JSON-RPC endpoint.
pub const CHAIN_RPC_URL_ENV: &str = "CHAIN_RPC_URL";

/// Environment variable name for the block explorer base URL.
pub const CHAIN_EXPLORER_URL_ENV: &str = "CHAIN_EXPLORER_URL";

/// Environment variable name for the donation registry contract address.
pub const DONATION_REGISTRY_ADDRESS_ENV: &str = "DONATION_REGISTRY_ADDRESS";

/// Environment variable name for the custodial wallet private key.
pub const SERVICE_WALLET_KEY_ENV: &str = "SERVICE_WALLET_KEY";

/// Environment variable name for the required confirmation depth.
pub const MIN_CONFIRMATIONS_ENV: &str = "MIN_CONFIRMATIONS";

/// Default block explorer when none is configured.
pub const DEFAULT_EXPLORER_URL: &str = "https://sepolia.etherscan.io";

/// Default confirmation depth required before a payment is accepted.
pub const DEFAULT_MIN_CONFIRMATIONS: u64 = 1;

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP server.
    pub host: String,
    /// Bind port for the HTTP server.
    pub port: u16,
    /// HS256 secret used to verify bearer tokens.
    pub jwt_secret: String,
    /// Expected `iss` claim, when issuer validation is enabled.
    pub jwt_issuer: Option<String>,
    /// EVM JSON-RPC endpoint. Chain endpoints return 503 when unset.
    pub chain_rpc_url: Option<String>,
    /// Block explorer base URL used when building transaction links.
    pub chain_explorer_url: String,
    /// Donation registry contract address for organization reads.
    pub registry_address: Option<String>,
    /// Hex private key for the custodial donation wallet.
    pub service_wallet_key: Option<String>,
    /// Confirmation depth required to accept a claimed payment.
    pub min_confirmations: u64,
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{JWT_SECRET_ENV} must be set")]
    MissingJwtSecret,

    #[error("invalid {0}: {1}")]
    InvalidValue(&'static str, String),
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var(JWT_SECRET_ENV).map_err(|_| ConfigError::MissingJwtSecret)?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::MissingJwtSecret);
        }

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidValue("PORT", e.to_string()))?,
            Err(_) => 8080,
        };

        let min_confirmations = match env::var(MIN_CONFIRMATIONS_ENV) {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue(MIN_CONFIRMATIONS_ENV, e.to_string()))?,
            Err(_) => DEFAULT_MIN_CONFIRMATIONS,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            jwt_secret,
            jwt_issuer: env::var(JWT_ISSUER_ENV).ok(),
            chain_rpc_url: env::var(CHAIN_RPC_URL_ENV).ok(),
            chain_explorer_url: env::var(CHAIN_EXPLORER_URL_ENV)
                .unwrap_or_else(|_| DEFAULT_EXPLORER_URL.to_string()),
            registry_address: env::var(DONATION_REGISTRY_ADDRESS_ENV).ok(),
            service_wallet_key: env::var(SERVICE_WALLET_KEY_ENV).ok(),
            min_confirmations,
        })
    }
}
