// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! Chain types, constants, and amount helpers.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::client::ChainError;

/// Decimals of the chain's native token.
pub const NATIVE_DECIMALS: u8 = 18;

/// Decimals of USDT-style stable tokens (base units per the API contract).
pub const USDT_DECIMALS: u8 = 6;

/// Gas used by a plain native value transfer.
pub const NATIVE_TRANSFER_GAS: u64 = 21_000;

/// EVM network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display.
    pub name: String,
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Block explorer base URL.
    pub explorer_url: String,
}

impl NetworkConfig {
    /// Ethereum Sepolia testnet.
    pub fn sepolia() -> Self {
        Self {
            name: "Sepolia".to_string(),
            rpc_url: "https://ethereum-sepolia-rpc.publicnode.com".to_string(),
            explorer_url: "https://sepolia.etherscan.io".to_string(),
        }
    }

    /// Network backed by an operator-supplied RPC endpoint.
    pub fn custom(rpc_url: impl Into<String>, explorer_url: impl Into<String>) -> Self {
        Self {
            name: "custom".to_string(),
            rpc_url: rpc_url.into(),
            explorer_url: explorer_url.into(),
        }
    }

    /// Explorer link for a transaction hash.
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }
}

/// Organization metadata read from the donation registry contract.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganizationInfo {
    /// Address the registry was queried with.
    pub address: String,
    /// Organization name.
    pub name: String,
    /// Organization description.
    pub description: String,
    /// Wallet that receives this organization's donations.
    pub wallet: String,
    /// Whether the organization is active on chain.
    pub is_active: bool,
    /// Cumulative donation total in base units.
    pub total_donations: String,
    /// Cumulative donation total formatted with decimals.
    pub total_donations_formatted: String,
    /// Addresses that have donated to this organization.
    pub donors: Vec<String>,
}

/// Parse a decimal string of base units into a `U256`.
///
/// Rejects anything but ASCII digits; amounts are never fractional at this
/// layer.
pub fn parse_base_units(raw: &str) -> Result<U256, ChainError> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(ChainError::InvalidAmount(format!(
            "expected a decimal base-unit string, got {raw:?}"
        )));
    }
    U256::from_str_radix(raw, 10)
        .map_err(|e| ChainError::InvalidAmount(e.to_string()))
}

/// Format base units to a human-readable amount with the given decimals.
pub fn format_units(amount: U256, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder.is_zero() {
        return whole.to_string();
    }

    // Display at most 6 decimal places; trim after truncating so an amount
    // below the display precision renders as the whole part, not "0.000000".
    let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
    let truncated = &decimal_str[..decimal_str.len().min(6)];
    let trimmed = truncated.trim_end_matches('0');
    if trimmed.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{trimmed}")
    }
}

/// Validate a transaction hash (0x + 64 hex chars).
pub fn validate_tx_hash(hash: &str) -> Result<(), ChainError> {
    let hex = hash
        .strip_prefix("0x")
        .ok_or_else(|| ChainError::InvalidTxHash("hash must start with 0x".to_string()))?;
    if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ChainError::InvalidTxHash(
            "hash must be 0x followed by 64 hex characters".to_string(),
        ));
    }
    Ok(())
}
