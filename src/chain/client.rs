// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! Read-only EVM chain client.

use std::str::FromStr;

use alloy::{
    consensus::Transaction as _,
    network::Ethereum,
    primitives::{Address, TxHash, U256},
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, Provider, ProviderBuilder, RootProvider,
    },
};

use super::registry::DonationRegistry;
use super::types::NetworkConfig;

/// HTTP provider type (with all fillers).
pub(crate) type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// Read-only chain client.
pub struct ChainClient {
    /// Network configuration.
    network: NetworkConfig,
    /// Alloy HTTP provider.
    provider: HttpProvider,
}

/// Receipt fields relevant to payment verification.
#[derive(Debug, Clone)]
pub struct ReceiptSummary {
    /// Block the transaction was included in.
    pub block_number: Option<u64>,
    /// Whether the transaction succeeded.
    pub success: bool,
    /// Recipient of the transaction, when it was a plain transfer.
    pub to: Option<Address>,
}

impl ChainClient {
    /// Create a new client for the specified network.
    pub fn new(network: NetworkConfig) -> Result<Self, ChainError> {
        let url: url::Url = network
            .rpc_url
            .parse()
            .map_err(|e: url::ParseError| ChainError::InvalidRpcUrl(e.to_string()))?;

        let provider = ProviderBuilder::new().connect_http(url);

        Ok(Self { network, provider })
    }

    /// Get the native balance for an address.
    pub async fn native_balance(&self, address: &str) -> Result<U256, ChainError> {
        let addr = Address::from_str(address)
            .map_err(|e| ChainError::InvalidAddress(e.to_string()))?;

        self.provider
            .get_balance(addr)
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))
    }

    /// Get the current block number.
    pub async fn block_number(&self) -> Result<u64, ChainError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))
    }

    /// Fetch the receipt for a transaction, if one exists yet.
    pub async fn receipt(&self, tx_hash: TxHash) -> Result<Option<ReceiptSummary>, ChainError> {
        let receipt = self
            .provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;

        Ok(receipt.map(|r| ReceiptSummary {
            block_number: r.block_number,
            success: r.status(),
            to: r.to,
        }))
    }

    /// Fetch the value carried by a transaction, if the transaction is known.
    pub async fn transaction_value(&self, tx_hash: TxHash) -> Result<Option<U256>, ChainError> {
        let tx = self
            .provider
            .get_transaction_by_hash(tx_hash)
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))?;

        Ok(tx.map(|t| t.value()))
    }

    /// Donation registry contract handle at the given address.
    pub fn registry(
        &self,
        contract_address: &str,
    ) -> Result<DonationRegistry<HttpProvider>, ChainError> {
        DonationRegistry::new(&self.provider, contract_address)
    }

    /// Get the network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }
}

/// Errors that can occur during chain operations.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid transaction hash: {0}")]
    InvalidTxHash(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("contract error: {0}")]
    Contract(String),

    #[error("no wallet is configured for this deployment")]
    WalletUnavailable,

    #[error("insufficient balance: have {have} wei, need {need} wei")]
    InsufficientBalance { have: String, need: String },

    #[error("transaction failed: {0}")]
    TransactionFailed(String),
}
