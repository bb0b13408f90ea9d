// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! Custodial donation wallet.
//!
//! Wraps a local signer over an EVM RPC provider: reads the service account's
//! native balance, refuses to send when funds don't cover amount plus fee,
//! submits a value transfer, and awaits one confirmation. A failed submission
//! surfaces directly to the caller; there is no retry.

use std::str::FromStr;

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::{Address, U256},
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, Provider, ProviderBuilder, RootProvider,
    },
    rpc::types::TransactionRequest,
    signers::local::PrivateKeySigner,
};

use super::client::ChainError;
use super::types::{NetworkConfig, NATIVE_TRANSFER_GAS};

/// HTTP provider type with signing capabilities.
type SigningProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Ethereum>,
>;

/// Result of a submitted donation transfer.
#[derive(Debug, Clone)]
pub struct DonationReceipt {
    /// Transaction hash.
    pub tx_hash: String,
    /// Block the transfer was confirmed in.
    pub block_number: u64,
    /// Explorer URL for the transaction.
    pub explorer_url: String,
}

/// Signer-backed wallet for custodial donation transfers.
#[derive(Debug)]
pub struct DonationWallet {
    network: NetworkConfig,
    address: Address,
    provider: SigningProvider,
}

impl DonationWallet {
    /// Connect a wallet from a hex private key (no 0x prefix required).
    pub fn connect(network: NetworkConfig, private_key_hex: &str) -> Result<Self, ChainError> {
        let key_hex = private_key_hex.trim_start_matches("0x");
        let key_bytes =
            alloy::hex::decode(key_hex).map_err(|e| ChainError::InvalidKey(e.to_string()))?;
        let signer = PrivateKeySigner::from_slice(&key_bytes)
            .map_err(|e| ChainError::InvalidKey(e.to_string()))?;
        let address = signer.address();

        let url: url::Url = network
            .rpc_url
            .parse()
            .map_err(|e: url::ParseError| ChainError::InvalidRpcUrl(e.to_string()))?;

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url);

        Ok(Self {
            network,
            address,
            provider,
        })
    }

    /// The wallet's account address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Native balance of the wallet account.
    pub async fn balance(&self) -> Result<U256, ChainError> {
        self.provider
            .get_balance(self.address)
            .await
            .map_err(|e| ChainError::Rpc(e.to_string()))
    }

    /// Submit a native value transfer and await one confirmation.
    ///
    /// Fails with `InsufficientBalance` before anything is sent when the
    /// account cannot cover amount plus the fee for a plain transfer.
    pub async fn donate(
        &self,
        to: &str,
        amount_wei: U256,
    ) -> Result<DonationReceipt, ChainError> {
        let to_addr = Address::from_str(to)
            .map_err(|e| ChainError::InvalidAddress(format!("invalid recipient: {e}")))?;

        let balance = self.balance().await?;
        let (max_fee_per_gas, priority_fee) = self.gas_prices().await?;
        let fee = U256::from(NATIVE_TRANSFER_GAS) * U256::from(max_fee_per_gas);

        if !has_sufficient_funds(balance, amount_wei, fee) {
            return Err(ChainError::InsufficientBalance {
                have: balance.to_string(),
                need: (amount_wei + fee).to_string(),
            });
        }

        let tx = TransactionRequest::default()
            .to(to_addr)
            .value(amount_wei)
            .max_fee_per_gas(max_fee_per_gas)
            .max_priority_fee_per_gas(priority_fee);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ChainError::TransactionFailed(format!("failed to send: {e}")))?;

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| ChainError::TransactionFailed(format!("no receipt: {e}")))?;

        if !receipt.status() {
            return Err(ChainError::TransactionFailed(
                "transaction reverted".to_string(),
            ));
        }

        let tx_hash = format!("{:?}", receipt.transaction_hash);
        let explorer_url = self.network.tx_url(&tx_hash);

        Ok(DonationReceipt {
            tx_hash,
            block_number: receipt.block_number.unwrap_or(0),
            explorer_url,
        })
    }

    /// Current gas prices from the network.
    async fn gas_prices(&self) -> Result<(u128, u128), ChainError> {
        let block = self
            .provider
            .get_block_by_number(alloy::eips::BlockNumberOrTag::Latest)
            .await
            .map_err(|e| ChainError::Rpc(format!("failed to get block: {e}")))?
            .ok_or_else(|| ChainError::Rpc("no latest block".to_string()))?;

        let base_fee: u128 = block
            .header
            .base_fee_per_gas
            .map(|f| f as u128)
            .unwrap_or(25_000_000_000u128);

        let priority_fee: u128 = 1_500_000_000;

        // Max fee = 2 * base_fee + priority_fee (allows for base fee increase)
        let max_fee = base_fee.saturating_mul(2).saturating_add(priority_fee);

        Ok((max_fee, priority_fee))
    }

    /// Get the network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }
}

/// Whether a balance covers a transfer amount plus the estimated fee.
pub fn has_sufficient_funds(balance: U256, amount: U256, estimated_fee: U256) -> bool {
    balance >= amount.saturating_add(estimated_fee)
}
