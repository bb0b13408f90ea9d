// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! Receipt verification for client-claimed payments.
//!
//! The reconciliation endpoints never trust a caller-supplied transaction
//! hash. Before any record is marked paid, the claim is checked against the
//! chain: the receipt must exist and have succeeded, the recipient and value
//! must match what the record expects, and the transaction must be buried
//! under the configured confirmation depth.
//!
//! Two seams keep this testable without an RPC endpoint: handlers depend on
//! the [`ReceiptVerifier`] trait, and [`ChainVerifier`] itself depends on
//! [`ChainReads`] rather than a concrete client.

use std::str::FromStr;
use std::sync::Arc;

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use super::client::{ChainClient, ChainError, ReceiptSummary};

/// A client-claimed payment to be checked against the chain.
#[derive(Debug, Clone)]
pub struct PaymentClaim {
    /// Claimed transaction hash.
    pub tx_hash: String,
    /// Wallet the payment must have been sent to.
    pub expected_recipient: String,
    /// Value the transaction must carry, in wei.
    pub expected_amount: U256,
}

/// Outcome of a successful verification.
#[derive(Debug, Clone)]
pub struct VerifiedPayment {
    /// Block the transaction was included in.
    pub block_number: u64,
    /// Confirmation depth at the time of verification.
    pub confirmations: u64,
}

/// Reasons a claimed payment is rejected.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("invalid transaction hash: {0}")]
    InvalidTxHash(String),

    #[error("chain unavailable: {0}")]
    ChainUnavailable(String),

    #[error("no receipt found for the claimed transaction")]
    ReceiptNotFound,

    #[error("the claimed transaction reverted")]
    TransactionReverted,

    #[error("recipient mismatch: transaction paid {actual}, expected {expected}")]
    RecipientMismatch { expected: String, actual: String },

    #[error("amount mismatch: transaction carried {actual} wei, expected {expected} wei")]
    AmountMismatch { expected: String, actual: String },

    #[error("insufficient confirmations: {have} of {need}")]
    InsufficientConfirmations { have: u64, need: u64 },
}

/// Verification seam between the payment endpoints and the chain.
#[async_trait]
pub trait ReceiptVerifier: Send + Sync {
    /// Check a claimed payment, returning where it was confirmed.
    async fn verify(&self, claim: &PaymentClaim) -> Result<VerifiedPayment, VerifyError>;
}

/// Chain reads the verifier depends on.
#[async_trait]
pub trait ChainReads: Send + Sync {
    /// Receipt for a transaction, if one exists yet.
    async fn receipt(&self, tx_hash: TxHash) -> Result<Option<ReceiptSummary>, ChainError>;
    /// Value carried by a transaction, if the transaction is known.
    async fn transaction_value(&self, tx_hash: TxHash) -> Result<Option<U256>, ChainError>;
    /// Current head block number.
    async fn block_number(&self) -> Result<u64, ChainError>;
}

#[async_trait]
impl ChainReads for ChainClient {
    async fn receipt(&self, tx_hash: TxHash) -> Result<Option<ReceiptSummary>, ChainError> {
        ChainClient::receipt(self, tx_hash).await
    }

    async fn transaction_value(&self, tx_hash: TxHash) -> Result<Option<U256>, ChainError> {
        ChainClient::transaction_value(self, tx_hash).await
    }

    async fn block_number(&self) -> Result<u64, ChainError> {
        ChainClient::block_number(self).await
    }
}

/// Production verifier over any [`ChainReads`] source.
pub struct ChainVerifier<C = ChainClient> {
    client: Arc<C>,
    min_confirmations: u64,
}

impl<C: ChainReads> ChainVerifier<C> {
    pub fn new(client: Arc<C>, min_confirmations: u64) -> Self {
        Self {
            client,
            // A zero depth would accept a tx the moment it appears.
            min_confirmations: min_confirmations.max(1),
        }
    }
}

#[async_trait]
impl<C: ChainReads> ReceiptVerifier for ChainVerifier<C> {
    async fn verify(&self, claim: &PaymentClaim) -> Result<VerifiedPayment, VerifyError> {
        let hash = TxHash::from_str(&claim.tx_hash)
            .map_err(|e| VerifyError::InvalidTxHash(e.to_string()))?;
        let expected_recipient = Address::from_str(&claim.expected_recipient)
            .map_err(|e| VerifyError::ChainUnavailable(format!("bad expected recipient: {e}")))?;

        let receipt = self
            .client
            .receipt(hash)
            .await
            .map_err(|e| VerifyError::ChainUnavailable(e.to_string()))?
            .ok_or(VerifyError::ReceiptNotFound)?;

        if !receipt.success {
            return Err(VerifyError::TransactionReverted);
        }

        match receipt.to {
            Some(to) if to == expected_recipient => {}
            other => {
                return Err(VerifyError::RecipientMismatch {
                    expected: format!("{expected_recipient:?}"),
                    actual: other
                        .map(|a| format!("{a:?}"))
                        .unwrap_or_else(|| "contract creation".to_string()),
                });
            }
        }

        let value = self
            .client
            .transaction_value(hash)
            .await
            .map_err(|e| VerifyError::ChainUnavailable(e.to_string()))?
            .ok_or(VerifyError::ReceiptNotFound)?;

        if value != claim.expected_amount {
            return Err(VerifyError::AmountMismatch {
                expected: claim.expected_amount.to_string(),
                actual: value.to_string(),
            });
        }

        let block_number = receipt.block_number.ok_or(VerifyError::ReceiptNotFound)?;
        let head = self
            .client
            .block_number()
            .await
            .map_err(|e| VerifyError::ChainUnavailable(e.to_string()))?;

        let confirmations = head.saturating_sub(block_number).saturating_add(1);
        if confirmations < self.min_confirmations {
            return Err(VerifyError::InsufficientConfirmations {
                have: confirmations,
                need: self.min_confirmations,
            });
        }

        Ok(VerifiedPayment {
            block_number,
            confirmations,
        })
    }
}

/// Verifier used when no RPC endpoint is configured.
///
/// Rejects every claim; reconciliation is unavailable rather than trusting
/// the caller.
pub struct NullVerifier;

#[async_trait]
impl ReceiptVerifier for NullVerifier {
    async fn verify(&self, _claim: &PaymentClaim) -> Result<VerifiedPayment, VerifyError> {
        Err(VerifyError::ChainUnavailable(
            "no chain RPC endpoint is configured".to_string(),
        ))
    }
}
