// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! EVM chain integration.
//!
//! This module provides:
//! - Read-only queries against the donation registry contract
//! - Native balance and block-number reads
//! - Custodial donation transfers from the service wallet
//! - Receipt verification for client-claimed payment transactions

pub mod client;
pub mod registry;
pub mod types;
pub mod verify;
pub mod wallet;

pub use client::{ChainClient, ChainError};
pub use registry::DonationRegistry;
pub use types::{
    format_units, parse_base_units, validate_tx_hash, NetworkConfig, OrganizationInfo,
    NATIVE_DECIMALS, USDT_DECIMALS,
};
pub use verify::{
    ChainReads, ChainVerifier, NullVerifier, PaymentClaim, ReceiptVerifier, VerifiedPayment,
    VerifyError,
};
pub use wallet::{DonationReceipt, DonationWallet};
