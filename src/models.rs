// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! # API Data Models
//!
//! Request and response data structures used by the REST API. All types
//! derive `Serialize`, `Deserialize`, and `ToSchema` for automatic JSON
//! handling and OpenAPI documentation.
//!
//! ## Amounts
//!
//! Monetary amounts travel through the API as decimal strings of token base
//! units (wei for native transfers, 6-decimal units for USDT-style tokens).
//! Strings avoid the precision loss a JSON number would introduce.
//!
//! ## Model Categories
//!
//! - **Donation Cases**: fundraising cases owned by welfare organizations
//! - **Adoptions**: adoption listings and the requests made against them
//! - **Payments**: chain-verified payment records
//! - **Profiles**: donor profile data

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Wallet Address Type
// =============================================================================

/// Ethereum-compatible wallet address wrapper.
///
/// Provides type safety for wallet addresses throughout the API.
/// Format: `0x` followed by 40 hexadecimal characters (20 bytes).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WalletAddress(pub String);

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(value: String) -> Self {
        WalletAddress(value)
    }
}

impl From<&str> for WalletAddress {
    fn from(value: &str) -> Self {
        WalletAddress(value.to_string())
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

// =============================================================================
// Payment Record
// =============================================================================

/// A chain-verified payment attached to a domain record.
///
/// Written exactly once: after a payment record exists, the hash is immutable
/// and the owning record never leaves its paid state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PaymentRecord {
    /// Transaction hash (0x + 64 hex chars), persisted verbatim as supplied.
    pub tx_hash: String,
    /// Amount in base units.
    pub amount: String,
    /// Block number the transaction was verified in.
    pub verified_block: u64,
    /// When the payment was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Client submission of a claimed payment for reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentSubmission {
    /// Transaction hash of the on-chain transfer.
    pub tx_hash: String,
    /// Amount in base units, as a decimal string.
    pub amount: String,
}

// =============================================================================
// Donation Case Models
// =============================================================================

/// Lifecycle status of a donation case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    /// Accepting donations.
    Open,
    /// Target reached; donations are no longer accepted.
    Funded,
    /// Closed by the organization or an admin.
    Closed,
}

/// A fundraising case owned by a welfare organization.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DonationCase {
    /// Unique identifier for this case.
    pub id: String,
    /// User ID of the owning organization.
    pub organization_id: String,
    /// Case title.
    pub title: String,
    /// Case description.
    pub description: String,
    /// Wallet that donations for this case must be sent to.
    pub beneficiary_wallet: WalletAddress,
    /// Fundraising target in base units.
    pub target_amount: String,
    /// Current status.
    pub status: CaseStatus,
    /// Whether a doctor has verified the medical claims of this case.
    pub medically_verified: bool,
    /// Verified donations recorded against this case.
    pub donations: Vec<CaseDonation>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A single verified donation toward a case.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CaseDonation {
    /// User ID of the donor.
    pub donor_id: String,
    /// The verified payment.
    pub payment: PaymentRecord,
}

/// Request to create a donation case.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCaseRequest {
    /// Case title.
    pub title: String,
    /// Case description.
    pub description: String,
    /// Wallet that donations must be sent to.
    pub beneficiary_wallet: WalletAddress,
    /// Fundraising target in base units.
    pub target_amount: String,
}

/// Request to update an existing donation case.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateCaseRequest {
    /// Updated title.
    pub title: String,
    /// Updated description.
    pub description: String,
    /// Updated status (cannot reopen a funded case).
    pub status: CaseStatus,
}

// =============================================================================
// Adoption Models
// =============================================================================

/// Lifecycle status of an adoption listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    /// Open for adoption requests.
    Available,
    /// An approved request is awaiting payment.
    Pending,
    /// Adoption fee paid; listing closed.
    Adopted,
}

/// An animal listed for adoption by a welfare organization.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AdoptionListing {
    /// Unique identifier for this listing.
    pub id: String,
    /// User ID of the owning organization.
    pub organization_id: String,
    /// Animal name.
    pub name: String,
    /// Animal species/breed.
    pub species: String,
    /// Listing description.
    pub description: String,
    /// Wallet the adoption fee must be sent to.
    pub payout_wallet: WalletAddress,
    /// Adoption fee in base units.
    pub fee_amount: String,
    /// Current status.
    pub status: ListingStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Request to create an adoption listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateListingRequest {
    /// Animal name.
    pub name: String,
    /// Animal species/breed.
    pub species: String,
    /// Listing description.
    pub description: String,
    /// Wallet the adoption fee must be sent to.
    pub payout_wallet: WalletAddress,
    /// Adoption fee in base units.
    pub fee_amount: String,
}

/// Status of an adoption request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting organization review.
    Pending,
    /// Approved; awaiting payment.
    Approved,
    /// Payment verified on chain. Terminal.
    Paid,
    /// Rejected by the organization.
    Rejected,
}

/// A request to adopt a listed animal.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AdoptionRequest {
    /// Unique identifier for this request.
    pub id: String,
    /// The listing this request targets.
    pub listing_id: String,
    /// User ID of the requester.
    pub requester_id: String,
    /// Free-form message to the organization.
    pub message: String,
    /// Current status.
    pub status: RequestStatus,
    /// Verified payment, present once the request is paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentRecord>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Request body for creating an adoption request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateAdoptionRequest {
    /// Free-form message to the organization.
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// Donor Profile Models
// =============================================================================

/// A donor's profile, keyed by their user ID.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DonorProfile {
    /// The owning user's ID (token `sub` claim).
    pub user_id: String,
    /// Display name.
    pub display_name: String,
    /// Contact email.
    pub email: String,
    /// Wallet address donations are made from, if the donor shared one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<WalletAddress>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Request to create or update the caller's profile.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpsertProfileRequest {
    /// Display name.
    pub display_name: String,
    /// Contact email.
    pub email: String,
    /// Optional wallet address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<WalletAddress>,
}
