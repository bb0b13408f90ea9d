// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! Custodial wallet endpoints.
//!
//! Balance reads are open to any authenticated user; sending from the
//! service wallet is restricted to admins.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    auth::{AdminOnly, Auth},
    chain::{format_units, parse_base_units, NATIVE_DECIMALS},
    error::ApiError,
    state::AppState,
};

/// Service wallet balance response.
#[derive(Debug, Serialize, ToSchema)]
pub struct WalletBalanceResponse {
    /// Wallet account address.
    pub address: String,
    /// Native balance in wei.
    pub balance: String,
    /// Native balance formatted with decimals.
    pub balance_formatted: String,
    /// Network name.
    pub network: String,
}

/// Request to send a donation from the service wallet.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SendDonationRequest {
    /// Recipient address.
    pub to: String,
    /// Amount in wei, as a decimal string.
    pub amount: String,
}

/// Submitted donation transfer.
#[derive(Debug, Serialize, ToSchema)]
pub struct SendDonationResponse {
    /// Transaction hash of the transfer.
    pub tx_hash: String,
    /// Block the transfer was confirmed in.
    pub block_number: u64,
    /// Explorer URL for the transaction.
    pub explorer_url: String,
}

#[utoipa::path(
    get,
    path = "/v1/wallet/balance",
    tag = "Wallet",
    security(("bearer" = [])),
    responses(
        (status = 200, body = WalletBalanceResponse),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "No wallet configured or chain unavailable")
    )
)]
pub async fn wallet_balance(
    Auth(_user): Auth,
    State(state): State<AppState>,
) -> Result<Json<WalletBalanceResponse>, ApiError> {
    let wallet = service_wallet(&state)?;
    let balance = wallet.balance().await?;

    Ok(Json(WalletBalanceResponse {
        address: format!("{:?}", wallet.address()),
        balance: balance.to_string(),
        balance_formatted: format_units(balance, NATIVE_DECIMALS),
        network: wallet.network().name.clone(),
    }))
}

#[utoipa::path(
    post,
    path = "/v1/wallet/donate",
    tag = "Wallet",
    request_body = SendDonationRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, body = SendDonationResponse),
        (status = 400, description = "Malformed address or amount"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 422, description = "Insufficient wallet balance"),
        (status = 503, description = "No wallet configured or chain unavailable")
    )
)]
pub async fn send_donation(
    AdminOnly(user): AdminOnly,
    State(state): State<AppState>,
    Json(request): Json<SendDonationRequest>,
) -> Result<Json<SendDonationResponse>, ApiError> {
    let amount = parse_base_units(&request.amount)?;
    let wallet = service_wallet(&state)?;

    let receipt = wallet.donate(&request.to, amount).await?;

    tracing::info!(
        admin = %user.user_id,
        to = %request.to,
        amount = %request.amount,
        tx_hash = %receipt.tx_hash,
        "service wallet donation sent"
    );

    Ok(Json(SendDonationResponse {
        tx_hash: receipt.tx_hash,
        block_number: receipt.block_number,
        explorer_url: receipt.explorer_url,
    }))
}

fn service_wallet(state: &AppState) -> Result<&crate::chain::DonationWallet, ApiError> {
    state
        .chain
        .as_ref()
        .and_then(|c| c.wallet.as_ref())
        .ok_or_else(|| ApiError::from(crate::chain::ChainError::WalletUnavailable))
}
