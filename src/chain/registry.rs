// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! Donation registry contract interactions.

use std::str::FromStr;

use alloy::{
    primitives::Address,
    providers::Provider,
    sol,
};

use super::client::ChainError;
use super::types::{format_units, OrganizationInfo, USDT_DECIMALS};

// Registry interface for organization metadata and donation totals.
sol! {
    #[sol(rpc)]
    interface IDonationRegistry {
        function getOrganizationInfo(address org) external view returns (
            string name,
            string description,
            address wallet,
            bool isActive,
            uint256 totalDonations,
            address[] donors
        );
    }
}

/// Donation registry contract wrapper.
pub struct DonationRegistry<P> {
    contract: IDonationRegistry::IDonationRegistryInstance<P>,
}

impl<P: Provider + Clone> DonationRegistry<P> {
    /// Create a new registry instance at the given contract address.
    pub fn new(provider: &P, contract_address: &str) -> Result<Self, ChainError> {
        let address = Address::from_str(contract_address)
            .map_err(|e| ChainError::InvalidAddress(e.to_string()))?;

        let contract = IDonationRegistry::new(address, provider.clone());

        Ok(Self { contract })
    }

    /// Fetch organization metadata for display.
    pub async fn organization_info(
        &self,
        org_address: &str,
    ) -> Result<OrganizationInfo, ChainError> {
        let addr = Address::from_str(org_address)
            .map_err(|e| ChainError::InvalidAddress(e.to_string()))?;

        let info = self
            .contract
            .getOrganizationInfo(addr)
            .call()
            .await
            .map_err(|e| ChainError::Contract(e.to_string()))?;

        Ok(OrganizationInfo {
            address: format!("{addr:?}"),
            name: info.name,
            description: info.description,
            wallet: format!("{:?}", info.wallet),
            is_active: info.isActive,
            total_donations: info.totalDonations.to_string(),
            total_donations_formatted: format_units(info.totalDonations, USDT_DECIMALS),
            donors: info.donors.iter().map(|d| format!("{d:?}")).collect(),
        })
    }
}
