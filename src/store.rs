// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! In-memory domain store.
//!
//! Holds donation cases, adoption listings and requests, and donor profiles.
//! All methods take and return owned model types; handlers hold the store
//! behind an `RwLock`, so a paid-state check and the write that depends on it
//! always happen under a single lock acquisition.

use std::collections::HashMap;

use alloy::primitives::U256;
use chrono::Utc;
use uuid::Uuid;

use crate::chain::parse_base_units;
use crate::error::ApiError;
use crate::models::{
    AdoptionListing, AdoptionRequest, CaseDonation, CaseStatus, CreateAdoptionRequest,
    CreateCaseRequest, CreateListingRequest, DonationCase, DonorProfile, ListingStatus,
    PaymentRecord, RequestStatus, UpdateCaseRequest, UpsertProfileRequest,
};

#[derive(Default)]
pub struct InMemoryStore {
    cases: HashMap<String, DonationCase>,
    listings: HashMap<String, AdoptionListing>,
    requests: HashMap<String, AdoptionRequest>,
    profiles: HashMap<String, DonorProfile>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Donation cases
    // =========================================================================

    pub fn list_cases(&self) -> Vec<DonationCase> {
        self.cases.values().cloned().collect()
    }

    pub fn case(&self, case_id: &str) -> Result<DonationCase, ApiError> {
        self.cases
            .get(case_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Case not found"))
    }

    pub fn create_case(
        &mut self,
        organization_id: &str,
        request: CreateCaseRequest,
    ) -> Result<DonationCase, ApiError> {
        parse_base_units(&request.target_amount)
            .map_err(|e| ApiError::bad_request(format!("Invalid target_amount: {e}")))?;

        let id = Uuid::new_v4().to_string();
        let case = DonationCase {
            id: id.clone(),
            organization_id: organization_id.to_string(),
            title: request.title,
            description: request.description,
            beneficiary_wallet: request.beneficiary_wallet,
            target_amount: request.target_amount,
            status: CaseStatus::Open,
            medically_verified: false,
            donations: Vec::new(),
            created_at: Utc::now(),
        };
        self.cases.insert(id, case.clone());
        Ok(case)
    }

    pub fn update_case(
        &mut self,
        case_id: &str,
        request: UpdateCaseRequest,
    ) -> Result<DonationCase, ApiError> {
        let Some(case) = self.cases.get_mut(case_id) else {
            return Err(ApiError::not_found("Case not found"));
        };

        // A funded case stays funded.
        if case.status == CaseStatus::Funded && request.status == CaseStatus::Open {
            return Err(ApiError::unprocessable("A funded case cannot be reopened"));
        }

        case.title = request.title;
        case.description = request.description;
        case.status = request.status;
        Ok(case.clone())
    }

    pub fn delete_case(&mut self, case_id: &str) -> Result<(), ApiError> {
        if self.cases.remove(case_id).is_some() {
            Ok(())
        } else {
            Err(ApiError::not_found("Case not found"))
        }
    }

    pub fn mark_case_verified(&mut self, case_id: &str) -> Result<DonationCase, ApiError> {
        let Some(case) = self.cases.get_mut(case_id) else {
            return Err(ApiError::not_found("Case not found"));
        };
        case.medically_verified = true;
        Ok(case.clone())
    }

    /// Record a verified donation against a case.
    ///
    /// Re-submitting a hash already recorded on the case is a no-op returning
    /// the current state. The case flips to `Funded` once the verified total
    /// reaches the target.
    pub fn apply_case_donation(
        &mut self,
        case_id: &str,
        donor_id: &str,
        payment: PaymentRecord,
    ) -> Result<DonationCase, ApiError> {
        let Some(case) = self.cases.get_mut(case_id) else {
            return Err(ApiError::not_found("Case not found"));
        };

        if case
            .donations
            .iter()
            .any(|d| d.payment.tx_hash == payment.tx_hash)
        {
            return Ok(case.clone());
        }

        if case.status != CaseStatus::Open {
            return Err(ApiError::unprocessable(
                "Case is not accepting donations",
            ));
        }

        case.donations.push(CaseDonation {
            donor_id: donor_id.to_string(),
            payment,
        });

        let total = case_total(case);
        let target = parse_base_units(&case.target_amount)
            .unwrap_or(U256::MAX);
        if total >= target {
            case.status = CaseStatus::Funded;
        }

        Ok(case.clone())
    }

    // =========================================================================
    // Adoption listings
    // =========================================================================

    pub fn list_listings(&self) -> Vec<AdoptionListing> {
        self.listings.values().cloned().collect()
    }

    pub fn listing(&self, listing_id: &str) -> Result<AdoptionListing, ApiError> {
        self.listings
            .get(listing_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Listing not found"))
    }

    pub fn create_listing(
        &mut self,
        organization_id: &str,
        request: CreateListingRequest,
    ) -> Result<AdoptionListing, ApiError> {
        parse_base_units(&request.fee_amount)
            .map_err(|e| ApiError::bad_request(format!("Invalid fee_amount: {e}")))?;

        let id = Uuid::new_v4().to_string();
        let listing = AdoptionListing {
            id: id.clone(),
            organization_id: organization_id.to_string(),
            name: request.name,
            species: request.species,
            description: request.description,
            payout_wallet: request.payout_wallet,
            fee_amount: request.fee_amount,
            status: ListingStatus::Available,
            created_at: Utc::now(),
        };
        self.listings.insert(id, listing.clone());
        Ok(listing)
    }

    // =========================================================================
    // Adoption requests
    // =========================================================================

    pub fn adoption_request(&self, request_id: &str) -> Result<AdoptionRequest, ApiError> {
        self.requests
            .get(request_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Adoption request not found"))
    }

    /// Requests visible to a requester (their own).
    pub fn requests_by_requester(&self, requester_id: &str) -> Vec<AdoptionRequest> {
        self.requests
            .values()
            .filter(|r| r.requester_id == requester_id)
            .cloned()
            .collect()
    }

    /// Requests against listings owned by an organization.
    pub fn requests_for_organization(&self, organization_id: &str) -> Vec<AdoptionRequest> {
        self.requests
            .values()
            .filter(|r| {
                self.listings
                    .get(&r.listing_id)
                    .is_some_and(|l| l.organization_id == organization_id)
            })
            .cloned()
            .collect()
    }

    pub fn all_requests(&self) -> Vec<AdoptionRequest> {
        self.requests.values().cloned().collect()
    }

    pub fn create_adoption_request(
        &mut self,
        listing_id: &str,
        requester_id: &str,
        request: CreateAdoptionRequest,
    ) -> Result<AdoptionRequest, ApiError> {
        let Some(listing) = self.listings.get(listing_id) else {
            return Err(ApiError::not_found("Listing not found"));
        };
        if listing.status != ListingStatus::Available {
            return Err(ApiError::unprocessable(
                "Listing is not open for adoption requests",
            ));
        }

        let id = Uuid::new_v4().to_string();
        let adoption_request = AdoptionRequest {
            id: id.clone(),
            listing_id: listing_id.to_string(),
            requester_id: requester_id.to_string(),
            message: request.message,
            status: RequestStatus::Pending,
            payment: None,
            created_at: Utc::now(),
        };
        self.requests.insert(id, adoption_request.clone());
        Ok(adoption_request)
    }

    /// Approve a pending request and take its listing off the market.
    ///
    /// The listing must still be available: several requests can be filed
    /// while a listing is open, but only one of them can ever be approved.
    pub fn approve_request(&mut self, request_id: &str) -> Result<AdoptionRequest, ApiError> {
        let Some(request) = self.requests.get_mut(request_id) else {
            return Err(ApiError::not_found("Adoption request not found"));
        };
        if request.status != RequestStatus::Pending {
            return Err(ApiError::unprocessable(
                "Only pending requests can be approved",
            ));
        }

        let Some(listing) = self.listings.get_mut(&request.listing_id) else {
            return Err(ApiError::not_found("Listing not found"));
        };
        if listing.status != ListingStatus::Available {
            return Err(ApiError::unprocessable(
                "Listing already has an approved request",
            ));
        }

        request.status = RequestStatus::Approved;
        listing.status = ListingStatus::Pending;

        Ok(request.clone())
    }

    pub fn reject_request(&mut self, request_id: &str) -> Result<AdoptionRequest, ApiError> {
        let Some(request) = self.requests.get_mut(request_id) else {
            return Err(ApiError::not_found("Adoption request not found"));
        };
        if request.status == RequestStatus::Paid {
            return Err(ApiError::unprocessable("A paid request cannot be rejected"));
        }
        request.status = RequestStatus::Rejected;
        Ok(request.clone())
    }

    /// Attach a verified payment to an adoption request and mark it paid.
    ///
    /// Idempotent for the same hash: a repeated submission returns the stored
    /// record unchanged. A different hash against a paid request is a
    /// conflict. Paid status never reverts.
    pub fn apply_adoption_payment(
        &mut self,
        request_id: &str,
        payment: PaymentRecord,
    ) -> Result<AdoptionRequest, ApiError> {
        let Some(request) = self.requests.get_mut(request_id) else {
            return Err(ApiError::not_found("Adoption request not found"));
        };

        if let Some(existing) = &request.payment {
            if existing.tx_hash == payment.tx_hash {
                return Ok(request.clone());
            }
            return Err(ApiError::conflict(
                "Request is already paid with a different transaction",
            ));
        }

        if request.status != RequestStatus::Approved {
            return Err(ApiError::unprocessable(
                "Request must be approved before payment",
            ));
        }

        request.payment = Some(payment);
        request.status = RequestStatus::Paid;

        if let Some(listing) = self.listings.get_mut(&request.listing_id) {
            listing.status = ListingStatus::Adopted;
        }

        Ok(request.clone())
    }

    // =========================================================================
    // Donor profiles
    // =========================================================================

    pub fn profile(&self, user_id: &str) -> Result<DonorProfile, ApiError> {
        self.profiles
            .get(user_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Profile not found"))
    }

    pub fn upsert_profile(
        &mut self,
        user_id: &str,
        request: UpsertProfileRequest,
    ) -> DonorProfile {
        let profile = DonorProfile {
            user_id: user_id.to_string(),
            display_name: request.display_name,
            email: request.email,
            wallet_address: request.wallet_address,
            updated_at: Utc::now(),
        };
        self.profiles.insert(user_id.to_string(), profile.clone());
        profile
    }
}

/// Sum of verified donation amounts on a case.
fn case_total(case: &DonationCase) -> U256 {
    case.donations
        .iter()
        .filter_map(|d| parse_base_units(&d.payment.amount).ok())
        .fold(U256::ZERO, |acc, v| acc.saturating_add(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WalletAddress;
    use axum::http::StatusCode;

    fn payment(hash: &str, amount: &str) -> PaymentRecord {
        PaymentRecord {
            tx_hash: hash.to_string(),
            amount: amount.to_string(),
            verified_block: 100,
            recorded_at: Utc::now(),
        }
    }

    fn seeded_store() -> (InMemoryStore, AdoptionRequest) {
        let mut store = InMemoryStore::new();
        let listing = store
            .create_listing(
                "org_1",
                CreateListingRequest {
                    name: "Biscuit".into(),
                    species: "dog".into(),
                    description: "friendly".into(),
                    payout_wallet: WalletAddress::from("0xorg"),
                    fee_amount: "50000000".into(),
                },
            )
            .unwrap();
        let request = store
            .create_adoption_request(&listing.id, "donor_1", CreateAdoptionRequest::default())
            .unwrap();
        let request = store.approve_request(&request.id).unwrap();
        (store, request)
    }

    #[test]
    fn case_lookup_not_found() {
        let store = InMemoryStore::new();
        let err = store.case("missing").unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn create_case_rejects_bad_target() {
        let mut store = InMemoryStore::new();
        let err = store
            .create_case(
                "org_1",
                CreateCaseRequest {
                    title: "t".into(),
                    description: "d".into(),
                    beneficiary_wallet: WalletAddress::from("0xabc"),
                    target_amount: "not-a-number".into(),
                },
            )
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn case_donation_flips_status_at_target() {
        let mut store = InMemoryStore::new();
        let case = store
            .create_case(
                "org_1",
                CreateCaseRequest {
                    title: "surgery".into(),
                    description: "d".into(),
                    beneficiary_wallet: WalletAddress::from("0xabc"),
                    target_amount: "1000".into(),
                },
            )
            .unwrap();

        let case = store
            .apply_case_donation(&case.id, "donor_1", payment("0xaaa", "400"))
            .unwrap();
        assert_eq!(case.status, CaseStatus::Open);

        let case = store
            .apply_case_donation(&case.id, "donor_2", payment("0xbbb", "600"))
            .unwrap();
        assert_eq!(case.status, CaseStatus::Funded);
        assert_eq!(case.donations.len(), 2);
    }

    #[test]
    fn case_donation_same_hash_is_noop() {
        let mut store = InMemoryStore::new();
        let case = store
            .create_case(
                "org_1",
                CreateCaseRequest {
                    title: "t".into(),
                    description: "d".into(),
                    beneficiary_wallet: WalletAddress::from("0xabc"),
                    target_amount: "1000".into(),
                },
            )
            .unwrap();

        store
            .apply_case_donation(&case.id, "donor_1", payment("0xaaa", "400"))
            .unwrap();
        let case = store
            .apply_case_donation(&case.id, "donor_1", payment("0xaaa", "400"))
            .unwrap();
        assert_eq!(case.donations.len(), 1);
    }

    #[test]
    fn funded_case_cannot_reopen() {
        let mut store = InMemoryStore::new();
        let case = store
            .create_case(
                "org_1",
                CreateCaseRequest {
                    title: "t".into(),
                    description: "d".into(),
                    beneficiary_wallet: WalletAddress::from("0xabc"),
                    target_amount: "100".into(),
                },
            )
            .unwrap();
        store
            .apply_case_donation(&case.id, "donor_1", payment("0xaaa", "100"))
            .unwrap();

        let err = store
            .update_case(
                &case.id,
                UpdateCaseRequest {
                    title: "t".into(),
                    description: "d".into(),
                    status: CaseStatus::Open,
                },
            )
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn adoption_request_requires_available_listing() {
        let (mut store, request) = seeded_store();
        // Listing moved to Pending on approval; new requests are rejected.
        let err = store
            .create_adoption_request(&request.listing_id, "donor_2", CreateAdoptionRequest::default())
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn only_one_request_per_listing_can_be_approved() {
        let mut store = InMemoryStore::new();
        let listing = store
            .create_listing(
                "org_1",
                CreateListingRequest {
                    name: "Biscuit".into(),
                    species: "dog".into(),
                    description: "friendly".into(),
                    payout_wallet: WalletAddress::from("0xorg"),
                    fee_amount: "50000000".into(),
                },
            )
            .unwrap();

        // Two requests filed while the listing is still available.
        let first = store
            .create_adoption_request(&listing.id, "donor_1", CreateAdoptionRequest::default())
            .unwrap();
        let second = store
            .create_adoption_request(&listing.id, "donor_2", CreateAdoptionRequest::default())
            .unwrap();

        store.approve_request(&first.id).unwrap();

        // The loser stays pending and cannot be approved or paid.
        let err = store.approve_request(&second.id).unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            store.adoption_request(&second.id).unwrap().status,
            RequestStatus::Pending
        );

        let err = store
            .apply_adoption_payment(&second.id, payment("0xdead", "50000000"))
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn payment_marks_paid_and_closes_listing() {
        let (mut store, request) = seeded_store();
        let updated = store
            .apply_adoption_payment(&request.id, payment("0xdead", "50000000"))
            .unwrap();

        assert_eq!(updated.status, RequestStatus::Paid);
        assert_eq!(updated.payment.as_ref().unwrap().tx_hash, "0xdead");

        let listing = store.listing(&request.listing_id).unwrap();
        assert_eq!(listing.status, ListingStatus::Adopted);
    }

    #[test]
    fn payment_same_hash_is_noop() {
        let (mut store, request) = seeded_store();
        store
            .apply_adoption_payment(&request.id, payment("0xdead", "50000000"))
            .unwrap();
        let second = store
            .apply_adoption_payment(&request.id, payment("0xdead", "50000000"))
            .unwrap();
        assert_eq!(second.status, RequestStatus::Paid);
        assert_eq!(second.payment.unwrap().tx_hash, "0xdead");
    }

    #[test]
    fn payment_different_hash_conflicts() {
        let (mut store, request) = seeded_store();
        store
            .apply_adoption_payment(&request.id, payment("0xdead", "50000000"))
            .unwrap();
        let err = store
            .apply_adoption_payment(&request.id, payment("0xbeef", "50000000"))
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);

        // Stored hash is unchanged.
        let stored = store.adoption_request(&request.id).unwrap();
        assert_eq!(stored.payment.unwrap().tx_hash, "0xdead");
    }

    #[test]
    fn payment_requires_approval() {
        let mut store = InMemoryStore::new();
        let listing = store
            .create_listing(
                "org_1",
                CreateListingRequest {
                    name: "Biscuit".into(),
                    species: "dog".into(),
                    description: "friendly".into(),
                    payout_wallet: WalletAddress::from("0xorg"),
                    fee_amount: "50000000".into(),
                },
            )
            .unwrap();
        let request = store
            .create_adoption_request(&listing.id, "donor_1", CreateAdoptionRequest::default())
            .unwrap();

        let err = store
            .apply_adoption_payment(&request.id, payment("0xdead", "50000000"))
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn paid_request_cannot_be_rejected() {
        let (mut store, request) = seeded_store();
        store
            .apply_adoption_payment(&request.id, payment("0xdead", "50000000"))
            .unwrap();
        let err = store.reject_request(&request.id).unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn payment_unknown_request_not_found() {
        let mut store = InMemoryStore::new();
        let err = store
            .apply_adoption_payment("missing", payment("0xdead", "1"))
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn requests_scoped_by_owner() {
        let (mut store, _request) = seeded_store();
        let other_listing = store
            .create_listing(
                "org_2",
                CreateListingRequest {
                    name: "Mittens".into(),
                    species: "cat".into(),
                    description: "aloof".into(),
                    payout_wallet: WalletAddress::from("0xorg2"),
                    fee_amount: "10".into(),
                },
            )
            .unwrap();
        store
            .create_adoption_request(&other_listing.id, "donor_2", CreateAdoptionRequest::default())
            .unwrap();

        assert_eq!(store.requests_by_requester("donor_1").len(), 1);
        assert_eq!(store.requests_by_requester("donor_2").len(), 1);
        assert_eq!(store.requests_for_organization("org_1").len(), 1);
        assert_eq!(store.requests_for_organization("org_2").len(), 1);
        assert_eq!(store.all_requests().len(), 2);
    }

    #[test]
    fn profile_upsert_and_lookup() {
        let mut store = InMemoryStore::new();
        assert_eq!(
            store.profile("donor_1").unwrap_err().status,
            StatusCode::NOT_FOUND
        );

        let profile = store.upsert_profile(
            "donor_1",
            UpsertProfileRequest {
                display_name: "Ada".into(),
                email: "ada@example.com".into(),
                wallet_address: None,
            },
        );
        assert_eq!(profile.user_id, "donor_1");
        assert_eq!(store.profile("donor_1").unwrap(), profile);
    }
}
