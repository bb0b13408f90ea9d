// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! Payment reconciliation endpoints.
//!
//! Clients pay on chain directly and then submit the transaction hash here.
//! The server never takes the claim at face value: the hash is checked
//! against the chain (receipt success, recipient, value, confirmation depth)
//! before any record is marked paid. The expected recipient and amount come
//! from the server-side record, not from the submission.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::{
    auth::Auth,
    chain::{parse_base_units, validate_tx_hash, PaymentClaim},
    error::ApiError,
    models::{AdoptionRequest, DonationCase, PaymentRecord, PaymentSubmission},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/v1/adoption-requests/{request_id}/payment",
    tag = "Payments",
    params(("request_id" = String, Path, description = "Adoption request ID")),
    request_body = PaymentSubmission,
    security(("bearer" = [])),
    responses(
        (status = 200, body = AdoptionRequest),
        (status = 400, description = "Malformed hash or amount"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the requester"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Already paid with a different transaction"),
        (status = 422, description = "Payment verification failed"),
        (status = 503, description = "Chain unavailable")
    )
)]
pub async fn record_adoption_payment(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    Json(submission): Json<PaymentSubmission>,
) -> Result<Json<AdoptionRequest>, ApiError> {
    validate_tx_hash(&submission.tx_hash)?;

    // Look up the expected recipient and fee while holding only a read lock;
    // verification is a slow network call.
    let (request, listing) = {
        let store = state.store.read().await;
        let request = store.adoption_request(&request_id)?;
        let listing = store.listing(&request.listing_id)?;
        (request, listing)
    };

    if request.requester_id != user.user_id && !user.is_admin() {
        return Err(ApiError::forbidden(
            "Only the requester can submit payment for this request",
        ));
    }

    // Same hash already recorded: idempotent success without touching the
    // chain again. A different hash against a paid request never verifies.
    if let Some(existing) = &request.payment {
        if existing.tx_hash == submission.tx_hash {
            return Ok(Json(request));
        }
        return Err(ApiError::conflict(
            "Request is already paid with a different transaction",
        ));
    }

    // The fee on the listing is the amount that must have moved on chain;
    // the submitted amount is informational only.
    let expected_amount = parse_base_units(&listing.fee_amount)?;
    let claim = PaymentClaim {
        tx_hash: submission.tx_hash.clone(),
        expected_recipient: listing.payout_wallet.to_string(),
        expected_amount,
    };
    let verified = state.verifier.verify(&claim).await?;

    let payment = PaymentRecord {
        tx_hash: submission.tx_hash,
        amount: listing.fee_amount.clone(),
        verified_block: verified.block_number,
        recorded_at: Utc::now(),
    };

    let mut store = state.store.write().await;
    let updated = store.apply_adoption_payment(&request_id, payment)?;

    tracing::info!(
        request_id = %updated.id,
        tx_hash = %updated.payment.as_ref().map(|p| p.tx_hash.as_str()).unwrap_or(""),
        block = verified.block_number,
        confirmations = verified.confirmations,
        "adoption payment verified and recorded"
    );
    Ok(Json(updated))
}

#[utoipa::path(
    post,
    path = "/v1/cases/{case_id}/donations",
    tag = "Payments",
    params(("case_id" = String, Path, description = "Case ID")),
    request_body = PaymentSubmission,
    security(("bearer" = [])),
    responses(
        (status = 200, body = DonationCase),
        (status = 400, description = "Malformed hash or amount"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Case not found"),
        (status = 422, description = "Payment verification failed"),
        (status = 503, description = "Chain unavailable")
    )
)]
pub async fn record_case_donation(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(case_id): Path<String>,
    Json(submission): Json<PaymentSubmission>,
) -> Result<Json<DonationCase>, ApiError> {
    validate_tx_hash(&submission.tx_hash)?;
    let expected_amount = parse_base_units(&submission.amount)?;

    let case = {
        let store = state.store.read().await;
        store.case(&case_id)?
    };

    // Resubmitting an already-recorded hash is a no-op.
    if case
        .donations
        .iter()
        .any(|d| d.payment.tx_hash == submission.tx_hash)
    {
        return Ok(Json(case));
    }

    // Donors choose the amount; the chain must agree with what they claim.
    let claim = PaymentClaim {
        tx_hash: submission.tx_hash.clone(),
        expected_recipient: case.beneficiary_wallet.to_string(),
        expected_amount,
    };
    let verified = state.verifier.verify(&claim).await?;

    let payment = PaymentRecord {
        tx_hash: submission.tx_hash,
        amount: submission.amount,
        verified_block: verified.block_number,
        recorded_at: Utc::now(),
    };

    let mut store = state.store.write().await;
    let updated = store.apply_case_donation(&case_id, &user.user_id, payment)?;

    tracing::info!(
        case_id = %updated.id,
        donor = %user.user_id,
        block = verified.block_number,
        "case donation verified and recorded"
    );
    Ok(Json(updated))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthenticatedUser, Role};
    use crate::chain::{ReceiptVerifier, VerifiedPayment, VerifyError};
    use crate::models::{
        CaseStatus, CreateAdoptionRequest, CreateCaseRequest, CreateListingRequest, RequestStatus,
        WalletAddress,
    };
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use std::sync::Arc;

    /// Stub verifier that accepts every claim.
    struct ApprovingVerifier;

    #[async_trait]
    impl ReceiptVerifier for ApprovingVerifier {
        async fn verify(&self, _claim: &PaymentClaim) -> Result<VerifiedPayment, VerifyError> {
            Ok(VerifiedPayment {
                block_number: 123,
                confirmations: 3,
            })
        }
    }

    /// Stub verifier that rejects every claim with an amount mismatch.
    struct RejectingVerifier;

    #[async_trait]
    impl ReceiptVerifier for RejectingVerifier {
        async fn verify(&self, claim: &PaymentClaim) -> Result<VerifiedPayment, VerifyError> {
            Err(VerifyError::AmountMismatch {
                expected: claim.expected_amount.to_string(),
                actual: "0".to_string(),
            })
        }
    }

    fn user(id: &str, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: id.to_string(),
            role,
            issuer: "test".to_string(),
            expires_at: 0,
        }
    }

    fn hash(byte: &str) -> String {
        format!("0x{}", byte.repeat(32))
    }

    fn submission(tx_byte: &str, amount: &str) -> PaymentSubmission {
        PaymentSubmission {
            tx_hash: hash(tx_byte),
            amount: amount.to_string(),
        }
    }

    /// Listing with an approved request from donor_1, fee 50000000.
    async fn approved_request(state: &AppState) -> AdoptionRequest {
        let mut store = state.store.write().await;
        let listing = store
            .create_listing(
                "org_1",
                CreateListingRequest {
                    name: "Biscuit".into(),
                    species: "dog".into(),
                    description: "friendly".into(),
                    payout_wallet: WalletAddress::from(
                        "0x0000000000000000000000000000000000000001",
                    ),
                    fee_amount: "50000000".into(),
                },
            )
            .unwrap();
        let request = store
            .create_adoption_request(&listing.id, "donor_1", CreateAdoptionRequest::default())
            .unwrap();
        store.approve_request(&request.id).unwrap()
    }

    async fn open_case(state: &AppState) -> DonationCase {
        let mut store = state.store.write().await;
        store
            .create_case(
                "org_1",
                CreateCaseRequest {
                    title: "surgery".into(),
                    description: "d".into(),
                    beneficiary_wallet: WalletAddress::from(
                        "0x0000000000000000000000000000000000000002",
                    ),
                    target_amount: "1000".into(),
                },
            )
            .unwrap()
    }

    #[tokio::test]
    async fn adoption_payment_happy_path() {
        let state = AppState::default().with_verifier(Arc::new(ApprovingVerifier));
        let request = approved_request(&state).await;

        let Json(paid) = record_adoption_payment(
            Auth(user("donor_1", Role::Donor)),
            State(state),
            Path(request.id),
            Json(submission("ab", "50000000")),
        )
        .await
        .expect("verified payment is recorded");

        assert_eq!(paid.status, RequestStatus::Paid);
        let payment = paid.payment.unwrap();
        assert_eq!(payment.tx_hash, hash("ab"));
        assert_eq!(payment.amount, "50000000");
        assert_eq!(payment.verified_block, 123);
    }

    #[tokio::test]
    async fn adoption_payment_rejected_claim_leaves_request_unpaid() {
        let state = AppState::default().with_verifier(Arc::new(RejectingVerifier));
        let request = approved_request(&state).await;

        let err = record_adoption_payment(
            Auth(user("donor_1", Role::Donor)),
            State(state.clone()),
            Path(request.id.clone()),
            Json(submission("ab", "50000000")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        let store = state.store.read().await;
        let stored = store.adoption_request(&request.id).unwrap();
        assert_eq!(stored.status, RequestStatus::Approved);
        assert!(stored.payment.is_none());
    }

    #[tokio::test]
    async fn adoption_payment_requires_requester() {
        let state = AppState::default().with_verifier(Arc::new(ApprovingVerifier));
        let request = approved_request(&state).await;

        let err = record_adoption_payment(
            Auth(user("donor_2", Role::Donor)),
            State(state),
            Path(request.id),
            Json(submission("ab", "50000000")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn adoption_payment_resubmission_is_idempotent() {
        let state = AppState::default().with_verifier(Arc::new(ApprovingVerifier));
        let request = approved_request(&state).await;

        record_adoption_payment(
            Auth(user("donor_1", Role::Donor)),
            State(state.clone()),
            Path(request.id.clone()),
            Json(submission("ab", "50000000")),
        )
        .await
        .unwrap();

        // Same hash again: succeeds without re-verifying (a rejecting verifier
        // would otherwise fail the call).
        let state = state.with_verifier(Arc::new(RejectingVerifier));
        let Json(second) = record_adoption_payment(
            Auth(user("donor_1", Role::Donor)),
            State(state.clone()),
            Path(request.id.clone()),
            Json(submission("ab", "50000000")),
        )
        .await
        .expect("resubmission of the recorded hash is a no-op");
        assert_eq!(second.status, RequestStatus::Paid);

        // A different hash is a conflict even if it would verify.
        let state = state.with_verifier(Arc::new(ApprovingVerifier));
        let err = record_adoption_payment(
            Auth(user("donor_1", Role::Donor)),
            State(state),
            Path(request.id),
            Json(submission("cd", "50000000")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn adoption_payment_rejects_malformed_hash() {
        let state = AppState::default().with_verifier(Arc::new(ApprovingVerifier));
        let request = approved_request(&state).await;

        let err = record_adoption_payment(
            Auth(user("donor_1", Role::Donor)),
            State(state),
            Path(request.id),
            Json(PaymentSubmission {
                tx_hash: "not-a-hash".into(),
                amount: "50000000".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn adoption_payment_unknown_request() {
        let state = AppState::default().with_verifier(Arc::new(ApprovingVerifier));
        let err = record_adoption_payment(
            Auth(user("donor_1", Role::Donor)),
            State(state),
            Path("missing".into()),
            Json(submission("ab", "1")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn payment_unavailable_without_chain() {
        // AppState::default() carries the NullVerifier.
        let state = AppState::default();
        let request = approved_request(&state).await;

        let err = record_adoption_payment(
            Auth(user("donor_1", Role::Donor)),
            State(state),
            Path(request.id),
            Json(submission("ab", "50000000")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn case_donation_happy_path_and_funding() {
        let state = AppState::default().with_verifier(Arc::new(ApprovingVerifier));
        let case = open_case(&state).await;

        let Json(updated) = record_case_donation(
            Auth(user("donor_1", Role::Donor)),
            State(state.clone()),
            Path(case.id.clone()),
            Json(submission("ab", "400")),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, CaseStatus::Open);
        assert_eq!(updated.donations.len(), 1);

        let Json(funded) = record_case_donation(
            Auth(user("donor_2", Role::Donor)),
            State(state),
            Path(case.id),
            Json(submission("cd", "600")),
        )
        .await
        .unwrap();
        assert_eq!(funded.status, CaseStatus::Funded);
        assert_eq!(funded.donations.len(), 2);
    }

    #[tokio::test]
    async fn case_donation_rejected_claim_records_nothing() {
        let state = AppState::default().with_verifier(Arc::new(RejectingVerifier));
        let case = open_case(&state).await;

        let err = record_case_donation(
            Auth(user("donor_1", Role::Donor)),
            State(state.clone()),
            Path(case.id.clone()),
            Json(submission("ab", "400")),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        let store = state.store.read().await;
        assert!(store.case(&case.id).unwrap().donations.is_empty());
    }

    #[tokio::test]
    async fn case_donation_rejects_bad_amount() {
        let state = AppState::default().with_verifier(Arc::new(ApprovingVerifier));
        let case = open_case(&state).await;

        let err = record_case_donation(
            Auth(user("donor_1", Role::Donor)),
            State(state),
            Path(case.id),
            Json(PaymentSubmission {
                tx_hash: hash("ab"),
                amount: "1.5".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unauthenticated_payment_is_rejected_before_any_write() {
        use axum::body::Body;
        use axum::http::Request;
        use tower::ServiceExt;

        let state = AppState::default().with_verifier(Arc::new(ApprovingVerifier));
        let request = approved_request(&state).await;
        let app = crate::api::router(state.clone());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/v1/adoption-requests/{}/payment", request.id))
                    .header("content-type", "application/json")
                    .body(Body::from(
                        serde_json::to_vec(&submission("ab", "50000000")).unwrap(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let store = state.store.read().await;
        let stored = store.adoption_request(&request.id).unwrap();
        assert_eq!(stored.status, RequestStatus::Approved);
        assert!(stored.payment.is_none());
    }
}
