// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! Adoption listing and request endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{Auth, Role},
    error::ApiError,
    models::{AdoptionListing, AdoptionRequest, CreateAdoptionRequest, CreateListingRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/adoptions",
    tag = "Adoptions",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [AdoptionListing]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_listings(
    Auth(_user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdoptionListing>>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.list_listings()))
}

#[utoipa::path(
    post,
    path = "/v1/adoptions",
    tag = "Adoptions",
    request_body = CreateListingRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, body = AdoptionListing),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires organization role")
    )
)]
pub async fn create_listing(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateListingRequest>,
) -> Result<(StatusCode, Json<AdoptionListing>), ApiError> {
    if !user.has_role(Role::Organization) {
        return Err(ApiError::forbidden(
            "Only welfare organizations can create listings",
        ));
    }

    let mut store = state.store.write().await;
    let listing = store.create_listing(&user.user_id, request)?;

    tracing::info!(listing_id = %listing.id, organization = %listing.organization_id, "listing created");
    Ok((StatusCode::CREATED, Json(listing)))
}

#[utoipa::path(
    get,
    path = "/v1/adoptions/{listing_id}",
    tag = "Adoptions",
    params(("listing_id" = String, Path, description = "Listing ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, body = AdoptionListing),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn get_listing(
    Auth(_user): Auth,
    State(state): State<AppState>,
    Path(listing_id): Path<String>,
) -> Result<Json<AdoptionListing>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.listing(&listing_id)?))
}

#[utoipa::path(
    post,
    path = "/v1/adoptions/{listing_id}/requests",
    tag = "Adoptions",
    params(("listing_id" = String, Path, description = "Listing ID")),
    request_body = CreateAdoptionRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, body = AdoptionRequest),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Listing not found"),
        (status = 422, description = "Listing is not open for requests")
    )
)]
pub async fn create_request(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(listing_id): Path<String>,
    Json(request): Json<CreateAdoptionRequest>,
) -> Result<(StatusCode, Json<AdoptionRequest>), ApiError> {
    let mut store = state.store.write().await;
    let adoption_request = store.create_adoption_request(&listing_id, &user.user_id, request)?;
    Ok((StatusCode::CREATED, Json(adoption_request)))
}

/// Requests visible to the caller: admins see all, organizations see requests
/// against their listings, everyone else sees their own.
#[utoipa::path(
    get,
    path = "/v1/adoption-requests",
    tag = "Adoptions",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [AdoptionRequest]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_requests(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdoptionRequest>>, ApiError> {
    let store = state.store.read().await;
    let requests = match user.role {
        Role::Admin => store.all_requests(),
        Role::Organization => store.requests_for_organization(&user.user_id),
        _ => store.requests_by_requester(&user.user_id),
    };
    Ok(Json(requests))
}

#[utoipa::path(
    put,
    path = "/v1/adoption-requests/{request_id}/approve",
    tag = "Adoptions",
    params(("request_id" = String, Path, description = "Adoption request ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, body = AdoptionRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the listing's organization"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn approve_request(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<AdoptionRequest>, ApiError> {
    let mut store = state.store.write().await;
    ensure_listing_owner(&store, &request_id, &user.user_id, user.is_admin())?;
    Ok(Json(store.approve_request(&request_id)?))
}

#[utoipa::path(
    put,
    path = "/v1/adoption-requests/{request_id}/reject",
    tag = "Adoptions",
    params(("request_id" = String, Path, description = "Adoption request ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, body = AdoptionRequest),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the listing's organization"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn reject_request(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<AdoptionRequest>, ApiError> {
    let mut store = state.store.write().await;
    ensure_listing_owner(&store, &request_id, &user.user_id, user.is_admin())?;
    Ok(Json(store.reject_request(&request_id)?))
}

/// Review actions are restricted to the organization owning the listing.
fn ensure_listing_owner(
    store: &crate::store::InMemoryStore,
    request_id: &str,
    user_id: &str,
    is_admin: bool,
) -> Result<(), ApiError> {
    let request = store.adoption_request(request_id)?;
    let listing = store.listing(&request.listing_id)?;
    if listing.organization_id != user_id && !is_admin {
        return Err(ApiError::forbidden(
            "Only the listing's organization can review this request",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthenticatedUser;
    use crate::models::{ListingStatus, RequestStatus, WalletAddress};

    fn user(id: &str, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: id.to_string(),
            role,
            issuer: "test".to_string(),
            expires_at: 0,
        }
    }

    fn listing_request() -> CreateListingRequest {
        CreateListingRequest {
            name: "Biscuit".into(),
            species: "dog".into(),
            description: "friendly".into(),
            payout_wallet: WalletAddress::from("0xorg"),
            fee_amount: "50000000".into(),
        }
    }

    async fn seeded(state: &AppState) -> (AdoptionListing, AdoptionRequest) {
        let (_, Json(listing)) = create_listing(
            Auth(user("org_1", Role::Organization)),
            State(state.clone()),
            Json(listing_request()),
        )
        .await
        .unwrap();

        let (_, Json(request)) = create_request(
            Auth(user("donor_1", Role::Donor)),
            State(state.clone()),
            Path(listing.id.clone()),
            Json(CreateAdoptionRequest::default()),
        )
        .await
        .unwrap();

        (listing, request)
    }

    #[tokio::test]
    async fn create_listing_requires_organization_role() {
        let state = AppState::default();
        let err = create_listing(
            Auth(user("donor_1", Role::Donor)),
            State(state),
            Json(listing_request()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn request_lifecycle_approve() {
        let state = AppState::default();
        let (listing, request) = seeded(&state).await;

        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.listing_id, listing.id);

        // A stranger organization cannot approve.
        let err = approve_request(
            Auth(user("org_2", Role::Organization)),
            State(state.clone()),
            Path(request.id.clone()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);

        let Json(approved) = approve_request(
            Auth(user("org_1", Role::Organization)),
            State(state.clone()),
            Path(request.id.clone()),
        )
        .await
        .expect("owner can approve");
        assert_eq!(approved.status, RequestStatus::Approved);

        let Json(listing) = get_listing(
            Auth(user("donor_1", Role::Donor)),
            State(state),
            Path(listing.id),
        )
        .await
        .unwrap();
        assert_eq!(listing.status, ListingStatus::Pending);
    }

    #[tokio::test]
    async fn list_requests_scoped_by_role() {
        let state = AppState::default();
        let (_listing, _request) = seeded(&state).await;

        let Json(own) = list_requests(Auth(user("donor_1", Role::Donor)), State(state.clone()))
            .await
            .unwrap();
        assert_eq!(own.len(), 1);

        let Json(other) = list_requests(Auth(user("donor_2", Role::Donor)), State(state.clone()))
            .await
            .unwrap();
        assert!(other.is_empty());

        let Json(org) = list_requests(
            Auth(user("org_1", Role::Organization)),
            State(state.clone()),
        )
        .await
        .unwrap();
        assert_eq!(org.len(), 1);

        let Json(all) = list_requests(Auth(user("admin_1", Role::Admin)), State(state))
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn reject_request_flow() {
        let state = AppState::default();
        let (_listing, request) = seeded(&state).await;

        let Json(rejected) = reject_request(
            Auth(user("org_1", Role::Organization)),
            State(state),
            Path(request.id),
        )
        .await
        .expect("owner can reject");
        assert_eq!(rejected.status, RequestStatus::Rejected);
    }
}
