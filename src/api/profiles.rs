// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! Donor profile endpoints. Profiles are keyed by the token's `sub` claim, so
//! a caller can only ever read or write their own.

use axum::{extract::State, Json};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{DonorProfile, UpsertProfileRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/profile",
    tag = "Profiles",
    security(("bearer" = [])),
    responses(
        (status = 200, body = DonorProfile),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No profile yet")
    )
)]
pub async fn get_profile(
    Auth(user): Auth,
    State(state): State<AppState>,
) -> Result<Json<DonorProfile>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.profile(&user.user_id)?))
}

#[utoipa::path(
    put,
    path = "/v1/profile",
    tag = "Profiles",
    request_body = UpsertProfileRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, body = DonorProfile),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn upsert_profile(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<UpsertProfileRequest>,
) -> Result<Json<DonorProfile>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.upsert_profile(&user.user_id, request)))
}
