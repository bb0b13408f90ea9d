// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! Donation case endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::{AdminOnly, Auth, Role},
    error::ApiError,
    models::{CreateCaseRequest, DonationCase, UpdateCaseRequest},
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/v1/cases",
    tag = "Cases",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [DonationCase]),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_cases(
    Auth(_user): Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<DonationCase>>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.list_cases()))
}

#[utoipa::path(
    post,
    path = "/v1/cases",
    tag = "Cases",
    request_body = CreateCaseRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, body = DonationCase),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - requires organization role")
    )
)]
pub async fn create_case(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateCaseRequest>,
) -> Result<(StatusCode, Json<DonationCase>), ApiError> {
    if !user.has_role(Role::Organization) {
        return Err(ApiError::forbidden(
            "Only welfare organizations can create cases",
        ));
    }

    let mut store = state.store.write().await;
    let case = store.create_case(&user.user_id, request)?;

    tracing::info!(case_id = %case.id, organization = %case.organization_id, "case created");
    Ok((StatusCode::CREATED, Json(case)))
}

#[utoipa::path(
    get,
    path = "/v1/cases/{case_id}",
    tag = "Cases",
    params(("case_id" = String, Path, description = "Case ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, body = DonationCase),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Case not found")
    )
)]
pub async fn get_case(
    Auth(_user): Auth,
    State(state): State<AppState>,
    Path(case_id): Path<String>,
) -> Result<Json<DonationCase>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.case(&case_id)?))
}

#[utoipa::path(
    put,
    path = "/v1/cases/{case_id}",
    tag = "Cases",
    params(("case_id" = String, Path, description = "Case ID")),
    request_body = UpdateCaseRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, body = DonationCase),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - not the owning organization"),
        (status = 404, description = "Case not found")
    )
)]
pub async fn update_case(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(case_id): Path<String>,
    Json(request): Json<UpdateCaseRequest>,
) -> Result<Json<DonationCase>, ApiError> {
    let mut store = state.store.write().await;

    let case = store.case(&case_id)?;
    if case.organization_id != user.user_id && !user.is_admin() {
        return Err(ApiError::forbidden(
            "Only the owning organization can update this case",
        ));
    }

    Ok(Json(store.update_case(&case_id, request)?))
}

#[utoipa::path(
    delete,
    path = "/v1/cases/{case_id}",
    tag = "Cases",
    params(("case_id" = String, Path, description = "Case ID")),
    security(("bearer" = [])),
    responses(
        (status = 204),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin only"),
        (status = 404, description = "Case not found")
    )
)]
pub async fn delete_case(
    AdminOnly(_user): AdminOnly,
    State(state): State<AppState>,
    Path(case_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.delete_case(&case_id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/v1/cases/{case_id}/verify",
    tag = "Cases",
    params(("case_id" = String, Path, description = "Case ID")),
    security(("bearer" = [])),
    responses(
        (status = 200, body = DonationCase),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - doctor only"),
        (status = 404, description = "Case not found")
    )
)]
pub async fn verify_case(
    Auth(user): Auth,
    State(state): State<AppState>,
    Path(case_id): Path<String>,
) -> Result<Json<DonationCase>, ApiError> {
    if !user.has_role(Role::Doctor) {
        return Err(ApiError::forbidden(
            "Only doctors can medically verify a case",
        ));
    }

    let mut store = state.store.write().await;
    let case = store.mark_case_verified(&case_id)?;

    tracing::info!(case_id = %case.id, doctor = %user.user_id, "case medically verified");
    Ok(Json(case))
}
