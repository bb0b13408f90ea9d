// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! On-chain organization reads backed by the donation registry contract.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{auth::Auth, chain::OrganizationInfo, error::ApiError, state::AppState};

#[utoipa::path(
    get,
    path = "/v1/organizations/{address}",
    tag = "Organizations",
    params(("address" = String, Path, description = "Organization address")),
    security(("bearer" = [])),
    responses(
        (status = 200, body = OrganizationInfo),
        (status = 400, description = "Malformed address"),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Registry not configured or chain unavailable")
    )
)]
pub async fn get_organization(
    Auth(_user): Auth,
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<OrganizationInfo>, ApiError> {
    let Some(chain) = state.chain.as_ref() else {
        return Err(ApiError::service_unavailable(
            "no chain RPC endpoint is configured",
        ));
    };
    let Some(registry_address) = chain.registry_address.as_deref() else {
        return Err(ApiError::service_unavailable(
            "no donation registry is configured",
        ));
    };

    let registry = chain.client.registry(registry_address)?;
    let info = registry.organization_info(&address).await?;
    Ok(Json(info))
}
