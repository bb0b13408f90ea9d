// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::AuthenticatedUser,
    chain::OrganizationInfo,
    models::{
        AdoptionListing, AdoptionRequest, CaseDonation, CreateAdoptionRequest, CreateCaseRequest,
        CreateListingRequest, DonationCase, DonorProfile, PaymentRecord, PaymentSubmission,
        UpdateCaseRequest, UpsertProfileRequest, WalletAddress,
    },
    state::AppState,
};

pub mod adoptions;
pub mod cases;
pub mod health;
pub mod organizations;
pub mod payments;
pub mod profiles;
pub mod wallet;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/cases", get(cases::list_cases).post(cases::create_case))
        .route(
            "/cases/{case_id}",
            get(cases::get_case)
                .put(cases::update_case)
                .delete(cases::delete_case),
        )
        .route("/cases/{case_id}/verify", put(cases::verify_case))
        .route(
            "/cases/{case_id}/donations",
            post(payments::record_case_donation),
        )
        .route(
            "/adoptions",
            get(adoptions::list_listings).post(adoptions::create_listing),
        )
        .route("/adoptions/{listing_id}", get(adoptions::get_listing))
        .route(
            "/adoptions/{listing_id}/requests",
            post(adoptions::create_request),
        )
        .route("/adoption-requests", get(adoptions::list_requests))
        .route(
            "/adoption-requests/{request_id}/approve",
            put(adoptions::approve_request),
        )
        .route(
            "/adoption-requests/{request_id}/reject",
            put(adoptions::reject_request),
        )
        .route(
            "/adoption-requests/{request_id}/payment",
            post(payments::record_adoption_payment),
        )
        .route(
            "/profile",
            get(profiles::get_profile).put(profiles::upsert_profile),
        )
        .route(
            "/organizations/{address}",
            get(organizations::get_organization),
        )
        .route("/wallet/balance", get(wallet::wallet_balance))
        .route("/wallet/donate", post(wallet::send_donation))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    paths(
        health::health,
        health::liveness,
        health::readiness,
        cases::list_cases,
        cases::create_case,
        cases::get_case,
        cases::update_case,
        cases::delete_case,
        cases::verify_case,
        adoptions::list_listings,
        adoptions::create_listing,
        adoptions::get_listing,
        adoptions::create_request,
        adoptions::list_requests,
        adoptions::approve_request,
        adoptions::reject_request,
        payments::record_adoption_payment,
        payments::record_case_donation,
        profiles::get_profile,
        profiles::upsert_profile,
        organizations::get_organization,
        wallet::wallet_balance,
        wallet::send_donation
    ),
    components(
        schemas(
            AuthenticatedUser,
            WalletAddress,
            DonationCase,
            CaseDonation,
            CreateCaseRequest,
            UpdateCaseRequest,
            AdoptionListing,
            CreateListingRequest,
            AdoptionRequest,
            CreateAdoptionRequest,
            PaymentRecord,
            PaymentSubmission,
            DonorProfile,
            UpsertProfileRequest,
            OrganizationInfo,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks,
            wallet::WalletBalanceResponse,
            wallet::SendDonationRequest,
            wallet::SendDonationResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Cases", description = "Donation case management"),
        (name = "Adoptions", description = "Adoption listings and requests"),
        (name = "Payments", description = "Chain-verified payment reconciliation"),
        (name = "Profiles", description = "Donor profiles"),
        (name = "Organizations", description = "On-chain organization reads"),
        (name = "Wallet", description = "Custodial donation wallet")
    )
)]
struct ApiDoc;
