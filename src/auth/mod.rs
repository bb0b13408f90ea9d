// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! # Authentication Module
//!
//! Bearer JWT authentication for the Givebridge API.
//!
//! ## Auth Flow
//!
//! 1. The platform issues a short-lived HS256 JWT at login, carrying the
//!    user ID (`sub`) and role claims
//! 2. Clients send `Authorization: Bearer <JWT>` on every request
//! 3. The server verifies signature, expiry, and (optionally) issuer, and
//!    hands handlers an explicit [`AuthenticatedUser`] value — there is no
//!    request-global mutable identity
//!
//! ## Security
//!
//! - All `/v1` endpoints require authentication
//! - There is no server-side revocation list; invariants rely on expiry
//! - Clock skew tolerance is 60 seconds

pub mod claims;
pub mod error;
pub mod extractor;
pub mod roles;

pub use claims::AuthenticatedUser;
pub use error::AuthError;
pub use extractor::{AdminOnly, Auth};
pub use roles::Role;
