// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! User roles for authorization.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User roles for authorization.
///
/// ## Role Hierarchy
///
/// - `Admin` - Full access to all endpoints and records
/// - `Organization` - Welfare organization; owns cases and adoption listings
/// - `Doctor` - Can medically verify donation cases
/// - `Donor` - Normal user; donates and files adoption requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access
    Admin,
    /// Welfare organization (owns cases and listings)
    Organization,
    /// Doctor (verifies medical claims on cases)
    Doctor,
    /// Donor (default for authenticated users)
    Donor,
}

impl Role {
    /// Check if this role has at least the privileges of the required role.
    pub fn has_privilege(&self, required: Role) -> bool {
        match (self, required) {
            // Admin can do anything
            (Role::Admin, _) => true,
            (Role::Organization, Role::Organization) => true,
            (Role::Doctor, Role::Doctor) => true,
            (Role::Donor, Role::Donor) => true,
            // Everything else is denied
            _ => false,
        }
    }

    /// Parse role from string (case-insensitive).
    /// Used when extracting the role claim from a bearer token.
    pub fn from_str(s: &str) -> Option<Role> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "organization" => Some(Role::Organization),
            "doctor" => Some(Role::Doctor),
            "donor" => Some(Role::Donor),
            _ => None,
        }
    }
}

impl Default for Role {
    /// Default role is Donor (least privilege for authenticated users).
    fn default() -> Self {
        Role::Donor
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Organization => write!(f, "organization"),
            Role::Doctor => write!(f, "doctor"),
            Role::Donor => write!(f, "donor"),
        }
    }
}
