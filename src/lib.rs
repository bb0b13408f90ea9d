// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

//! Givebridge - Donation Platform Backend
//!
//! This crate provides the backend service for a donation/charity platform:
//! donation cases, adoption listings, donor profiles, and an on-chain payment
//! path whose transactions are verified against the chain before any record
//! is marked paid.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Authentication and authorization (bearer JWT)
//! - `chain` - EVM chain integration (reads, transfers, receipt verification)
//! - `store` - In-memory domain store

pub mod api;
pub mod auth;
pub mod chain;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
