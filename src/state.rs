// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

use std::sync::Arc;

use jsonwebtoken::DecodingKey;
use tokio::sync::RwLock;

use crate::chain::{ChainClient, DonationWallet, NullVerifier, ReceiptVerifier};
use crate::store::InMemoryStore;

/// Bearer token verification settings.
pub struct AuthConfig {
    /// HS256 key used to verify token signatures.
    pub decoding_key: DecodingKey,
    /// Expected `iss` claim, when issuer validation is enabled.
    pub issuer: Option<String>,
}

impl AuthConfig {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            issuer: None,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }
}

/// Chain handles shared across handlers. Present only when an RPC endpoint
/// is configured.
pub struct ChainContext {
    /// Read-only chain client.
    pub client: Arc<ChainClient>,
    /// Donation registry contract address, when deployed.
    pub registry_address: Option<String>,
    /// Custodial donation wallet, when a service key is configured.
    pub wallet: Option<DonationWallet>,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub auth: Arc<AuthConfig>,
    pub chain: Option<Arc<ChainContext>>,
    pub verifier: Arc<dyn ReceiptVerifier>,
}

impl AppState {
    pub fn new(store: InMemoryStore, auth: AuthConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            auth: Arc::new(auth),
            chain: None,
            verifier: Arc::new(NullVerifier),
        }
    }

    pub fn with_chain(mut self, chain: ChainContext) -> Self {
        self.chain = Some(Arc::new(chain));
        self
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn ReceiptVerifier>) -> Self {
        self.verifier = verifier;
        self
    }
}

impl Default for AppState {
    /// State for tests: empty store, fixed HS256 secret, no chain.
    fn default() -> Self {
        Self::new(InMemoryStore::new(), AuthConfig::new(b"test-secret"))
    }
}
