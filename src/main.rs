// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use givebridge_server::{
    api,
    chain::{ChainClient, ChainVerifier, DonationWallet, NetworkConfig},
    config::Config,
    state::{AppState, AuthConfig, ChainContext},
    store::InMemoryStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = Config::from_env()?;

    let mut auth = AuthConfig::new(config.jwt_secret.as_bytes());
    if let Some(ref issuer) = config.jwt_issuer {
        auth = auth.with_issuer(issuer.clone());
    }

    let mut state = AppState::new(InMemoryStore::new(), auth);

    if let Some(ref rpc_url) = config.chain_rpc_url {
        let network = NetworkConfig::custom(rpc_url.clone(), config.chain_explorer_url.clone());

        let wallet = match config.service_wallet_key.as_deref() {
            Some(key) => Some(DonationWallet::connect(network.clone(), key)?),
            None => None,
        };

        let client = Arc::new(ChainClient::new(network)?);
        let verifier = Arc::new(ChainVerifier::new(
            client.clone(),
            config.min_confirmations,
        ));

        tracing::info!(
            rpc_url = %rpc_url,
            registry = config.registry_address.as_deref().unwrap_or("none"),
            wallet = wallet.is_some(),
            min_confirmations = config.min_confirmations,
            "chain features enabled"
        );

        state = state
            .with_chain(ChainContext {
                client,
                registry_address: config.registry_address.clone(),
                wallet,
            })
            .with_verifier(verifier);
    } else {
        tracing::warn!("no chain RPC endpoint configured; payment verification is unavailable");
    }

    let app = api::router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
