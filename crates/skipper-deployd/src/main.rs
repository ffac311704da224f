use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use skipper_api::{AppState, HttpApi};
use skipper_core::auth::Authenticator;
use skipper_core::whitelist::Whitelist;
use skipper_observe::init_logger;
use skipper_swarm::SwarmClient;

mod config;
use config::DeploydConfig;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) configuration + logger
    let cfg = DeploydConfig::from_env()?;
    init_logger(&cfg.logger)?;

    // 2) auth + whitelist, warning once for each open mode
    let auth = Authenticator::new(cfg.credential.clone());
    if auth.is_open() {
        warn!("AUTH_KEY is not set; requests are not authenticated");
    }

    let whitelist = cfg
        .whitelist
        .as_deref()
        .map(Whitelist::parse)
        .unwrap_or_else(Whitelist::open);
    if whitelist.is_open() {
        warn!("WHITELIST is not set; any service may be updated");
    }

    // 3) engine client + HTTP surface
    let swarm = SwarmClient::from_host(cfg.docker_host.as_deref())?;
    let state = AppState::new(auth, whitelist, Arc::new(swarm));
    let router = HttpApi::new(Arc::new(state)).router();

    // 4) serve
    let addr = format!("0.0.0.0:{}", cfg.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "deploy control surface listening");

    axum::serve(listener, router).await?;
    Ok(())
}
