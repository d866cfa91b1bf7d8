use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::http::HeaderValue;
use forwarder::DoClient;
use tracing::info;

mod config;
mod routes;

use config::load_settings;
use routes::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let token = settings
        .require_token()
        .context("proxy cannot start without a DigitalOcean API token")?;
    let upstream = DoClient::new(&settings.do_base_url, token)
        .context("failed to construct the upstream client")?;
    let origin: HeaderValue = settings
        .frontend_origin
        .parse()
        .context("frontend origin is not a valid CORS header value")?;

    let state = Arc::new(AppState { upstream });
    let app = build_router(state, origin);

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "proxy listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
