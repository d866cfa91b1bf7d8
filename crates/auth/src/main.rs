use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use auth::{build_router, config::load_settings, AuthService};
use storage::Storage;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let tokens = settings
        .token_config()
        .context("auth service cannot start without a JWT secret")?;
    let storage = Storage::new(&settings.database_url)
        .await
        .context("failed to open user database")?;

    let service = Arc::new(AuthService::new(storage, tokens));
    let app = build_router(service);

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "auth service listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
