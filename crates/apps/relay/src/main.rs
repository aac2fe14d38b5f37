use std::sync::Arc;

use clap::Parser;
use relay::{router, AppState, Args, HttpUpstream, RelayConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = RelayConfig::from(Args::parse());
    let addr = config.addr;
    info!(
        "upstream {} (payload policy {:?}, timeout {:?})",
        config.upstream_url, config.payload_policy, config.upstream_timeout
    );

    let upstream = Arc::new(HttpUpstream::new(config.upstream_timeout, config.payload_policy));
    let app = router(AppState::new(config, upstream));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("relay listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
