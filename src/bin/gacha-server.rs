use std::sync::Arc;

use anyhow::{Context, Result};

use gacha_ev::config::Config;
use gacha_ev::gacha::GachaRestClient;
use gacha_ev::logging;
use gacha_ev::server::{self, ServerContext};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("failed to load config")?;
    logging::init_stderr(&config.logging.level);

    let client = GachaRestClient::new(&config.api.base_url, config.api.timeout())?;
    let addr = config.server.socket_addr()?;
    let app = server::router(Arc::new(ServerContext {
        source: client,
        tiers: config.report.report_tiers(),
    }));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(addr = %addr, base_url = %config.api.base_url, "Report server listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
