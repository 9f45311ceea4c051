use anyhow::{bail, Context, Result};

use gacha_ev::config::Config;
use gacha_ev::gacha::GachaRestClient;
use gacha_ev::{logging, pipeline, report};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("failed to load config")?;
    logging::init_stderr(&config.logging.level);

    let client = GachaRestClient::new(&config.api.base_url, config.api.timeout())?;
    let tiers = config.report.report_tiers();
    tracing::info!(base_url = %client.base_url(), tiers = ?tiers, "Running pack EV report");

    let outcomes = pipeline::run_report(&client, &tiers).await?;
    let (text, failed) = report::render_report(&outcomes);
    println!("{}", text);

    if failed > 0 {
        bail!("{} of {} tiers failed", failed, outcomes.len());
    }
    Ok(())
}
