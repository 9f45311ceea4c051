use anyhow::{Context, Result};
use futures_util::future::join_all;
use serde::Serialize;

use crate::error::AppError;
use crate::ev::{self, TierAnalysis};
use crate::gacha::GachaSource;
use crate::model::card::Card;
use crate::model::quote::PriceQuote;

/// Everything a report surface needs for one tier.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierReport {
    pub tier: String,
    pub quote: PriceQuote,
    pub cards: Vec<Card>,
    pub analysis: TierAnalysis,
}

/// Result of one tier's fetch-then-compute run.
#[derive(Debug)]
pub struct TierOutcome {
    pub tier: String,
    pub result: Result<TierReport>,
}

impl TierOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error_message(&self) -> Option<String> {
        self.result.as_ref().err().map(|e| format!("{:#}", e))
    }
}

pub async fn discover_tiers<S: GachaSource + Sync>(source: &S) -> Result<Vec<String>> {
    let quotes = source
        .fetch_prices()
        .await
        .context("failed to discover tiers")?;
    Ok(quotes.into_iter().map(|q| q.tier).collect())
}

/// Fetch the tier's price and cards concurrently, then analyze them.
pub async fn run_tier<S: GachaSource + Sync>(source: &S, tier: &str) -> Result<TierReport> {
    tracing::debug!(tier, "Running tier pipeline");
    let (quotes, cards) =
        tokio::try_join!(source.fetch_prices(), source.fetch_chase_cards(tier))?;

    let quote = quotes
        .into_iter()
        .find(|q| q.tier == tier)
        .ok_or_else(|| AppError::UnknownTier(tier.to_string()))?;

    let analysis = ev::analyze(&cards, quote.price_usd)
        .map_err(AppError::from)
        .with_context(|| format!("failed to analyze tier '{}'", tier))?;

    tracing::info!(
        tier,
        price_usd = quote.price_usd,
        expected_value = analysis.metrics.expected_value,
        encoding = %analysis.scale.encoding,
        "Tier analyzed"
    );

    Ok(TierReport {
        tier: tier.to_string(),
        quote,
        cards,
        analysis,
    })
}

/// Run every tier concurrently. Outcomes come back in `tiers` order and a
/// failed tier never hides its siblings' results.
pub async fn run_tiers<S: GachaSource + Sync>(source: &S, tiers: &[String]) -> Vec<TierOutcome> {
    let runs = tiers.iter().map(|tier| async move {
        let result = run_tier(source, tier).await;
        if let Err(err) = &result {
            tracing::warn!(tier = %tier, error = %format!("{:#}", err), "Tier failed");
        }
        TierOutcome {
            tier: tier.clone(),
            result,
        }
    });
    join_all(runs).await
}

/// Run the configured tiers, or every tier the price source knows about when
/// none are configured.
pub async fn run_report<S: GachaSource + Sync>(
    source: &S,
    configured_tiers: &[String],
) -> Result<Vec<TierOutcome>> {
    let tiers = if configured_tiers.is_empty() {
        discover_tiers(source).await?
    } else {
        configured_tiers.to_vec()
    };
    Ok(run_tiers(source, &tiers).await)
}
