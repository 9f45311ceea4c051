pub mod metrics;
pub mod normalizer;
pub mod tail_curve;
pub mod types;
pub mod validate;

pub use metrics::{
    compute_metrics, expected_value, odds_over_cost, weighted_median, weighted_median_card,
};
pub use normalizer::{resolve_scale, scale_for_sum};
pub use tail_curve::{build_tail_curve, chance_at_least, log_value_range};
pub use types::{CurvePoint, Metrics, ProbabilityEncoding, ScaleFactor, TierAnalysis};

use crate::error::AnalyticsError;
use crate::model::card::Card;

/// Run the full pipeline for one tier: normalize, then metrics and curve.
pub fn analyze(cards: &[Card], price_usd: f64) -> Result<TierAnalysis, AnalyticsError> {
    validate::validate_price(price_usd)?;
    let scale = resolve_scale(cards)?;
    let metrics = compute_metrics(cards, &scale, price_usd)?;
    let curve = build_tail_curve(cards, price_usd, &scale)?;
    Ok(TierAnalysis {
        scale,
        metrics,
        curve,
    })
}
