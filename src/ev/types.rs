use serde::Serialize;

use crate::model::card::Card;

/// How the raw probability column was encoded by the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityEncoding {
    /// Values already sum to 1.
    Probability,
    /// Values sum to 100.
    Percentage,
    /// Any other positive total; force-normalized.
    Arbitrary,
}

impl std::fmt::Display for ProbabilityEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Probability => write!(f, "probability"),
            Self::Percentage => write!(f, "percentage"),
            Self::Arbitrary => write!(f, "arbitrary"),
        }
    }
}

/// Multiplier turning raw probability values into true probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleFactor {
    pub value: f64,
    pub raw_sum: f64,
    pub encoding: ProbabilityEncoding,
}

impl ScaleFactor {
    pub fn apply(&self, raw_probability: f64) -> f64 {
        raw_probability * self.value
    }

    /// Sum of scaled probabilities over `cards`.
    pub fn scaled_mass(&self, cards: &[Card]) -> f64 {
        cards.iter().map(|c| self.apply(c.probability)).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub expected_value: f64,
    pub median_value: f64,
    /// Percent chance of pulling a card worth at least the pack price.
    pub odds_over_cost: f64,
    pub cost_of_pack: f64,
    pub profit: f64,
    pub ev_percent: f64,
    pub profit_percent: f64,
    pub median_percent: f64,
    pub prob_scale: f64,
}

/// One step of the survival curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurvePoint {
    /// Value threshold, floored at [`MIN_CURVE_X`] for log axes.
    pub x: f64,
    /// Percent chance of pulling a card worth at least `x`.
    pub y: f64,
    pub profit_pct: f64,
    /// Unfloored card value behind this point.
    pub fmv: f64,
}

pub const MIN_CURVE_X: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierAnalysis {
    pub scale: ScaleFactor,
    pub metrics: Metrics,
    pub curve: Vec<CurvePoint>,
}

/// Cards in ascending `fmv` order. The sort is stable, so equal values keep
/// their input order.
pub(crate) fn sorted_by_fmv(cards: &[Card]) -> Vec<&Card> {
    let mut sorted: Vec<&Card> = cards.iter().collect();
    sorted.sort_by(|a, b| a.fmv.total_cmp(&b.fmv));
    sorted
}

pub(crate) fn percent_of(value: f64, price_usd: f64) -> f64 {
    value / price_usd * 100.0
}
