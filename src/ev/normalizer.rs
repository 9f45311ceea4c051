use crate::error::AnalyticsError;
use crate::ev::types::{ProbabilityEncoding, ScaleFactor};
use crate::ev::validate::validate_cards;
use crate::model::card::Card;

pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;
pub const PERCENTAGE_SUM_TOLERANCE: f64 = 1e-2;

/// Resolve the unit of the raw probability column.
///
/// The checks run in order and the first match wins: a total within
/// [`PROBABILITY_SUM_TOLERANCE`] of 1 is taken as-is, a total within
/// [`PERCENTAGE_SUM_TOLERANCE`] of 100 is read as percentages, and anything
/// else is force-normalized by `1 / total`. A zero total has no valid scale
/// and is reported as [`AnalyticsError::DegenerateDistribution`]; a total that
/// overflows, or is so small that `1 / total` does, is
/// [`AnalyticsError::NonFiniteScale`].
pub fn resolve_scale(cards: &[Card]) -> Result<ScaleFactor, AnalyticsError> {
    validate_cards(cards)?;
    let raw_sum: f64 = cards.iter().map(|c| c.probability).sum();
    scale_for_sum(raw_sum)
}

pub fn scale_for_sum(raw_sum: f64) -> Result<ScaleFactor, AnalyticsError> {
    if raw_sum.is_nan() || raw_sum <= 0.0 {
        return Err(AnalyticsError::DegenerateDistribution);
    }
    if raw_sum.is_infinite() {
        return Err(AnalyticsError::NonFiniteScale(raw_sum));
    }

    let (value, encoding) = if (raw_sum - 1.0).abs() < PROBABILITY_SUM_TOLERANCE {
        (1.0, ProbabilityEncoding::Probability)
    } else if (raw_sum - 100.0).abs() < PERCENTAGE_SUM_TOLERANCE {
        (0.01, ProbabilityEncoding::Percentage)
    } else {
        (1.0 / raw_sum, ProbabilityEncoding::Arbitrary)
    };
    if !value.is_finite() {
        return Err(AnalyticsError::NonFiniteScale(raw_sum));
    }

    Ok(ScaleFactor {
        value,
        raw_sum,
        encoding,
    })
}
