use crate::error::AnalyticsError;
use crate::ev::types::{percent_of, sorted_by_fmv, CurvePoint, ScaleFactor, MIN_CURVE_X};
use crate::ev::validate::{validate_cards, validate_price};
use crate::model::card::Card;

/// Survival curve over the distribution, one point per card in ascending
/// `fmv` order. Each point's `y` includes the card's own mass; it is
/// subtracted only after the point is emitted.
pub fn build_tail_curve(
    cards: &[Card],
    price_usd: f64,
    scale: &ScaleFactor,
) -> Result<Vec<CurvePoint>, AnalyticsError> {
    validate_price(price_usd)?;
    validate_cards(cards)?;

    let total_mass = scale.scaled_mass(cards);
    let curve = sorted_by_fmv(cards)
        .into_iter()
        .scan(total_mass, |tail, card| {
            let point = CurvePoint {
                x: card.fmv.max(MIN_CURVE_X),
                y: *tail * 100.0,
                profit_pct: percent_of(card.fmv - price_usd, price_usd),
                fmv: card.fmv,
            };
            *tail -= scale.apply(card.probability);
            Some(point)
        })
        .collect();
    Ok(curve)
}

/// Percent chance of pulling a card worth at least `value`, read off a curve.
/// Compares against each point's real `fmv`, not the floored `x`.
pub fn chance_at_least(curve: &[CurvePoint], value: f64) -> f64 {
    curve
        .iter()
        .find(|p| p.fmv >= value)
        .map_or(0.0, |p| p.y)
}

/// log10 bounds of a value axis covering the curve and the pack price.
/// A single-valued range is widened to one decade.
pub fn log_value_range(curve: &[CurvePoint], price_usd: f64) -> Option<(f64, f64)> {
    let min_x = curve.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = curve.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    if !min_x.is_finite() || !max_x.is_finite() {
        return None;
    }
    let lo = min_x.min(price_usd).max(MIN_CURVE_X).log10();
    let hi = max_x.max(price_usd).log10();
    if hi - lo < 1e-9 {
        Some((lo, lo + 1.0))
    } else {
        Some((lo, hi))
    }
}
