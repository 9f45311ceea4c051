use crate::error::AnalyticsError;
use crate::ev::types::{percent_of, sorted_by_fmv, Metrics, ScaleFactor};
use crate::ev::validate::{validate_cards, validate_price};
use crate::model::card::Card;

/// Cumulative scaled probability the weighted median must reach.
pub const MEDIAN_MASS: f64 = 0.5;

pub fn compute_metrics(
    cards: &[Card],
    scale: &ScaleFactor,
    price_usd: f64,
) -> Result<Metrics, AnalyticsError> {
    validate_price(price_usd)?;
    validate_cards(cards)?;

    let expected_value = expected_value(cards, scale);
    let median_value = weighted_median(cards, scale);
    let profit = expected_value - price_usd;

    Ok(Metrics {
        expected_value,
        median_value,
        odds_over_cost: odds_over_cost(cards, scale, price_usd),
        cost_of_pack: price_usd,
        profit,
        ev_percent: percent_of(expected_value, price_usd),
        profit_percent: percent_of(profit, price_usd),
        median_percent: percent_of(median_value - price_usd, price_usd),
        prob_scale: scale.value,
    })
}

pub fn expected_value(cards: &[Card], scale: &ScaleFactor) -> f64 {
    cards
        .iter()
        .map(|c| scale.apply(c.probability) * c.fmv)
        .sum()
}

/// `fmv` of the first card, in ascending value order, at which the running
/// scaled probability reaches [`MEDIAN_MASS`]. Returns 0 when the total mass
/// never gets there.
pub fn weighted_median(cards: &[Card], scale: &ScaleFactor) -> f64 {
    weighted_median_card(cards, scale).map_or(0.0, |c| c.fmv)
}

/// The card [`weighted_median`] lands on. Cards with equal `fmv` are walked
/// in input order, so the earlier one wins when both could qualify.
pub fn weighted_median_card<'a>(cards: &'a [Card], scale: &ScaleFactor) -> Option<&'a Card> {
    sorted_by_fmv(cards)
        .into_iter()
        .scan(0.0, |cumulative, card| {
            *cumulative += scale.apply(card.probability);
            Some((card, *cumulative))
        })
        .find(|(_, cumulative)| *cumulative >= MEDIAN_MASS)
        .map(|(card, _)| card)
}

/// Percent chance of pulling a card worth at least `price_usd`.
pub fn odds_over_cost(cards: &[Card], scale: &ScaleFactor, price_usd: f64) -> f64 {
    cards
        .iter()
        .filter(|c| c.fmv >= price_usd)
        .map(|c| scale.apply(c.probability))
        .sum::<f64>()
        * 100.0
}
