//! Property-based tests for the distribution analytics engine.

use proptest::prelude::*;

use gacha_ev::ev::{
    analyze, build_tail_curve, compute_metrics, resolve_scale, scale_for_sum, weighted_median,
    weighted_median_card, ProbabilityEncoding, ScaleFactor, TierAnalysis,
};
use gacha_ev::model::Card;

/// Strategy: 1-20 cards with arbitrary non-negative values and weights.
fn distribution_strategy() -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec((0.0..1000.0f64, 0.0..100.0f64), 1..20)
        .prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(fmv, probability)| Card::new(fmv, probability))
                .collect::<Vec<_>>()
        })
        .prop_filter("needs positive mass", |cards| {
            cards.iter().map(|c| c.probability).sum::<f64>() > 0.0
        })
}

/// Strategy: values drawn from a handful of prices so equal `fmv` is common.
fn colliding_distribution_strategy() -> impl Strategy<Value = Vec<Card>> {
    let fmv = prop::sample::select(vec![0.0, 1.0, 5.0, 25.0]);
    prop::collection::vec((fmv, 0.0..1.0f64), 2..16)
        .prop_map(|pairs| {
            pairs
                .into_iter()
                .enumerate()
                .map(|(i, (fmv, probability))| {
                    Card::new(fmv, probability).with_title(&format!("card-{i}"))
                })
                .collect::<Vec<_>>()
        })
        .prop_filter("needs positive mass", |cards| {
            cards.iter().map(|c| c.probability).sum::<f64>() > 0.0
        })
}

fn price_strategy() -> impl Strategy<Value = f64> {
    0.01..500.0f64
}

fn fmv_bounds(cards: &[Card]) -> (f64, f64) {
    let min = cards.iter().map(|c| c.fmv).fold(f64::INFINITY, f64::min);
    let max = cards.iter().map(|c| c.fmv).fold(f64::NEG_INFINITY, f64::max);
    (min, max)
}

/// Stable ascending order with the running scaled mass at each card.
fn cumulative_by_fmv<'a>(cards: &'a [Card], scale: &ScaleFactor) -> Vec<(&'a Card, f64)> {
    let mut sorted: Vec<&Card> = cards.iter().collect();
    sorted.sort_by(|a, b| a.fmv.total_cmp(&b.fmv));
    let mut running = 0.0;
    sorted
        .into_iter()
        .map(|card| {
            running += scale.apply(card.probability);
            (card, running)
        })
        .collect()
}

fn assert_median_crosses_half(cards: &[Card], scale: &ScaleFactor) -> Result<(), TestCaseError> {
    let walk = cumulative_by_fmv(cards, scale);
    let crossing = walk.iter().position(|(_, cumulative)| *cumulative >= 0.5);
    let chosen = weighted_median_card(cards, scale);

    match crossing {
        Some(i) => {
            let chosen = chosen.expect("median card exists when mass reaches one half");
            prop_assert!(std::ptr::eq(chosen, walk[i].0));
            prop_assert!(walk[i].1 >= 0.5);
            if i > 0 {
                prop_assert!(walk[i - 1].1 < 0.5, "previous cumulative={}", walk[i - 1].1);
            }
            prop_assert_eq!(weighted_median(cards, scale), walk[i].0.fmv);
        }
        None => {
            prop_assert!(chosen.is_none());
            prop_assert_eq!(weighted_median(cards, scale), 0.0);
        }
    }
    Ok(())
}

proptest! {
    // 1. Any positive sum has a finite scale; force-normalized sums reach 1
    #[test]
    fn arbitrary_sum_scales_to_unit_mass(raw_sum in 1e-6..1e6f64) {
        let scale = scale_for_sum(raw_sum).unwrap();
        prop_assert!(scale.value.is_finite() && scale.value > 0.0);
        if scale.encoding == ProbabilityEncoding::Arbitrary {
            prop_assert!((raw_sum * scale.value - 1.0).abs() < 1e-9, "raw_sum={raw_sum}");
        }
    }

    // 2. Resolved scale always brings the distribution within tolerance of 1
    #[test]
    fn resolved_mass_is_near_one(cards in distribution_strategy()) {
        let scale = resolve_scale(&cards).unwrap();
        let mass = scale.scaled_mass(&cards);
        let tolerance = match scale.encoding {
            ProbabilityEncoding::Probability => 1e-6 + 1e-9,
            ProbabilityEncoding::Percentage => 1e-4 + 1e-9,
            ProbabilityEncoding::Arbitrary => 1e-9,
        };
        prop_assert!((mass - 1.0).abs() < tolerance, "mass={mass} encoding={}", scale.encoding);
    }

    // 3. Expected value lies between the cheapest and the priciest card
    #[test]
    fn expected_value_within_fmv_bounds(cards in distribution_strategy(), price in price_strategy()) {
        let scale = resolve_scale(&cards).unwrap();
        let metrics = compute_metrics(&cards, &scale, price).unwrap();
        let mass = scale.scaled_mass(&cards);
        let (min, max) = fmv_bounds(&cards);
        let slack = 1e-9 * max.max(1.0);
        prop_assert!(metrics.expected_value >= min * mass - slack, "ev={} min={min}", metrics.expected_value);
        prop_assert!(metrics.expected_value <= max * mass + slack, "ev={} max={max}", metrics.expected_value);
    }

    // 4. Median is the first card whose running mass reaches one half
    #[test]
    fn weighted_median_is_first_half_crossing(cards in distribution_strategy()) {
        let scale = resolve_scale(&cards).unwrap();
        assert_median_crosses_half(&cards, &scale)?;
    }

    // 5. Among equal values the earliest input card is the median
    #[test]
    fn weighted_median_tie_break_keeps_input_order(cards in colliding_distribution_strategy()) {
        let scale = resolve_scale(&cards).unwrap();
        assert_median_crosses_half(&cards, &scale)?;

        if let Some(chosen) = weighted_median_card(&cards, &scale) {
            let walk = cumulative_by_fmv(&cards, &scale);
            let first_crossing = walk
                .iter()
                .find(|(_, cumulative)| *cumulative >= 0.5)
                .map(|(card, _)| card.title());
            prop_assert_eq!(Some(chosen.title()), first_crossing);
        }
    }

    // 6. Odds over cost is a percentage of the scaled mass
    #[test]
    fn odds_over_cost_is_bounded(cards in distribution_strategy(), price in price_strategy()) {
        let scale = resolve_scale(&cards).unwrap();
        let metrics = compute_metrics(&cards, &scale, price).unwrap();
        let mass = scale.scaled_mass(&cards);
        prop_assert!(metrics.odds_over_cost >= 0.0);
        prop_assert!(metrics.odds_over_cost <= 100.0 * mass + 1e-9, "odds={}", metrics.odds_over_cost);
    }

    // 7. Tail curve never rises and starts at the full scaled mass
    #[test]
    fn tail_curve_is_non_increasing(cards in distribution_strategy(), price in price_strategy()) {
        let scale = resolve_scale(&cards).unwrap();
        let curve = build_tail_curve(&cards, price, &scale).unwrap();
        prop_assert_eq!(curve.len(), cards.len());
        prop_assert!((curve[0].y - 100.0 * scale.scaled_mass(&cards)).abs() < 1e-9);
        for pair in curve.windows(2) {
            prop_assert!(pair[1].x >= pair[0].x);
            prop_assert!(pair[1].y <= pair[0].y + 1e-9, "y rose: {} -> {}", pair[0].y, pair[1].y);
        }
    }

    // 8. A finite analysis never carries a non-finite number
    #[test]
    fn analysis_is_finite(cards in distribution_strategy(), price in price_strategy()) {
        let TierAnalysis { scale, metrics, curve } = analyze(&cards, price).unwrap();
        prop_assert!(scale.value.is_finite());
        prop_assert!(metrics.expected_value.is_finite());
        prop_assert!(metrics.odds_over_cost.is_finite());
        prop_assert!(curve.iter().all(|p| p.y.is_finite() && p.x.is_finite()));
    }
}
