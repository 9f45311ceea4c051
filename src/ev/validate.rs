use crate::error::{AnalyticsError, CardField};
use crate::model::card::Card;

pub fn validate_price(price_usd: f64) -> Result<(), AnalyticsError> {
    if !price_usd.is_finite() || price_usd <= 0.0 {
        return Err(AnalyticsError::InvalidPrice(price_usd));
    }
    Ok(())
}

/// Rejects empty input and any non-finite or negative `fmv`/`probability`.
pub fn validate_cards(cards: &[Card]) -> Result<(), AnalyticsError> {
    if cards.is_empty() {
        return Err(AnalyticsError::EmptyDistribution);
    }
    for (index, card) in cards.iter().enumerate() {
        check_field(index, CardField::Fmv, card.fmv)?;
        check_field(index, CardField::Probability, card.probability)?;
    }
    Ok(())
}

fn check_field(index: usize, field: CardField, value: f64) -> Result<(), AnalyticsError> {
    if !value.is_finite() {
        return Err(AnalyticsError::NonFiniteInput { index, field });
    }
    if value < 0.0 {
        return Err(AnalyticsError::NegativeInput {
            index,
            field,
            value,
        });
    }
    Ok(())
}
