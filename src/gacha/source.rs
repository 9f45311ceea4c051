use std::future::Future;

use anyhow::Result;

use crate::model::card::Card;
use crate::model::quote::PriceQuote;

/// Where pack prices and chase-card lists come from.
pub trait GachaSource {
    /// Every tier's current price. The set of tiers is the set of quotes.
    fn fetch_prices(&self) -> impl Future<Output = Result<Vec<PriceQuote>>> + Send;

    fn fetch_chase_cards(&self, tier: &str) -> impl Future<Output = Result<Vec<Card>>> + Send;
}
