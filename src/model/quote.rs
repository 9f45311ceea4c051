use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub tier: String,
    pub price_usd: f64,
}

impl PriceQuote {
    pub fn new(tier: &str, price_usd: f64) -> Self {
        Self {
            tier: tier.to_string(),
            price_usd,
        }
    }
}
