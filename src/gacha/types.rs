use std::collections::BTreeMap;

use serde::Deserialize;

use crate::model::card::Card;

/// Deserialize a number or numeric string to f64. Anything that does not
/// parse becomes NaN so the analytics layer can reject it with a typed error.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    Ok(match v {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    })
}

/// Optional display field that some sources send as a number (e.g. `year: 1999`).
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(deserializer)?;
    match v {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(serde::de::Error::custom("expected string or number")),
    }
}

/// `GET /gacha/prices`
#[derive(Debug, Deserialize)]
pub struct PricesResponse {
    pub data: BTreeMap<String, TierPrice>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierPrice {
    #[serde(default = "nan", deserialize_with = "lenient_f64")]
    pub price_usd: f64,
}

fn nan() -> f64 {
    f64::NAN
}

/// `GET /gacha/chase-cards?tier=<tier>`
#[derive(Debug, Deserialize)]
pub struct ChaseCardsResponse {
    pub data: Vec<Card>,
}
