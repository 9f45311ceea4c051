use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::AppError;
use crate::model::card::Card;
use crate::model::quote::PriceQuote;

use super::source::GachaSource;
use super::types::{ChaseCardsResponse, PricesResponse};

pub struct GachaRestClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GachaRestClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build gacha HTTP client")?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn prices_url(&self) -> Result<Url> {
        self.base_url
            .join("gacha/prices")
            .context("failed to build prices URL")
    }

    pub fn chase_cards_url(&self, tier: &str) -> Result<Url> {
        let mut url = self
            .base_url
            .join("gacha/chase-cards")
            .context("failed to build chase-cards URL")?;
        url.query_pairs_mut().append_pair("tier", tier);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(url = %url, "GET");
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(AppError::from)
            .with_context(|| format!("request to {} failed", url))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::SourceUnavailable {
                endpoint: url.path().to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = resp
            .text()
            .await
            .map_err(AppError::from)
            .with_context(|| format!("failed to read body from {}", url))?;
        let parsed = serde_json::from_str(&body)
            .map_err(AppError::from)
            .with_context(|| format!("failed to parse response from {}", url.path()))?;
        Ok(parsed)
    }
}

impl GachaSource for GachaRestClient {
    async fn fetch_prices(&self) -> Result<Vec<PriceQuote>> {
        let resp: PricesResponse = self.get_json(self.prices_url()?).await?;
        let quotes: Vec<PriceQuote> = resp
            .data
            .into_iter()
            .map(|(tier, price)| PriceQuote {
                tier,
                price_usd: price.price_usd,
            })
            .collect();
        tracing::info!(tiers = quotes.len(), "Fetched pack prices");
        Ok(quotes)
    }

    async fn fetch_chase_cards(&self, tier: &str) -> Result<Vec<Card>> {
        let resp: ChaseCardsResponse = self.get_json(self.chase_cards_url(tier)?).await?;
        tracing::info!(tier, cards = resp.data.len(), "Fetched chase cards");
        Ok(resp.data)
    }
}

/// Parse the base URL and make sure its path ends in `/` so relative joins
/// append instead of replacing the last segment.
pub fn normalize_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    let mut url =
        Url::parse(trimmed).with_context(|| format!("invalid API base URL '{}'", trimmed))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_keep_base_path_prefix() {
        let client =
            GachaRestClient::new("https://api.example.com/v1", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.prices_url().unwrap().as_str(),
            "https://api.example.com/v1/gacha/prices"
        );
        assert_eq!(
            client.chase_cards_url("Premium Plus").unwrap().as_str(),
            "https://api.example.com/v1/gacha/chase-cards?tier=Premium+Plus"
        );
    }

    #[test]
    fn normalize_base_url_rejects_garbage() {
        assert!(normalize_base_url("not a url").is_err());
        assert_eq!(
            normalize_base_url("http://localhost:3000/").unwrap().as_str(),
            "http://localhost:3000/"
        );
    }
}
