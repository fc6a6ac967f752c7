use log::{info, warn};
use reqwest::Client;

use crate::errors::{OsrsError, Result};
use crate::market::ItemCatalogue;

pub const DEFAULT_MARKET_SUMMARY_URL: &str = "https://rsbuddy.com/exchange/summary.json";
pub const DEFAULT_BUY_LIMITS_URL: &str = "https://raw.githubusercontent.com/Coffee-fueled-deadlines/OSRS-JSON-Item-Information/master/item_information.json";

pub struct MarketClient {
    client: Client,
    summary_url: String,
    buy_limits_url: String,
}

impl MarketClient {
    pub fn new(summary_url: String, buy_limits_url: String) -> Self {
        Self {
            client: Client::new(),
            summary_url,
            buy_limits_url,
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        info!("Fetching market data from: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OsrsError::ApiError(format!("{} returned {}", url, status)));
        }
        Ok(response.text().await?)
    }

    /// Downloads the summary and buy limits and indexes them. The buy-limit
    /// document is optional: if it cannot be fetched every item's limit is
    /// left empty.
    pub async fn fetch_catalogue(&self) -> Result<ItemCatalogue> {
        let summary = self.fetch_text(&self.summary_url).await?;

        let buy_limits = match self.fetch_text(&self.buy_limits_url).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Buy limits unavailable, continuing without them: {}", e);
                None
            }
        };

        ItemCatalogue::from_json(&summary, buy_limits.as_deref())
    }
}
