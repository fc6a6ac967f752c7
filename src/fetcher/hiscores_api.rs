use log::{debug, info};
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};

use crate::errors::{OsrsError, Result};
use crate::models::PlayerIdentity;

pub const DEFAULT_HISCORES_BASE_URL: &str = "https://secure.runescape.com";

const USER_AGENT: &str = concat!("osrs-bytes/", env!("CARGO_PKG_VERSION"));

/// Fetches raw `index_lite.ws` feeds. One request at a time, spaced by
/// `request_delay` plus a little jitter.
pub struct HiscoresClient {
    client: Client,
    base_url: String,
    last_request: Option<Instant>,
    request_delay: Duration,
}

impl HiscoresClient {
    pub fn new(base_url: String, request_delay: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            last_request: None,
            request_delay,
        }
    }

    pub fn feed_url(&self, identity: &PlayerIdentity) -> String {
        format!(
            "{}/m={}/index_lite.ws",
            self.base_url,
            identity.account_type().endpoint()
        )
    }

    pub async fn fetch_feed(&mut self, identity: &PlayerIdentity) -> Result<String> {
        let jitter = Duration::from_millis(rand::random::<u64>() % 100);
        self.respect_rate_limit(self.request_delay + jitter).await;

        let url = self.feed_url(identity);
        info!("Fetching hiscores for {} from {}", identity, url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[("player", identity.name())])
            .send()
            .await?;
        self.last_request = Some(Instant::now());

        let status = response.status();
        debug!("Hiscores response status: {}", status);
        check_status(status, identity)?;

        Ok(response.text().await?)
    }

    async fn respect_rate_limit(&self, delay: Duration) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < delay {
                tokio::time::sleep(delay - elapsed).await;
            }
        }
    }
}

/// The hiscores answer 404 for names without an entry on the requested table.
fn check_status(status: StatusCode, identity: &PlayerIdentity) -> Result<()> {
    if status == StatusCode::NOT_FOUND {
        return Err(OsrsError::UpstreamNotFound(format!(
            "{} has no {} hiscores entry",
            identity.name(),
            identity.account_type()
        )));
    }
    if !status.is_success() {
        return Err(OsrsError::NetworkError(format!(
            "hiscores returned {} for {}",
            status, identity
        )));
    }
    Ok(())
}
