use log::{debug, warn};
use std::time::Duration;

use super::parser;
use super::repository::StatRepository;
use crate::config::Config;
use crate::errors::Result;
use crate::fetcher::HiscoresClient;
use crate::models::{PlayerIdentity, PlayerStats};
use crate::storage::FeedCache;

/// Fetch, cache, parse and store, in that order.
pub struct Hiscores {
    client: HiscoresClient,
    cache: Option<FeedCache>,
    cache_ttl: Duration,
    repository: StatRepository,
}

impl Hiscores {
    pub fn new(client: HiscoresClient, cache: Option<FeedCache>, cache_ttl: Duration) -> Self {
        Self {
            client,
            cache,
            cache_ttl,
            repository: StatRepository::new(),
        }
    }

    pub async fn from_config(config: &Config) -> Result<Self> {
        let client = HiscoresClient::new(config.hiscores_base_url.clone(), config.request_delay);
        let cache = match &config.database_url {
            Some(url) => Some(FeedCache::initialize(url).await?),
            None => None,
        };
        Ok(Self::new(client, cache, config.cache_ttl))
    }

    /// Looks a player up by name and account tag (`N`, `IM`, `UIM`, `HIM`/`HIC`).
    ///
    /// An unknown tag fails before any request is made.
    pub async fn lookup(&mut self, name: &str, account_tag: &str) -> Result<&PlayerStats> {
        let identity = PlayerIdentity::parse(name, account_tag)?;
        self.lookup_identity(identity).await
    }

    pub async fn lookup_identity(&mut self, identity: PlayerIdentity) -> Result<&PlayerStats> {
        let (raw, from_cache) = self.raw_feed(&identity).await?;

        let extended = identity.account_type().has_extended_categories();
        match parser::parse_text(&raw, extended) {
            Ok(stats) => Ok(self.repository.put(identity, stats)),
            Err(e) => {
                if from_cache {
                    warn!("Dropping unparseable cached feed for {}", identity);
                }
                if let Some(cache) = &self.cache {
                    if let Err(expire_err) = cache.expire(&identity).await {
                        warn!("Could not expire cached feed for {}: {}", identity, expire_err);
                    }
                }
                Err(e)
            }
        }
    }

    async fn raw_feed(&mut self, identity: &PlayerIdentity) -> Result<(String, bool)> {
        if let Some(cache) = &self.cache {
            if let Some(raw) = cache.get(identity).await? {
                debug!("Feed cache hit for {}", identity);
                return Ok((raw, true));
            }
        }

        let raw = self.client.fetch_feed(identity).await?;
        if let Some(cache) = &self.cache {
            cache.put(identity, &raw, self.cache_ttl).await?;
        }
        Ok((raw, false))
    }

    /// Parses an already fetched feed and stores it under `identity`.
    pub fn ingest(&mut self, identity: PlayerIdentity, raw: &str) -> Result<&PlayerStats> {
        let extended = identity.account_type().has_extended_categories();
        let stats = parser::parse_text(raw, extended)?;
        Ok(self.repository.put(identity, stats))
    }

    pub fn stats(&self, identity: &PlayerIdentity) -> Result<&PlayerStats> {
        self.repository.get(identity)
    }

    pub fn repository(&self) -> &StatRepository {
        &self.repository
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::OsrsError;
    use crate::hiscores::parser::tests::synthetic_feed;
    use crate::models::{AccountType, Skill};

    fn offline(cache: Option<FeedCache>) -> Hiscores {
        // Nothing listens on the discard port, so a real fetch fails fast.
        let client = HiscoresClient::new("http://127.0.0.1:9".to_string(), Duration::ZERO);
        Hiscores::new(client, cache, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn test_invalid_account_type_fails_before_fetch() {
        let mut hiscores = offline(None);
        let err = hiscores.lookup("Zezima", "XYZ").await.unwrap_err();
        assert!(matches!(err, OsrsError::InvalidAccountType(_)));
        assert!(hiscores.repository().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_served_from_cache() {
        let cache = FeedCache::in_memory().await.unwrap();
        let identity = PlayerIdentity::new("Hess", AccountType::Normal);
        cache
            .put(&identity, &synthetic_feed(), Duration::from_secs(60))
            .await
            .unwrap();

        let mut hiscores = offline(Some(cache));
        let stats = hiscores.lookup("HESS", "n").await.unwrap();
        assert_eq!(stats.skill(Skill::Construction).unwrap().level, 50);
        assert!(hiscores.stats(&identity).is_ok());
    }

    #[tokio::test]
    async fn test_malformed_cached_feed_is_expired() {
        let cache = FeedCache::in_memory().await.unwrap();
        let identity = PlayerIdentity::new("Hess", AccountType::Normal);
        cache
            .put(&identity, "1,2,3", Duration::from_secs(60))
            .await
            .unwrap();

        let mut hiscores = offline(Some(cache));
        let err = hiscores.lookup("hess", "N").await.unwrap_err();
        assert!(matches!(err, OsrsError::MalformedFeed(_)));
        assert!(hiscores.stats(&identity).is_err());

        let cache = hiscores.cache.as_ref().unwrap();
        assert_eq!(cache.get(&identity).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_expire_keeps_parse_error() {
        let cache = FeedCache::in_memory().await.unwrap();
        let identity = PlayerIdentity::new("Hess", AccountType::Normal);
        cache
            .put(&identity, "1,2,3", Duration::from_secs(60))
            .await
            .unwrap();
        sqlx::query(
            "CREATE TRIGGER keep_feeds BEFORE DELETE ON feed_cache \
             BEGIN SELECT RAISE(ABORT, 'read only'); END",
        )
        .execute(cache.pool())
        .await
        .unwrap();

        let mut hiscores = offline(Some(cache));
        let err = hiscores.lookup("hess", "N").await.unwrap_err();
        assert!(matches!(err, OsrsError::MalformedFeed(_)));
    }

    #[test]
    fn test_ingest_replaces_previous_stats() {
        let mut hiscores = offline(None);
        let identity = PlayerIdentity::new("hess", AccountType::IronMan);

        hiscores.ingest(identity.clone(), &synthetic_feed()).unwrap();
        let updated = synthetic_feed().replacen("500,50,101333", "499,51,115000", 1);
        hiscores.ingest(identity.clone(), &updated).unwrap();

        let stats = hiscores.stats(&identity).unwrap();
        assert_eq!(stats.skill_stat("construction", "rank").unwrap(), 499);
        assert_eq!(hiscores.repository().len(), 1);
    }

    #[test]
    fn test_failed_ingest_keeps_previous_stats() {
        let mut hiscores = offline(None);
        let identity = PlayerIdentity::new("hess", AccountType::Normal);

        hiscores.ingest(identity.clone(), &synthetic_feed()).unwrap();
        assert!(hiscores.ingest(identity.clone(), "garbage").is_err());
        assert_eq!(
            hiscores.stats(&identity).unwrap().skill_stat("construction", "level").unwrap(),
            50
        );
    }
}
