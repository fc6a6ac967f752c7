use log::{debug, info};
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePool, sqlite::SqlitePoolOptions, Row};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::errors::Result;
use crate::models::PlayerIdentity;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:osrs_cache.db";

/// Raw hiscores feeds kept on disk with an expiry time, so repeated lookups
/// of the same player skip the (slow) upstream.
pub struct FeedCache {
    pool: SqlitePool,
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

impl FeedCache {
    pub async fn initialize(database_url: &str) -> Result<Self> {
        if !sqlx::Sqlite::database_exists(database_url).await? {
            info!("Creating new feed cache at {}", database_url);
            sqlx::Sqlite::create_database(database_url).await?;
        }

        let pool = SqlitePool::connect(database_url).await?;
        Self::migrate(pool).await
    }

    /// A private in-memory cache, gone when dropped.
    pub async fn in_memory() -> Result<Self> {
        // Every connection to `sqlite::memory:` is its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::migrate(pool).await
    }

    async fn migrate(pool: SqlitePool) -> Result<Self> {
        debug!("Running feed cache migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn get(&self, identity: &PlayerIdentity) -> Result<Option<String>> {
        self.get_at(identity, unix_now()).await
    }

    pub async fn get_at(&self, identity: &PlayerIdentity, now: i64) -> Result<Option<String>> {
        let row = sqlx::query(
            "SELECT raw_feed FROM feed_cache
             WHERE player_name = ? AND account_type = ? AND expires_at > ?",
        )
        .bind(identity.name())
        .bind(identity.account_type().tag())
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| row.get::<String, _>("raw_feed")))
    }

    pub async fn put(
        &self,
        identity: &PlayerIdentity,
        raw_feed: &str,
        ttl: Duration,
    ) -> Result<()> {
        self.put_at(identity, raw_feed, ttl, unix_now()).await
    }

    pub async fn put_at(
        &self,
        identity: &PlayerIdentity,
        raw_feed: &str,
        ttl: Duration,
        now: i64,
    ) -> Result<()> {
        let expires_at = now + ttl.as_secs() as i64;
        sqlx::query(
            r#"
            INSERT INTO feed_cache (player_name, account_type, raw_feed, fetched_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT (player_name, account_type) DO UPDATE SET
                raw_feed = excluded.raw_feed,
                fetched_at = excluded.fetched_at,
                expires_at = excluded.expires_at
            "#,
        )
        .bind(identity.name())
        .bind(identity.account_type().tag())
        .bind(raw_feed)
        .bind(now)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        debug!("Cached feed for {} until {}", identity, expires_at);
        Ok(())
    }

    /// Drops the entry for one player regardless of its expiry.
    pub async fn expire(&self, identity: &PlayerIdentity) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM feed_cache WHERE player_name = ? AND account_type = ?",
        )
        .bind(identity.name())
        .bind(identity.account_type().tag())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn purge_expired(&self) -> Result<u64> {
        self.purge_expired_at(unix_now()).await
    }

    pub async fn purge_expired_at(&self, now: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM feed_cache WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountType;

    fn zezima() -> PlayerIdentity {
        PlayerIdentity::new("Zezima", AccountType::Normal)
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let cache = FeedCache::in_memory().await.unwrap();
        cache
            .put_at(&zezima(), "1,99,13034431", Duration::from_secs(60), 1_000)
            .await
            .unwrap();

        let hit = cache.get_at(&zezima(), 1_030).await.unwrap();
        assert_eq!(hit.as_deref(), Some("1,99,13034431"));

        let other = PlayerIdentity::new("Zezima", AccountType::IronMan);
        assert_eq!(cache.get_at(&other, 1_030).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_entries_expire() {
        let cache = FeedCache::in_memory().await.unwrap();
        cache
            .put_at(&zezima(), "feed", Duration::from_secs(60), 1_000)
            .await
            .unwrap();

        assert!(cache.get_at(&zezima(), 1_059).await.unwrap().is_some());
        assert!(cache.get_at(&zezima(), 1_060).await.unwrap().is_none());
        assert_eq!(cache.purge_expired_at(1_060).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_put_replaces_and_expire_removes() {
        let cache = FeedCache::in_memory().await.unwrap();
        let ttl = Duration::from_secs(60);
        cache.put_at(&zezima(), "old", ttl, 1_000).await.unwrap();
        cache.put_at(&zezima(), "new", ttl, 1_010).await.unwrap();

        assert_eq!(cache.get_at(&zezima(), 1_020).await.unwrap().as_deref(), Some("new"));
        assert!(cache.expire(&zezima()).await.unwrap());
        assert!(!cache.expire(&zezima()).await.unwrap());
        assert_eq!(cache.get_at(&zezima(), 1_020).await.unwrap(), None);
    }
}
