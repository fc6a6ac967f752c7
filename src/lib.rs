//! Old School RuneScape hiscores and exchange data.
//!
//! The hiscores feed is a bare list of comma-separated numbers; [`hiscores::parse`]
//! maps it onto skills, clue tiers, bounty hunter, minigames and bosses by
//! position, and [`hiscores::lookup`] reads single values back by name.
//!
//! ```no_run
//! # async fn example() -> osrs_bytes::Result<()> {
//! let config = osrs_bytes::Config::from_env()?;
//! let mut hiscores = osrs_bytes::Hiscores::from_config(&config).await?;
//! let stats = hiscores.lookup("Zezima", "N").await?;
//! println!("attack: {}", stats.skill_stat("attack", "level")?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod fetcher;
pub mod hiscores;
pub mod market;
pub mod models;
pub mod storage;

pub use config::Config;
pub use errors::{OsrsError, Result};
pub use hiscores::{Hiscores, RawFeed, StatRepository};
pub use market::{ItemCatalogue, MarketItem};
pub use models::{AccountType, Family, PlayerIdentity, PlayerStats};
