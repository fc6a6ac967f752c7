mod hiscores_api;
mod market_api;

pub use hiscores_api::{
    HiscoresClient,
    DEFAULT_HISCORES_BASE_URL,
};

pub use market_api::{
    MarketClient,
    DEFAULT_BUY_LIMITS_URL,
    DEFAULT_MARKET_SUMMARY_URL,
};
