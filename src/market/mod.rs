mod catalogue;
mod item;

pub use catalogue::ItemCatalogue;
pub use item::{BuyLimitEntry, MarketItem};
