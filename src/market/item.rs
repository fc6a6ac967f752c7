use serde::{Deserialize, Serialize};

/// One entry of the exchange summary, keyed upstream by item id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketItem {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub members: bool,
    /// Store price, the base of the alchemy values.
    #[serde(default)]
    pub sp: i64,
    #[serde(default)]
    pub buy_average: i64,
    #[serde(default)]
    pub sell_average: i64,
    #[serde(default)]
    pub buy_quantity: i64,
    #[serde(default)]
    pub sell_quantity: i64,
    #[serde(default)]
    pub overall_average: Option<i64>,
    #[serde(default)]
    pub overall_quantity: Option<i64>,
    #[serde(default)]
    pub buy_limit: Option<i64>,
}

impl MarketItem {
    pub fn low_alch(&self) -> i64 {
        alch_value(self.sp, 40)
    }

    pub fn high_alch(&self) -> i64 {
        alch_value(self.sp, 60)
    }
}

// ceil(sp * percent / 100) in integers.
fn alch_value(shop_price: i64, percent: i64) -> i64 {
    let scaled = shop_price * percent;
    if scaled > 0 {
        (scaled + 99) / 100
    } else {
        scaled / 100
    }
}

/// Entry of the buy-limit document, keyed upstream by lower-case item name.
#[derive(Debug, Clone, Deserialize)]
pub struct BuyLimitEntry {
    pub item_name: String,
    pub buy_limit: Option<i64>,
}
