use log::{debug, warn};
use std::collections::HashMap;

use super::item::{BuyLimitEntry, MarketItem};
use crate::errors::{OsrsError, Result};

/// Exchange items indexed both by lower-cased name and by id.
#[derive(Debug, Default)]
pub struct ItemCatalogue {
    by_id: HashMap<String, MarketItem>,
    by_name: HashMap<String, String>,
}

impl ItemCatalogue {
    /// Builds the catalogue from the summary document and, optionally, the
    /// buy-limit document. Items absent from the latter get no buy limit.
    pub fn from_json(summary: &str, buy_limits: Option<&str>) -> Result<Self> {
        let items: HashMap<String, MarketItem> = serde_json::from_str(summary)?;
        if items.is_empty() {
            return Err(OsrsError::ApiError(
                "market API appears to be down".to_string(),
            ));
        }

        let limits: HashMap<String, BuyLimitEntry> = match buy_limits {
            Some(text) => serde_json::from_str(text)?,
            None => HashMap::new(),
        };

        let mut catalogue = Self::default();
        for (id, mut item) in items {
            let key = item.name.to_lowercase();
            item.buy_limit = limits
                .get(&key)
                .filter(|entry| entry.item_name.to_lowercase() == key)
                .and_then(|entry| entry.buy_limit);

            if let Some(previous) = catalogue.by_name.insert(key, id.clone()) {
                warn!("Item name '{}' maps to ids {} and {}", item.name, previous, id);
            }
            catalogue.by_id.insert(id, item);
        }

        debug!("Loaded {} market items", catalogue.by_id.len());
        Ok(catalogue)
    }

    /// Looks up by name first, then by id.
    pub fn get(&self, name_or_id: &str) -> Result<&MarketItem> {
        let key = name_or_id.trim().to_lowercase();
        self.by_name
            .get(&key)
            .and_then(|id| self.by_id.get(id))
            .or_else(|| self.by_id.get(&key))
            .ok_or_else(|| OsrsError::ItemNotFound(name_or_id.to_string()))
    }

    pub fn name(&self, name_or_id: &str) -> Result<&str> {
        Ok(&self.get(name_or_id)?.name)
    }

    pub fn id(&self, name_or_id: &str) -> Result<u32> {
        Ok(self.get(name_or_id)?.id)
    }

    pub fn buy_average(&self, name_or_id: &str) -> Result<i64> {
        Ok(self.get(name_or_id)?.buy_average)
    }

    pub fn sell_average(&self, name_or_id: &str) -> Result<i64> {
        Ok(self.get(name_or_id)?.sell_average)
    }

    pub fn buy_quantity(&self, name_or_id: &str) -> Result<i64> {
        Ok(self.get(name_or_id)?.buy_quantity)
    }

    pub fn sell_quantity(&self, name_or_id: &str) -> Result<i64> {
        Ok(self.get(name_or_id)?.sell_quantity)
    }

    pub fn buy_limit(&self, name_or_id: &str) -> Result<Option<i64>> {
        Ok(self.get(name_or_id)?.buy_limit)
    }

    pub fn shop_price(&self, name_or_id: &str) -> Result<i64> {
        Ok(self.get(name_or_id)?.sp)
    }

    pub fn low_alch(&self, name_or_id: &str) -> Result<i64> {
        Ok(self.get(name_or_id)?.low_alch())
    }

    pub fn high_alch(&self, name_or_id: &str) -> Result<i64> {
        Ok(self.get(name_or_id)?.high_alch())
    }

    pub fn is_members(&self, name_or_id: &str) -> Result<bool> {
        Ok(self.get(name_or_id)?.members)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: &str = r#"{
        "1213": {
            "id": 1213, "name": "Rune dagger", "members": false, "sp": 8000,
            "buy_average": 4850, "buy_quantity": 120,
            "sell_average": 4790, "sell_quantity": 95,
            "overall_average": 4820, "overall_quantity": 215
        },
        "2": {
            "id": 2, "name": "Cannonball", "members": true, "sp": 5,
            "buy_average": 190, "buy_quantity": 30000,
            "sell_average": 188, "sell_quantity": 28000
        }
    }"#;

    const BUY_LIMITS: &str = r#"{
        "rune dagger": { "item_name": "rune dagger", "buy_limit": 100 }
    }"#;

    fn catalogue() -> ItemCatalogue {
        ItemCatalogue::from_json(SUMMARY, Some(BUY_LIMITS)).unwrap()
    }

    #[test]
    fn test_lookup_by_name_and_id() {
        let items = catalogue();
        assert_eq!(items.len(), 2);
        assert_eq!(items.id("RUNE DAGGER").unwrap(), 1213);
        assert_eq!(items.name("1213").unwrap(), "Rune dagger");
    }

    #[test]
    fn test_price_projection() {
        let items = catalogue();
        assert_eq!(items.buy_average("rune dagger").unwrap(), 4850);
        assert_eq!(items.sell_average("rune dagger").unwrap(), 4790);
        assert_eq!(items.buy_quantity("rune dagger").unwrap(), 120);
        assert_eq!(items.sell_quantity("rune dagger").unwrap(), 95);
        assert_eq!(items.shop_price("rune dagger").unwrap(), 8000);
        assert_eq!(items.low_alch("rune dagger").unwrap(), 3200);
        assert_eq!(items.high_alch("1213").unwrap(), 4800);
        assert!(!items.is_members("rune dagger").unwrap());
        assert!(items.is_members("cannonball").unwrap());
    }

    #[test]
    fn test_buy_limits_are_joined_by_name() {
        let items = catalogue();
        assert_eq!(items.buy_limit("rune dagger").unwrap(), Some(100));
        assert_eq!(items.buy_limit("cannonball").unwrap(), None);

        let without = ItemCatalogue::from_json(SUMMARY, None).unwrap();
        assert_eq!(without.buy_limit("rune dagger").unwrap(), None);
    }

    #[test]
    fn test_unknown_item() {
        let items = catalogue();
        assert!(matches!(items.get("dragon claws"), Err(OsrsError::ItemNotFound(_))));
    }

    #[test]
    fn test_empty_or_invalid_summary() {
        assert!(matches!(
            ItemCatalogue::from_json("{}", None),
            Err(OsrsError::ApiError(_))
        ));
        assert!(matches!(
            ItemCatalogue::from_json("<html>", None),
            Err(OsrsError::ParseError(_))
        ));
    }
}
