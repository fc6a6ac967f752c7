use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::errors::{OsrsError, Result};
use crate::models::{PlayerIdentity, PlayerStats};

/// Parsed stats for the players looked up during one session.
///
/// Not synchronized; share it behind a `Mutex` or keep one per task.
#[derive(Debug, Default)]
pub struct StatRepository {
    players: HashMap<PlayerIdentity, PlayerStats>,
}

impl StatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identity: &PlayerIdentity) -> Result<&PlayerStats> {
        self.players
            .get(identity)
            .ok_or_else(|| OsrsError::PlayerNotFound(identity.to_string()))
    }

    /// Stores `stats`, replacing whatever was held for the identity.
    pub fn put(&mut self, identity: PlayerIdentity, stats: PlayerStats) -> &PlayerStats {
        match self.players.entry(identity) {
            Entry::Occupied(mut slot) => {
                slot.insert(stats);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(stats),
        }
    }

    pub fn remove(&mut self, identity: &PlayerIdentity) -> Option<PlayerStats> {
        self.players.remove(identity)
    }

    pub fn contains(&self, identity: &PlayerIdentity) -> bool {
        self.players.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hiscores::parser::{parse_text, tests::synthetic_feed};
    use crate::models::{AccountType, Skill};

    #[test]
    fn test_get_missing_player() {
        let repo = StatRepository::new();
        let id = PlayerIdentity::new("Zezima", AccountType::Normal);
        assert!(matches!(repo.get(&id), Err(OsrsError::PlayerNotFound(_))));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_put_then_get_ignores_case() {
        let mut repo = StatRepository::new();
        let stats = parse_text(&synthetic_feed(), true).unwrap();
        repo.put(PlayerIdentity::new("Hess", AccountType::Normal), stats.clone());

        let fetched = repo.get(&PlayerIdentity::new("HESS", AccountType::Normal)).unwrap();
        assert_eq!(fetched, &stats);
        assert!(!repo.contains(&PlayerIdentity::new("hess", AccountType::IronMan)));
    }

    #[test]
    fn test_put_overwrites() {
        let mut repo = StatRepository::new();
        let id = PlayerIdentity::new("hess", AccountType::Normal);
        let first = parse_text(&synthetic_feed(), true).unwrap();
        let second = parse_text(
            &synthetic_feed().replacen("500,50,101333", "400,60,300000", 1),
            true,
        )
        .unwrap();

        repo.put(id.clone(), first);
        let stored = repo.put(id.clone(), second);
        assert_eq!(stored.skill(Skill::Construction).unwrap().level, 60);
        assert_eq!(repo.len(), 1);

        assert!(repo.remove(&id).is_some());
        assert!(repo.is_empty());
    }
}
