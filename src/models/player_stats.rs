use serde::Serialize;
use std::collections::BTreeMap;

use super::catalogue::{Boss, BountyType, ClueTier, Minigame, Skill};
use super::records::{ScoreRecord, SkillRecord, TotalRecord};

/// Clue, bounty hunter, minigame and boss scores. Present as a whole or not
/// at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtendedStats {
    pub(crate) bounty: BTreeMap<BountyType, ScoreRecord>,
    pub(crate) clues: BTreeMap<ClueTier, ScoreRecord>,
    pub(crate) minigames: BTreeMap<Minigame, ScoreRecord>,
    pub(crate) bosses: BTreeMap<Boss, ScoreRecord>,
}

impl ExtendedStats {
    pub fn bounty(&self, kind: BountyType) -> Option<&ScoreRecord> {
        self.bounty.get(&kind)
    }

    pub fn clue(&self, tier: ClueTier) -> Option<&ScoreRecord> {
        self.clues.get(&tier)
    }

    pub fn minigame(&self, minigame: Minigame) -> Option<&ScoreRecord> {
        self.minigames.get(&minigame)
    }

    pub fn boss(&self, boss: Boss) -> Option<&ScoreRecord> {
        self.bosses.get(&boss)
    }

    pub fn bosses(&self) -> impl Iterator<Item = (Boss, &ScoreRecord)> {
        self.bosses.iter().map(|(boss, record)| (*boss, record))
    }
}

/// One player's parsed hiscores. Built only by the feed parser, which
/// guarantees every category of each decoded family is present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStats {
    pub(crate) total: TotalRecord,
    pub(crate) skills: BTreeMap<Skill, SkillRecord>,
    pub(crate) extended: Option<ExtendedStats>,
}

impl PlayerStats {
    pub fn total(&self) -> &TotalRecord {
        &self.total
    }

    pub fn skill(&self, skill: Skill) -> Option<&SkillRecord> {
        self.skills.get(&skill)
    }

    pub fn skills(&self) -> impl Iterator<Item = (Skill, &SkillRecord)> {
        self.skills.iter().map(|(skill, record)| (*skill, record))
    }

    pub fn extended(&self) -> Option<&ExtendedStats> {
        self.extended.as_ref()
    }

    pub fn has_extended_categories(&self) -> bool {
        self.extended.is_some()
    }
}
