use crate::errors::{OsrsError, Result};
use crate::models::{
    Boss, BountyType, ClueTier, ExtendedStats, Family, Minigame, PlayerStats, ScoreRecord, Skill,
};

/// Reads one field of one category, e.g. `(Skill, "construction", "level")`.
///
/// The field is checked against the family's allow-list before the category
/// is resolved. Both are matched case-insensitively.
pub fn lookup(stats: &PlayerStats, family: Family, category: &str, field: &str) -> Result<i64> {
    let field_key = field.trim().to_lowercase();
    if !family.fields().contains(&field_key.as_str()) {
        return Err(OsrsError::InvalidFieldName {
            family,
            field: field.to_string(),
        });
    }

    let unknown = || OsrsError::UnknownCategory {
        family,
        name: category.to_string(),
    };

    if family == Family::Skill {
        let skill = Skill::from_name(category).ok_or_else(unknown)?;
        let record = stats.skill(skill).ok_or_else(unknown)?;
        return record.field(&field_key).ok_or_else(|| OsrsError::InvalidFieldName {
            family,
            field: field.to_string(),
        });
    }

    let extended = stats
        .extended()
        .ok_or(OsrsError::CategoryUnavailable { family })?;
    let record = score_record(extended, family, category).ok_or_else(unknown)?;
    record.field(&field_key).ok_or_else(|| OsrsError::InvalidFieldName {
        family,
        field: field.to_string(),
    })
}

fn score_record<'a>(
    extended: &'a ExtendedStats,
    family: Family,
    category: &str,
) -> Option<&'a ScoreRecord> {
    match family {
        Family::Clue => extended.clue(ClueTier::from_name(category)?),
        Family::Bounty => extended.bounty(BountyType::from_name(category)?),
        Family::Minigame => extended.minigame(Minigame::from_name(category)?),
        Family::Boss => extended.boss(Boss::from_name(category)?),
        Family::Skill => None,
    }
}

impl PlayerStats {
    pub fn skill_stat(&self, skill: &str, field: &str) -> Result<i64> {
        lookup(self, Family::Skill, skill, field)
    }

    pub fn clue_stat(&self, tier: &str, field: &str) -> Result<i64> {
        lookup(self, Family::Clue, tier, field)
    }

    pub fn bounty_stat(&self, kind: &str, field: &str) -> Result<i64> {
        lookup(self, Family::Bounty, kind, field)
    }

    /// Last Man Standing, PvP Arena and Soul Wars scores.
    pub fn minigame_stat(&self, minigame: &str, field: &str) -> Result<i64> {
        lookup(self, Family::Minigame, minigame, field)
    }

    pub fn boss_stat(&self, boss: &str, field: &str) -> Result<i64> {
        lookup(self, Family::Boss, boss, field)
    }
}

pub fn skills() -> impl Iterator<Item = &'static str> + Clone {
    Skill::NAMES.iter().copied()
}

pub fn clue_tiers() -> impl Iterator<Item = &'static str> + Clone {
    ClueTier::NAMES.iter().copied()
}

pub fn bounty_types() -> impl Iterator<Item = &'static str> + Clone {
    BountyType::NAMES.iter().copied()
}

pub fn minigames() -> impl Iterator<Item = &'static str> + Clone {
    Minigame::NAMES.iter().copied()
}

pub fn bosses() -> impl Iterator<Item = &'static str> + Clone {
    Boss::NAMES.iter().copied()
}
