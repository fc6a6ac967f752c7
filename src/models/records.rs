use serde::{Deserialize, Serialize};

use crate::hiscores::experience::experience_required_for;

/// Overall rank, total level and total experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalRecord {
    pub rank: i64,
    pub level: i64,
    pub experience: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub rank: i64,
    pub level: i64,
    pub experience: i64,
    pub next_level_exp: i64,
    // Negative when the reported experience is past the next threshold.
    pub exp_to_next_level: i64,
}

impl SkillRecord {
    pub fn new(rank: i64, level: i64, experience: i64) -> Self {
        let next_level_exp = experience_required_for(level.saturating_add(1));
        Self {
            rank,
            level,
            experience,
            next_level_exp,
            exp_to_next_level: next_level_exp.saturating_sub(experience),
        }
    }

    /// The upstream reports `-1` in every field for untracked skills.
    pub fn is_ranked(&self) -> bool {
        self.rank >= 0
    }

    pub fn field(&self, field: &str) -> Option<i64> {
        match field {
            "rank" => Some(self.rank),
            "level" => Some(self.level),
            "experience" => Some(self.experience),
            "exp_to_next_level" => Some(self.exp_to_next_level),
            _ => None,
        }
    }
}

/// Rank and score for clues, bounty hunter, minigames and boss kill counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub rank: i64,
    pub score: i64,
}

impl ScoreRecord {
    pub fn new(rank: i64, score: i64) -> Self {
        Self { rank, score }
    }

    pub fn is_ranked(&self) -> bool {
        self.rank >= 0
    }

    pub fn field(&self, field: &str) -> Option<i64> {
        match field {
            "rank" => Some(self.rank),
            "score" => Some(self.score),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_record_derives_next_level() {
        let record = SkillRecord::new(500, 50, 101_333);
        assert_eq!(record.next_level_exp, experience_required_for(51));
        assert_eq!(record.exp_to_next_level, record.next_level_exp - 101_333);
        assert_eq!(record.field("level"), Some(50));
        assert_eq!(record.field("next_level_exp"), None);
    }

    #[test]
    fn test_untracked_skill_is_data() {
        let record = SkillRecord::new(-1, -1, -1);
        assert!(!record.is_ranked());
        assert_eq!(record.next_level_exp, 0);
        assert_eq!(record.exp_to_next_level, 1);
    }

    #[test]
    fn test_exp_past_threshold_is_negative() {
        // 200m experience at level 99 overshoots the level 100 threshold.
        let record = SkillRecord::new(1, 99, 200_000_000);
        assert!(record.exp_to_next_level < 0);
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let record = SkillRecord::new(1, i64::MAX, i64::MIN);
        assert_eq!(record.next_level_exp, i64::MAX);
        assert_eq!(record.exp_to_next_level, i64::MAX);
    }

    #[test]
    fn test_score_record_fields() {
        let record = ScoreRecord::new(12, 340);
        assert_eq!(record.field("rank"), Some(12));
        assert_eq!(record.field("score"), Some(340));
        assert_eq!(record.field("level"), None);
    }
}
