pub mod account;
pub mod catalogue;
pub mod player_stats;
pub mod records;

pub use account::{
    AccountType,
    PlayerIdentity,
};

pub use catalogue::{
    Boss,
    BountyType,
    ClueTier,
    Family,
    Minigame,
    Skill,
};

pub use player_stats::{
    ExtendedStats,
    PlayerStats,
};

pub use records::{
    ScoreRecord,
    SkillRecord,
    TotalRecord,
};
