use serde::{Deserialize, Serialize};
use std::fmt;

// Each catalogue is a closed enum whose declaration order is the order the
// hiscores feed reports the categories in.
macro_rules! catalogue {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const NAMES: &'static [&'static str] = &[$($key),+];

            pub fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                let key = normalize_category(name);
                Self::ALL.iter().copied().find(|c| c.name() == key)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

/// Lower-cases a display name ("Kree'Arra", "TzKal-Zuk") into catalogue form.
pub fn normalize_category(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '\'' | ':'))
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

catalogue! {
    Skill {
        Attack => "attack",
        Defense => "defense",
        Strength => "strength",
        Hitpoints => "hitpoints",
        Ranged => "ranged",
        Prayer => "prayer",
        Magic => "magic",
        Cooking => "cooking",
        Woodcutting => "woodcutting",
        Fletching => "fletching",
        Fishing => "fishing",
        Firemaking => "firemaking",
        Crafting => "crafting",
        Smithing => "smithing",
        Mining => "mining",
        Herblore => "herblore",
        Agility => "agility",
        Thieving => "thieving",
        Slayer => "slayer",
        Farming => "farming",
        Runecrafting => "runecrafting",
        Hunter => "hunter",
        Construction => "construction",
    }
}

catalogue! {
    BountyType {
        Hunter => "hunter",
        Rogue => "rogue",
    }
}

catalogue! {
    ClueTier {
        All => "all",
        Beginner => "beginner",
        Easy => "easy",
        Medium => "medium",
        Hard => "hard",
        Elite => "elite",
        Master => "master",
    }
}

catalogue! {
    /// Last Man Standing, PvP Arena and Soul Wars.
    Minigame {
        LmsRank => "lms_rank",
        PvpArenaRank => "pvp_arena_rank",
        SoulWarsZeal => "soul_wars_zeal",
    }
}

catalogue! {
    Boss {
        AbyssalSire => "abyssal_sire",
        AlchemicalHydra => "alchemical_hydra",
        BarrowsChests => "barrows_chests",
        Bryophyta => "bryophyta",
        Callisto => "callisto",
        Cerberus => "cerberus",
        ChambersOfXeric => "chambers_of_xeric",
        ChambersOfXericChallengeMode => "chambers_of_xeric_challenge_mode",
        ChaosElemental => "chaos_elemental",
        ChaosFanatic => "chaos_fanatic",
        CommanderZilyana => "commander_zilyana",
        CorporealBeast => "corporeal_beast",
        CrazyArchaeologist => "crazy_archaeologist",
        DagannothPrime => "dagannoth_prime",
        DagannothRex => "dagannoth_rex",
        DagannothSupreme => "dagannoth_supreme",
        DerangedArchaeologist => "deranged_archaeologist",
        GeneralGraardor => "general_graardor",
        GiantMole => "giant_mole",
        GrotesqueGuardians => "grotesque_guardians",
        Hespori => "hespori",
        KalphiteQueen => "kalphite_queen",
        KingBlackDragon => "king_black_dragon",
        Kraken => "kraken",
        KreeArra => "kreearra",
        KrilTsutsaroth => "kril_tsutsaroth",
        Mimic => "mimic",
        Nex => "nex",
        Nightmare => "nightmare",
        PhosanisNightmare => "phosanis_nightmare",
        Obor => "obor",
        Sarachnis => "sarachnis",
        Scorpia => "scorpia",
        Skotizo => "skotizo",
        Tempoross => "tempoross",
        TheGauntlet => "the_gauntlet",
        TheCorruptedGauntlet => "the_corrupted_gauntlet",
        TheatreOfBlood => "theatre_of_blood",
        TheatreOfBloodHardMode => "theatre_of_blood_hard_mode",
        ThermonuclearSmokeDevil => "thermonuclear_smoke_devil",
        TombsOfAmascut => "tombs_of_amascut",
        TombsOfAmascutExpert => "tombs_of_amascut_expert",
        TzKalZuk => "tzkal_zuk",
        TzTokJad => "tztok_jad",
        Venenatis => "venenatis",
        Vetion => "vetion",
        Vorkath => "vorkath",
        Wintertodt => "wintertodt",
        Zalcano => "zalcano",
        Zulrah => "zulrah",
    }
}

pub const SKILL_FIELDS: &[&str] = &["rank", "level", "experience", "exp_to_next_level"];
pub const SCORE_FIELDS: &[&str] = &["rank", "score"];

/// A family of hiscores categories sharing one record shape and field allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    Skill,
    Clue,
    Bounty,
    Minigame,
    Boss,
}

impl Family {
    pub const ALL: &'static [Family] = &[
        Family::Skill,
        Family::Clue,
        Family::Bounty,
        Family::Minigame,
        Family::Boss,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Family::Skill => "Skill",
            Family::Clue => "Clue",
            Family::Bounty => "Bounty",
            Family::Minigame => "Minigame",
            Family::Boss => "Boss",
        }
    }

    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            Family::Skill => SKILL_FIELDS,
            _ => SCORE_FIELDS,
        }
    }

    /// Canonical category names of this family, in feed order.
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            Family::Skill => Skill::NAMES,
            Family::Clue => ClueTier::NAMES,
            Family::Bounty => BountyType::NAMES,
            Family::Minigame => Minigame::NAMES,
            Family::Boss => Boss::NAMES,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "skill" | "skills" => Some(Family::Skill),
            "clue" | "clues" => Some(Family::Clue),
            "bounty" | "bounty_hunter" => Some(Family::Bounty),
            "minigame" | "minigames" | "activity" | "lms_arena_sw" => Some(Family::Minigame),
            "boss" | "bosses" => Some(Family::Boss),
            _ => None,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_sizes() {
        assert_eq!(Skill::ALL.len(), 23);
        assert_eq!(BountyType::ALL.len(), 2);
        assert_eq!(ClueTier::ALL.len(), 7);
        assert_eq!(Minigame::ALL.len(), 3);
        assert_eq!(Boss::ALL.len(), 50);
    }

    #[test]
    fn test_catalogue_order_matches_feed() {
        assert_eq!(Skill::NAMES.first(), Some(&"attack"));
        assert_eq!(Skill::NAMES.last(), Some(&"construction"));
        assert_eq!(Boss::NAMES.first(), Some(&"abyssal_sire"));
        assert_eq!(Boss::NAMES.last(), Some(&"zulrah"));
        assert!(Skill::Attack < Skill::Construction);
    }

    #[test]
    fn test_from_name_normalizes_display_names() {
        assert_eq!(Skill::from_name("  Attack "), Some(Skill::Attack));
        assert_eq!(Boss::from_name("Kree'Arra"), Some(Boss::KreeArra));
        assert_eq!(Boss::from_name("TzKal-Zuk"), Some(Boss::TzKalZuk));
        assert_eq!(
            Boss::from_name("Chambers of Xeric: Challenge Mode"),
            Some(Boss::ChambersOfXericChallengeMode)
        );
        assert_eq!(Boss::from_name("not_a_boss"), None);
    }

    #[test]
    fn test_names_are_unique_within_family() {
        for family in Family::ALL {
            let names = family.categories();
            for (i, name) in names.iter().enumerate() {
                assert!(!names[i + 1..].contains(name), "{} repeated in {}", name, family);
            }
        }
    }

    #[test]
    fn test_family_fields() {
        assert_eq!(Family::Skill.fields(), SKILL_FIELDS);
        assert_eq!(Family::Boss.fields(), SCORE_FIELDS);
        assert_eq!(Family::from_name("lms_arena_sw"), Some(Family::Minigame));
        assert_eq!(Family::from_name("pets"), None);
    }
}
