use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::OsrsError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    #[default]
    Normal,
    IronMan,
    UltimateIronMan,
    HardcoreIronMan,
}

impl AccountType {
    pub fn tag(&self) -> &'static str {
        match self {
            AccountType::Normal => "N",
            AccountType::IronMan => "IM",
            AccountType::UltimateIronMan => "UIM",
            AccountType::HardcoreIronMan => "HIM",
        }
    }

    /// Path segment of the hiscores variant serving this account type.
    pub fn endpoint(&self) -> &'static str {
        match self {
            AccountType::Normal => "hiscore_oldschool",
            AccountType::IronMan => "hiscore_oldschool_ironman",
            AccountType::UltimateIronMan => "hiscore_oldschool_ultimate",
            AccountType::HardcoreIronMan => "hiscore_oldschool_hardcore_ironman",
        }
    }

    // Every variant is assumed to serve the full-length feed; a short feed
    // for any of them is reported as malformed.
    pub fn has_extended_categories(&self) -> bool {
        true
    }
}

impl FromStr for AccountType {
    type Err = OsrsError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_uppercase().as_str() {
            "N" => Ok(AccountType::Normal),
            "IM" => Ok(AccountType::IronMan),
            "UIM" => Ok(AccountType::UltimateIronMan),
            "HIM" | "HIC" => Ok(AccountType::HardcoreIronMan),
            _ => Err(OsrsError::InvalidAccountType(tag.to_string())),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A player name paired with the hiscores variant it is looked up in.
///
/// The name is lower-cased on construction so identities compare
/// case-insensitively; inner whitespace is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerIdentity {
    name: String,
    account_type: AccountType,
}

impl PlayerIdentity {
    pub fn new(name: &str, account_type: AccountType) -> Self {
        Self {
            name: name.to_lowercase(),
            account_type,
        }
    }

    pub fn parse(name: &str, tag: &str) -> Result<Self, OsrsError> {
        Ok(Self::new(name, tag.parse()?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}
