pub mod experience;
pub mod parser;
pub mod query;
mod repository;
mod service;

pub use experience::experience_required_for;
pub use parser::{parse, parse_text, RawFeed};
pub use query::{bosses, bounty_types, clue_tiers, lookup, minigames, skills};
pub use repository::StatRepository;
pub use service::Hiscores;
