mod database;

pub use database::{FeedCache, DEFAULT_DATABASE_URL};
