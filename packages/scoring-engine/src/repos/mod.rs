pub mod matches;

pub use matches::{InMemoryMatchRepo, MatchRecord, MatchRepo, MatchStatus};
