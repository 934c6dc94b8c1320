#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod repos;
pub mod services;
pub mod telemetry;


// Re-exports for public API
pub use config::scoring::ScoringDefaults;
pub use domain::{
    can_save_match, compute_match_summary, count_wins, games_needed_to_win, is_game_won,
    is_match_complete, match_winner, next_server, validate_game_score, BestOf, GameScore,
    GameValidation, InGameScore, LivePhase, LiveScoringSession, MatchConfig, MatchSummary,
    Participants, RetrospectiveScoreEntry, SaveCheck, Side,
};
pub use errors::domain::DomainError;
pub use repos::matches::{InMemoryMatchRepo, MatchRecord, MatchRepo, MatchStatus};
pub use services::matches::MatchService;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
