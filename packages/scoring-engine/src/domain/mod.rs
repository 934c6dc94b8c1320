//! Domain layer: pure scoring rules and the two scoring sessions built on them.

pub mod game_rules;
pub mod live;
pub mod match_rules;
pub mod retrospective;
pub mod rules;
pub mod state;
pub mod transitions;

#[cfg(test)]
mod tests_props_live;
#[cfg(test)]
mod tests_retrospective;

// Re-exports for ergonomics
pub use game_rules::{classify_game, is_deuce, is_game_won, next_server, GameVerdict};
pub use live::{LivePhase, LiveScoringSession, PointDelta};
pub use match_rules::{
    count_wins, games_needed_to_win, is_match_complete, match_winner, MatchSummary,
};
pub use retrospective::{
    can_save_match, compute_match_summary, validate_game_score, GameValidation,
    RetrospectiveScoreEntry, SaveCheck,
};
pub use rules::{BestOf, MatchConfig, DEFAULT_POINTS_TO_WIN, DEFAULT_WIN_BY};
pub use state::{GameScore, InGameScore, Participants, Side};
pub use transitions::{derive_session_transitions, SessionTransition, SessionView};
