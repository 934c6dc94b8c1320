//! After-the-fact entry of a whole match's game scores.
//!
//! Every derived value (per-game validity, summary, save gate) is recomputed
//! from the raw slots on each call. Nothing is cached between edits.

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::game_rules::{classify_game, GameVerdict};
use crate::domain::match_rules::MatchSummary;
use crate::domain::rules::MatchConfig;
use crate::domain::state::{GameScore, Participants, Side};

pub const TIE_ERROR: &str = "Game cannot end in a tie.";
pub const FIX_INVALID_REASON: &str = "Fix invalid scores before saving.";
pub const NO_VALID_GAMES_REASON: &str = "Enter at least one valid game score.";

/// Outcome of validating one game slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameValidation {
    pub is_valid: bool,
    pub winner: Option<Side>,
    pub error: Option<String>,
}

impl GameValidation {
    fn valid(winner: Option<Side>) -> Self {
        Self {
            is_valid: true,
            winner,
            error: None,
        }
    }

    fn invalid(error: String) -> Self {
        Self {
            is_valid: false,
            winner: None,
            error: Some(error),
        }
    }

    /// Valid and won by someone.
    pub fn is_decided(&self) -> bool {
        self.is_valid && self.winner.is_some()
    }
}

/// Whether the current slots may be written to the match record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCheck {
    pub can_save: bool,
    pub reason: Option<String>,
}

impl SaveCheck {
    fn accept() -> Self {
        Self {
            can_save: true,
            reason: None,
        }
    }

    fn reject(reason: impl Into<String>) -> Self {
        Self {
            can_save: false,
            reason: Some(reason.into()),
        }
    }
}

/// Validate one slot. A slot with either score unset is "not played yet" and valid.
pub fn validate_game_score(game: &GameScore, config: &MatchConfig) -> GameValidation {
    let Some((player1, player2)) = game.points() else {
        return GameValidation::valid(None);
    };
    match classify_game(player1, player2, config.points_to_win(), config.win_by()) {
        GameVerdict::Decided(side) => GameValidation::valid(Some(side)),
        GameVerdict::Tied => GameValidation::invalid(TIE_ERROR.to_string()),
        GameVerdict::BelowTarget => GameValidation::invalid(format!(
            "Winner must have at least {} points.",
            config.points_to_win()
        )),
        GameVerdict::MarginTooSmall => GameValidation::invalid(format!(
            "Winner must lead by at least {} points.",
            config.win_by()
        )),
    }
}

/// Wins per side over valid, decided games.
pub fn compute_match_summary(scores: &[GameScore], config: &MatchConfig) -> MatchSummary {
    let (player1_wins, player2_wins) = scores
        .iter()
        .filter_map(|game| validate_game_score(game, config).winner)
        .fold((0, 0), |(p1, p2), side| match side {
            Side::Player => (p1 + 1, p2),
            Side::Opponent => (p1, p2 + 1),
        });
    MatchSummary::from_wins(player1_wins, player2_wins, config.best_of())
}

/// Save gate. Checks run in order: invalid scores, no decided games, incomplete match.
pub fn can_save_match(
    scores: &[GameScore],
    config: &MatchConfig,
    allow_incomplete_save: bool,
) -> SaveCheck {
    let validations: Vec<GameValidation> = scores
        .iter()
        .map(|game| validate_game_score(game, config))
        .collect();

    if validations.iter().any(|v| !v.is_valid) {
        return SaveCheck::reject(FIX_INVALID_REASON);
    }
    if !validations.iter().any(GameValidation::is_decided) {
        return SaveCheck::reject(NO_VALID_GAMES_REASON);
    }

    let summary = compute_match_summary(scores, config);
    if !summary.is_complete && !allow_incomplete_save {
        return SaveCheck::reject(format!(
            "Match is not complete. {} wins needed.",
            summary.games_needed_to_win
        ));
    }
    SaveCheck::accept()
}

/// Editable set of exactly `best_of` game slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrospectiveScoreEntry {
    config: MatchConfig,
    slots: Vec<GameScore>,
}

impl RetrospectiveScoreEntry {
    pub fn new(config: MatchConfig) -> Self {
        let slots = vec![GameScore::unset(); usize::from(config.best_of().games())];
        Self { config, slots }
    }

    /// Pre-fill from stored games. Games past `best_of` are dropped.
    pub fn from_games(config: MatchConfig, games: &[GameScore]) -> Self {
        let mut entry = Self::new(config);
        for (slot, game) in entry.slots.iter_mut().zip(games) {
            *slot = game.clone();
        }
        if games.len() > entry.slots.len() {
            warn!(
                stored = games.len(),
                slots = entry.slots.len(),
                "Stored games exceed match length, extra games dropped"
            );
        }
        entry
    }

    /// Replace the scores in slot `game_index` (0-based).
    #[must_use]
    pub fn set_score(mut self, game_index: usize, player1: Option<u32>, player2: Option<u32>) -> Self {
        let slot_count = self.slots.len();
        let Some(slot) = self.slots.get_mut(game_index) else {
            warn!(game_index, slots = slot_count, "Score edit outside match length ignored");
            return self;
        };
        *slot = GameScore {
            player1_score: player1,
            player2_score: player2,
            winner_id: None,
        };
        debug!(game_index, ?player1, ?player2, "Game score edited");
        self
    }

    #[must_use]
    pub fn clear_game(self, game_index: usize) -> Self {
        self.set_score(game_index, None, None)
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn games(&self) -> &[GameScore] {
        &self.slots
    }

    pub fn validation(&self, game_index: usize) -> Option<GameValidation> {
        self.slots
            .get(game_index)
            .map(|game| validate_game_score(game, &self.config))
    }

    pub fn validations(&self) -> Vec<GameValidation> {
        self.slots
            .iter()
            .map(|game| validate_game_score(game, &self.config))
            .collect()
    }

    pub fn summary(&self) -> MatchSummary {
        compute_match_summary(&self.slots, &self.config)
    }

    pub fn can_save(&self, allow_incomplete_save: bool) -> SaveCheck {
        can_save_match(&self.slots, &self.config, allow_incomplete_save)
    }

    /// Valid, decided games in slot order with `winner_id` filled in, ready to store.
    pub fn decided_games(&self, participants: &Participants) -> Vec<GameScore> {
        self.slots
            .iter()
            .filter_map(|game| {
                let winner = validate_game_score(game, &self.config).winner?;
                Some(GameScore {
                    winner_id: Some(participants.id_of(winner).to_string()),
                    ..game.clone()
                })
            })
            .collect()
    }
}
