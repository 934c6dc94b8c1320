//! Point-by-point scoring with undo.
//!
//! The session is a plain value owned by the caller. `add_point` and `undo`
//! consume it and return the next state; neither can fail; both are no-ops when
//! their precondition does not hold.

use serde::Serialize;
use tracing::{debug, info};

use crate::domain::game_rules::{is_game_won, next_server};
use crate::domain::match_rules::{count_wins, is_match_complete, MatchSummary};
use crate::domain::rules::MatchConfig;
use crate::domain::state::{GameScore, InGameScore, Participants, Side};
use crate::domain::transitions::SessionView;

/// Observable phases of a live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LivePhase {
    /// A game is in progress (possibly at 0-0).
    InGame,
    /// Terminal until a match-ending point is undone.
    MatchComplete,
}

/// Reversible record of one accepted point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointDelta {
    /// Point that left the game in progress.
    Normal {
        scorer: Side,
        prior_score: InGameScore,
        prior_server: Side,
    },
    /// Point that finished a game; `completed_game` is what it archived.
    GameCompleting {
        scorer: Side,
        prior_score: InGameScore,
        prior_server: Side,
        completed_game: GameScore,
    },
}

impl PointDelta {
    pub fn scorer(&self) -> Side {
        match self {
            PointDelta::Normal { scorer, .. } | PointDelta::GameCompleting { scorer, .. } => {
                *scorer
            }
        }
    }

    pub fn prior_score(&self) -> InGameScore {
        match self {
            PointDelta::Normal { prior_score, .. }
            | PointDelta::GameCompleting { prior_score, .. } => *prior_score,
        }
    }

    pub fn prior_server(&self) -> Side {
        match self {
            PointDelta::Normal { prior_server, .. }
            | PointDelta::GameCompleting { prior_server, .. } => *prior_server,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveScoringSession {
    config: MatchConfig,
    participants: Participants,
    first_server: Side,
    score: InGameScore,
    server: Side,
    completed_games: Vec<GameScore>,
    history: Vec<PointDelta>,
    phase: LivePhase,
}

impl LiveScoringSession {
    pub fn new(config: MatchConfig, participants: Participants, first_server: Side) -> Self {
        Self::resume(config, participants, first_server, Vec::new())
    }

    /// Re-open a match whose finished games were already stored.
    ///
    /// History starts empty, so stored games cannot be undone.
    pub fn resume(
        config: MatchConfig,
        participants: Participants,
        first_server: Side,
        completed_games: Vec<GameScore>,
    ) -> Self {
        let mut session = Self {
            config,
            participants,
            first_server,
            score: InGameScore::LOVE_ALL,
            server: first_server,
            completed_games,
            history: Vec::new(),
            phase: LivePhase::InGame,
        };
        session.phase = session.derive_phase();
        session
    }

    /// Award a point to `scorer`.
    #[must_use]
    pub fn add_point(mut self, scorer: Side) -> Self {
        if self.phase == LivePhase::MatchComplete {
            debug!(scorer = scorer.as_str(), "Match already complete, point ignored");
            return self;
        }

        let points_to_win = self.config.points_to_win();
        let prior_score = self.score;
        let prior_server = self.server;
        let next = prior_score.with_point(scorer);

        match is_game_won(next.player, next.opponent, points_to_win, self.config.win_by()) {
            Some(winner) => {
                let completed_game = GameScore {
                    player1_score: Some(next.player),
                    player2_score: Some(next.opponent),
                    winner_id: Some(self.participants.id_of(winner).to_string()),
                };
                self.completed_games.push(completed_game.clone());
                self.history.push(PointDelta::GameCompleting {
                    scorer,
                    prior_score,
                    prior_server,
                    completed_game,
                });
                self.score = InGameScore::LOVE_ALL;
                self.server = next_server(0, 0, points_to_win, self.first_server);
                info!(
                    game_no = self.completed_games.len(),
                    player = next.player,
                    opponent = next.opponent,
                    winner = winner.as_str(),
                    "Game completed"
                );
            }
            None => {
                self.history.push(PointDelta::Normal {
                    scorer,
                    prior_score,
                    prior_server,
                });
                self.score = next;
                self.server =
                    next_server(next.player, next.opponent, points_to_win, self.first_server);
                debug!(
                    scorer = scorer.as_str(),
                    player = next.player,
                    opponent = next.opponent,
                    server = self.server.as_str(),
                    "Point scored"
                );
            }
        }

        self.phase = self.derive_phase();
        if self.phase == LivePhase::MatchComplete {
            info!(
                games = self.completed_games.len(),
                winner = ?self.winner(),
                "Match completed"
            );
        }
        self
    }

    /// Reverse the most recent accepted point.
    #[must_use]
    pub fn undo(mut self) -> Self {
        let Some(delta) = self.history.pop() else {
            debug!("Undo history empty");
            return self;
        };

        match delta {
            PointDelta::Normal {
                prior_score,
                prior_server,
                ..
            } => {
                self.score = prior_score;
                self.server = prior_server;
            }
            PointDelta::GameCompleting {
                prior_score,
                prior_server,
                completed_game,
                ..
            } => {
                // Games only leave the list through their own delta, so the tail is this one.
                let reopened = self.completed_games.pop();
                debug_assert_eq!(reopened.as_ref(), Some(&completed_game));
                self.score = prior_score;
                self.server = prior_server;
                info!(
                    game_no = self.completed_games.len() + 1,
                    player = prior_score.player,
                    opponent = prior_score.opponent,
                    "Game reopened"
                );
            }
        }

        self.phase = self.derive_phase();
        debug!(
            player = self.score.player,
            opponent = self.score.opponent,
            history = self.history.len(),
            "Point undone"
        );
        self
    }

    fn derive_phase(&self) -> LivePhase {
        if is_match_complete(
            &self.completed_games,
            self.config.best_of(),
            &self.participants.player_id,
            &self.participants.opponent_id,
        ) {
            LivePhase::MatchComplete
        } else {
            LivePhase::InGame
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn participants(&self) -> &Participants {
        &self.participants
    }

    pub fn first_server(&self) -> Side {
        self.first_server
    }

    pub fn score(&self) -> InGameScore {
        self.score
    }

    pub fn server(&self) -> Side {
        self.server
    }

    pub fn completed_games(&self) -> &[GameScore] {
        &self.completed_games
    }

    pub fn history(&self) -> &[PointDelta] {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn phase(&self) -> LivePhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == LivePhase::MatchComplete
    }

    pub fn summary(&self) -> MatchSummary {
        let (player_wins, opponent_wins) = count_wins(
            &self.completed_games,
            &self.participants.player_id,
            &self.participants.opponent_id,
        );
        MatchSummary::from_wins(player_wins, opponent_wins, self.config.best_of())
    }

    pub fn winner(&self) -> Option<Side> {
        self.summary().winner
    }

    /// Snapshot used to diff two states with `derive_session_transitions`.
    pub fn view(&self) -> SessionView {
        SessionView {
            completed_games: self.completed_games.clone(),
            winner: self.winner(),
            server: self.server,
        }
    }
}
