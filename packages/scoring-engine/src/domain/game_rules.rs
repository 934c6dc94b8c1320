//! Single-game rules: when a game is decided and who serves next.
//!
//! Both the live session and retrospective entry go through these functions,
//! so they always agree on what a legal final score is.

use crate::domain::state::Side;

/// Classification of a final (player, opponent) score pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameVerdict {
    /// Legal final score; the side with more points won.
    Decided(Side),
    /// Equal scores. Never a legal final score.
    Tied,
    /// Nobody reached the target.
    BelowTarget,
    /// The target was reached but the lead is under the required margin.
    MarginTooSmall,
}

impl GameVerdict {
    pub fn winner(self) -> Option<Side> {
        match self {
            GameVerdict::Decided(side) => Some(side),
            _ => None,
        }
    }
}

/// Classify a score pair. Checks run in order: tie, target, margin.
pub fn classify_game(player: u32, opponent: u32, points_to_win: u32, win_by: u32) -> GameVerdict {
    if player == opponent {
        return GameVerdict::Tied;
    }
    let max_score = player.max(opponent);
    if max_score < points_to_win {
        return GameVerdict::BelowTarget;
    }
    if player.abs_diff(opponent) < win_by {
        return GameVerdict::MarginTooSmall;
    }
    if player > opponent {
        GameVerdict::Decided(Side::Player)
    } else {
        GameVerdict::Decided(Side::Opponent)
    }
}

/// Winner of a game at this score, or `None` while it is still undecided.
///
/// Ordinary wins (11-7) and extended wins (14-12) fall out of the same rule.
pub fn is_game_won(player: u32, opponent: u32, points_to_win: u32, win_by: u32) -> Option<Side> {
    classify_game(player, opponent, points_to_win, win_by).winner()
}

/// Both sides are within one point of the target.
#[inline]
pub fn is_deuce(player: u32, opponent: u32, points_to_win: u32) -> bool {
    let threshold = points_to_win.saturating_sub(1);
    player >= threshold && opponent >= threshold
}

/// Server for the next point given the current in-game score.
///
/// Serve changes every two points, and every point once the game reaches deuce.
/// A new game (0-0) always starts with `first_server`.
pub fn next_server(player: u32, opponent: u32, points_to_win: u32, first_server: Side) -> Side {
    let total = player.saturating_add(opponent);
    let turn = if is_deuce(player, opponent, points_to_win) {
        total % 2
    } else {
        (total / 2) % 2
    };
    if turn == 0 {
        first_server
    } else {
        first_server.other()
    }
}
