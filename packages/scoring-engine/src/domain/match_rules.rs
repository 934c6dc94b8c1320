//! Match-level aggregation over a list of games.

use serde::Serialize;

use crate::domain::rules::BestOf;
use crate::domain::state::{GameScore, Side};

/// Match outcome derived from per-side win counts. Always recomputed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub player1_wins: u32,
    pub player2_wins: u32,
    pub is_complete: bool,
    pub winner: Option<Side>,
    pub games_needed_to_win: u32,
}

impl MatchSummary {
    pub fn from_wins(player1_wins: u32, player2_wins: u32, best_of: BestOf) -> Self {
        let needed = games_needed_to_win(best_of);
        let winner = if player1_wins >= needed {
            Some(Side::Player)
        } else if player2_wins >= needed {
            Some(Side::Opponent)
        } else {
            None
        };
        Self {
            player1_wins,
            player2_wins,
            is_complete: winner.is_some(),
            winner,
            games_needed_to_win: needed,
        }
    }
}

/// Games a side must win to take the match: `ceil(best_of / 2)`.
#[inline]
pub fn games_needed_to_win(best_of: BestOf) -> u32 {
    u32::from(best_of.games()).div_ceil(2)
}

/// Wins per side, tallied from `winner_id`.
///
/// Games without a winner, or won by an identifier that is neither side,
/// count for nobody.
pub fn count_wins(games: &[GameScore], side_a: &str, side_b: &str) -> (u32, u32) {
    games
        .iter()
        .filter_map(|g| g.winner_id.as_deref())
        .fold((0, 0), |(a, b), winner| {
            if winner == side_a {
                (a + 1, b)
            } else if winner == side_b {
                (a, b + 1)
            } else {
                (a, b)
            }
        })
}

pub fn is_match_complete(games: &[GameScore], best_of: BestOf, side_a: &str, side_b: &str) -> bool {
    match_winner(games, best_of, side_a, side_b).is_some()
}

/// Identifier of the side that reached the win threshold, if any.
///
/// A corrupted list can give both sides the threshold; side A is reported then.
pub fn match_winner<'a>(
    games: &[GameScore],
    best_of: BestOf,
    side_a: &'a str,
    side_b: &'a str,
) -> Option<&'a str> {
    let needed = games_needed_to_win(best_of);
    let (wins_a, wins_b) = count_wins(games, side_a, side_b);
    if wins_a >= needed {
        Some(side_a)
    } else if wins_b >= needed {
        Some(side_b)
    } else {
        None
    }
}
