use serde::{Deserialize, Serialize};

/// One side of the table.
///
/// `Player` is player 1 (the account holder, "you"); `Opponent` is player 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    #[inline]
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }
}

/// Identifiers of the two participants, as stored in `GameScore::winner_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participants {
    pub player_id: String,
    pub opponent_id: String,
}

impl Participants {
    pub fn new(player_id: impl Into<String>, opponent_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            opponent_id: opponent_id.into(),
        }
    }

    pub fn id_of(&self, side: Side) -> &str {
        match side {
            Side::Player => &self.player_id,
            Side::Opponent => &self.opponent_id,
        }
    }

    /// Reverse lookup; `None` for identifiers that belong to neither side.
    pub fn side_of(&self, id: &str) -> Option<Side> {
        if id == self.player_id {
            Some(Side::Player)
        } else if id == self.opponent_id {
            Some(Side::Opponent)
        } else {
            None
        }
    }
}

/// Final score of one game, in the shape the match record stores.
///
/// Both scores `None` means the game has not been played.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameScore {
    pub player1_score: Option<u32>,
    pub player2_score: Option<u32>,
    pub winner_id: Option<String>,
}

impl GameScore {
    /// An unplayed slot.
    pub fn unset() -> Self {
        Self::default()
    }

    /// A scored game with no winner attached yet.
    pub fn scored(player1: u32, player2: u32) -> Self {
        Self {
            player1_score: Some(player1),
            player2_score: Some(player2),
            winner_id: None,
        }
    }

    /// Both scores, if both are set.
    pub fn points(&self) -> Option<(u32, u32)> {
        match (self.player1_score, self.player2_score) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        self.player1_score.is_none() && self.player2_score.is_none()
    }
}

/// Running score of the game currently being played (live mode).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InGameScore {
    pub player: u32,
    pub opponent: u32,
}

impl InGameScore {
    pub const LOVE_ALL: InGameScore = InGameScore {
        player: 0,
        opponent: 0,
    };

    pub fn new(player: u32, opponent: u32) -> Self {
        Self { player, opponent }
    }

    pub fn of(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    /// Score after `side` wins one more point.
    #[must_use]
    pub fn with_point(self, side: Side) -> Self {
        match side {
            Side::Player => Self {
                player: self.player.saturating_add(1),
                ..self
            },
            Side::Opponent => Self {
                opponent: self.opponent.saturating_add(1),
                ..self
            },
        }
    }

    pub fn total(&self) -> u32 {
        self.player.saturating_add(self.opponent)
    }
}
