use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

pub const DEFAULT_POINTS_TO_WIN: u32 = 11;
pub const DEFAULT_WIN_BY: u32 = 2;

/// Match length. Only odd lengths up to seven games are played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BestOf {
    One,
    Three,
    Five,
    Seven,
}

impl BestOf {
    pub const ALL: [BestOf; 4] = [BestOf::One, BestOf::Three, BestOf::Five, BestOf::Seven];

    pub fn games(self) -> u8 {
        match self {
            BestOf::One => 1,
            BestOf::Three => 3,
            BestOf::Five => 5,
            BestOf::Seven => 7,
        }
    }
}

impl TryFrom<u8> for BestOf {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BestOf::One),
            3 => Ok(BestOf::Three),
            5 => Ok(BestOf::Five),
            7 => Ok(BestOf::Seven),
            other => Err(DomainError::validation(format!(
                "match length must be one of 1, 3, 5, 7 (got {other})"
            ))),
        }
    }
}

impl From<BestOf> for u8 {
    fn from(value: BestOf) -> Self {
        value.games()
    }
}

impl Display for BestOf {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "best of {}", self.games())
    }
}

/// Per-match scoring format. Fixed for the lifetime of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawMatchConfig")]
pub struct MatchConfig {
    best_of: BestOf,
    points_to_win: u32,
    win_by: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMatchConfig {
    best_of: BestOf,
    #[serde(default = "default_points_to_win")]
    points_to_win: u32,
    #[serde(default = "default_win_by")]
    win_by: u32,
}

fn default_points_to_win() -> u32 {
    DEFAULT_POINTS_TO_WIN
}

fn default_win_by() -> u32 {
    DEFAULT_WIN_BY
}

impl TryFrom<RawMatchConfig> for MatchConfig {
    type Error = DomainError;

    fn try_from(raw: RawMatchConfig) -> Result<Self, Self::Error> {
        MatchConfig::new(raw.best_of, raw.points_to_win, raw.win_by)
    }
}

impl MatchConfig {
    pub fn new(best_of: BestOf, points_to_win: u32, win_by: u32) -> Result<Self, DomainError> {
        if points_to_win == 0 {
            return Err(DomainError::validation("points to win must be at least 1"));
        }
        if win_by == 0 {
            return Err(DomainError::validation("win-by margin must be at least 1"));
        }
        Ok(Self {
            best_of,
            points_to_win,
            win_by,
        })
    }

    /// Standard format: games to 11, win by 2.
    pub fn standard(best_of: BestOf) -> Self {
        Self {
            best_of,
            points_to_win: DEFAULT_POINTS_TO_WIN,
            win_by: DEFAULT_WIN_BY,
        }
    }

    pub fn best_of(&self) -> BestOf {
        self.best_of
    }

    pub fn points_to_win(&self) -> u32 {
        self.points_to_win
    }

    pub fn win_by(&self) -> u32 {
        self.win_by
    }
}
