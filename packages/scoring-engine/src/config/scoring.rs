use std::env;
use std::str::FromStr;

use crate::domain::rules::{BestOf, MatchConfig, DEFAULT_POINTS_TO_WIN, DEFAULT_WIN_BY};
use crate::errors::domain::DomainError;

pub const DEFAULT_BEST_OF: BestOf = BestOf::Five;

/// Scoring defaults applied when a match is opened without an explicit format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringDefaults {
    pub best_of: BestOf,
    pub points_to_win: u32,
    pub win_by: u32,
    pub allow_incomplete_save: bool,
}

impl Default for ScoringDefaults {
    fn default() -> Self {
        Self {
            best_of: DEFAULT_BEST_OF,
            points_to_win: DEFAULT_POINTS_TO_WIN,
            win_by: DEFAULT_WIN_BY,
            allow_incomplete_save: false,
        }
    }
}

impl ScoringDefaults {
    /// Read defaults from environment variables, falling back per variable.
    ///
    /// - `SCORING_BEST_OF` (1, 3, 5 or 7)
    /// - `SCORING_POINTS_TO_WIN`
    /// - `SCORING_WIN_BY`
    /// - `SCORING_ALLOW_INCOMPLETE_SAVE` (true/false/1/0)
    pub fn from_env() -> Result<Self, DomainError> {
        let fallback = Self::default();

        let best_of = match optional_var::<u8>("SCORING_BEST_OF")? {
            Some(n) => BestOf::try_from(n)
                .map_err(|e| DomainError::config(format!("SCORING_BEST_OF: {e}")))?,
            None => fallback.best_of,
        };
        let points_to_win =
            optional_var::<u32>("SCORING_POINTS_TO_WIN")?.unwrap_or(fallback.points_to_win);
        let win_by = optional_var::<u32>("SCORING_WIN_BY")?.unwrap_or(fallback.win_by);
        let allow_incomplete_save = optional_flag("SCORING_ALLOW_INCOMPLETE_SAVE")?
            .unwrap_or(fallback.allow_incomplete_save);

        let defaults = Self {
            best_of,
            points_to_win,
            win_by,
            allow_incomplete_save,
        };
        // Reject formats that could never produce a match config
        defaults.match_config(None)?;
        Ok(defaults)
    }

    /// Build a validated `MatchConfig`, optionally overriding the match length.
    pub fn match_config(&self, best_of: Option<BestOf>) -> Result<MatchConfig, DomainError> {
        MatchConfig::new(
            best_of.unwrap_or(self.best_of),
            self.points_to_win,
            self.win_by,
        )
        .map_err(|e| DomainError::config(e.to_string()))
    }
}

/// Parse an environment variable if set; unset or empty means `None`.
fn optional_var<T: FromStr>(name: &str) -> Result<Option<T>, DomainError> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            DomainError::config(format!(
                "Environment variable '{name}' has invalid value '{raw}'"
            ))
        }),
        Err(_) => Ok(None),
    }
}

fn optional_flag(name: &str) -> Result<Option<bool>, DomainError> {
    match env::var(name) {
        Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "1" | "true" | "yes" => Ok(Some(true)),
            "0" | "false" | "no" => Ok(Some(false)),
            _ => Err(DomainError::config(format!(
                "Environment variable '{name}' must be a boolean, got '{raw}'"
            ))),
        },
        Err(_) => Ok(None),
    }
}
