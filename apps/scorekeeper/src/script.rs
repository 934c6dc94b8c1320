//! Point scripts for the `live` subcommand.

use scoring_engine::{LiveScoringSession, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Point(Side),
    Undo,
}

/// Parse `p` (player point), `o` (opponent point) and `u` (undo); whitespace is ignored.
pub fn parse_script(script: &str) -> Result<Vec<Step>, String> {
    script
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(pos, c)| match c.to_ascii_lowercase() {
            'p' => Ok(Step::Point(Side::Player)),
            'o' => Ok(Step::Point(Side::Opponent)),
            'u' => Ok(Step::Undo),
            other => Err(format!(
                "invalid script character {other:?} at position {pos} (expected p, o or u)"
            )),
        })
        .collect()
}

pub fn apply(session: LiveScoringSession, step: Step) -> LiveScoringSession {
    match step {
        Step::Point(side) => session.add_point(side),
        Step::Undo => session.undo(),
    }
}

/// Parse `11-7` into a score pair.
pub fn parse_game(raw: &str) -> Result<(u32, u32), String> {
    let (a, b) = raw
        .split_once('-')
        .ok_or_else(|| format!("game score {raw:?} must look like 11-7"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|_| format!("game score {raw:?} must contain two non-negative integers"))
    };
    Ok((parse(a)?, parse(b)?))
}
