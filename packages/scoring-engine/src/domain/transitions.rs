use crate::domain::state::{GameScore, Side};

/// Externally relevant slice of a live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub completed_games: Vec<GameScore>,
    pub winner: Option<Side>,
    pub server: Side,
}

impl SessionView {
    pub fn is_complete(&self) -> bool {
        self.winner.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTransition {
    /// Edge-triggered: a game was archived at `index` (0-based).
    GameCompleted { index: usize, game: GameScore },

    /// Edge-triggered: the archived game at `index` was undone back into play.
    GameReopened { index: usize },

    /// Edge-triggered: InGame -> MatchComplete
    MatchCompleted { winner: Side },

    /// Edge-triggered: MatchComplete -> InGame
    MatchReopened,

    /// Edge-triggered: serve moved to the other side.
    ServerChanged { server: Side },
}

impl SessionTransition {
    /// Transitions that change the stored match record.
    pub fn touches_record(&self) -> bool {
        !matches!(self, SessionTransition::ServerChanged { .. })
    }
}

/// Derive transitions from before/after session views.
pub fn derive_session_transitions(
    before: &SessionView,
    after: &SessionView,
) -> Vec<SessionTransition> {
    let mut transitions = Vec::new();
    let before_len = before.completed_games.len();
    let after_len = after.completed_games.len();

    // 1. Games undone (latest first)
    for index in (after_len..before_len).rev() {
        transitions.push(SessionTransition::GameReopened { index });
    }

    // 2. Games archived
    for (index, game) in after.completed_games.iter().enumerate().skip(before_len) {
        transitions.push(SessionTransition::GameCompleted {
            index,
            game: game.clone(),
        });
    }

    // 3. Match completion edges
    match (before.winner, after.winner) {
        (None, Some(winner)) => transitions.push(SessionTransition::MatchCompleted { winner }),
        (Some(_), None) => transitions.push(SessionTransition::MatchReopened),
        _ => {}
    }

    // 4. Serve change
    if before.server != after.server {
        transitions.push(SessionTransition::ServerChanged {
            server: after.server,
        });
    }

    transitions
}
