//! Property-based tests for the live scoring session.

use proptest::prelude::*;

use crate::domain::test_gens::{self, Action};
use crate::domain::{
    is_match_complete, test_prelude, validate_game_score, LiveScoringSession, MatchConfig,
    Participants, Side,
};

fn fresh(cfg: MatchConfig, first_server: Side) -> LiveScoringSession {
    LiveScoringSession::new(cfg, Participants::new("you", "rival"), first_server)
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: one undo exactly reverses the last point.
    #[test]
    fn prop_undo_is_exact_inverse(
        cfg in test_gens::match_config(),
        first_server in test_gens::side(),
        script in test_gens::point_script(80),
        last in test_gens::side(),
    ) {
        let mut session = fresh(cfg, first_server);
        for side in script {
            session = session.add_point(side);
        }
        if session.is_complete() {
            prop_assert_eq!(session.clone().add_point(last), session);
            return Ok(());
        }

        let before = session.clone();
        let after = session.add_point(last).undo();
        prop_assert_eq!(after.score(), before.score());
        prop_assert_eq!(after.completed_games(), before.completed_games());
        prop_assert_eq!(after.server(), before.server());
        prop_assert_eq!(after, before);
    }

    /// Property: history length equals accepted points minus undone points.
    #[test]
    fn prop_history_counts_accepted_points(
        cfg in test_gens::match_config(),
        script in test_gens::action_script(120),
    ) {
        let mut session = fresh(cfg, Side::Player);
        let mut expected: usize = 0;
        for action in script {
            match action {
                Action::Point(side) => {
                    let accepted = !session.is_complete();
                    session = session.add_point(side);
                    if accepted {
                        expected += 1;
                    }
                }
                Action::Undo => {
                    session = session.undo();
                    expected = expected.saturating_sub(1);
                }
            }
            prop_assert_eq!(session.history_len(), expected);
        }
    }

    /// Property: undoing the whole history returns to the initial session.
    #[test]
    fn prop_full_undo_returns_to_start(
        cfg in test_gens::match_config(),
        first_server in test_gens::side(),
        script in test_gens::action_script(120),
    ) {
        let start = fresh(cfg, first_server);
        let mut session = start.clone();
        for action in script {
            session = match action {
                Action::Point(side) => session.add_point(side),
                Action::Undo => session.undo(),
            };
        }
        while session.can_undo() {
            session = session.undo();
        }
        prop_assert_eq!(session, start);
    }

    /// Property: every archived game is a legal final score, no game is archived
    /// after completion, and the in-progress game is never already decided.
    #[test]
    fn prop_archived_games_are_valid(
        cfg in test_gens::match_config(),
        script in test_gens::action_script(200),
    ) {
        let mut session = fresh(cfg, Side::Player);
        for action in script {
            session = match action {
                Action::Point(side) => session.add_point(side),
                Action::Undo => session.undo(),
            };

            let games = session.completed_games();
            for (i, game) in games.iter().enumerate() {
                let validation = validate_game_score(game, &cfg);
                prop_assert!(validation.is_decided(), "game {} invalid: {:?}", i, game);
                let expected_id = Participants::new("you", "rival")
                    .id_of(validation.winner.unwrap_or(Side::Player))
                    .to_string();
                prop_assert_eq!(game.winner_id.as_deref(), Some(expected_id.as_str()));
                if i + 1 < games.len() {
                    prop_assert!(!is_match_complete(&games[..=i], cfg.best_of(), "you", "rival"));
                }
            }

            let score = session.score();
            prop_assert!(crate::domain::is_game_won(score.player, score.opponent, cfg.points_to_win(), cfg.win_by()).is_none());
        }
    }
}
