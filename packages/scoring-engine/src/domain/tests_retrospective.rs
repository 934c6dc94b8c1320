use crate::domain::{
    can_save_match, compute_match_summary, validate_game_score, BestOf, GameScore, MatchConfig,
    Participants, RetrospectiveScoreEntry, Side,
};

fn standard(best_of: BestOf) -> MatchConfig {
    MatchConfig::standard(best_of)
}

#[test]
fn unset_or_half_entered_games_are_valid() {
    let cfg = standard(BestOf::Three);
    let unset = validate_game_score(&GameScore::unset(), &cfg);
    assert!(unset.is_valid);
    assert_eq!(unset.winner, None);
    assert_eq!(unset.error, None);

    let half = GameScore {
        player1_score: Some(7),
        player2_score: None,
        winner_id: None,
    };
    let half = validate_game_score(&half, &cfg);
    assert!(half.is_valid);
    assert!(!half.is_decided());
}

#[test]
fn validation_messages() {
    let cfg = standard(BestOf::Three);
    let message = |a, b| validate_game_score(&GameScore::scored(a, b), &cfg).error;

    assert_eq!(message(10, 10).as_deref(), Some("Game cannot end in a tie."));
    assert_eq!(
        message(9, 7).as_deref(),
        Some("Winner must have at least 11 points.")
    );
    assert_eq!(
        message(11, 10).as_deref(),
        Some("Winner must lead by at least 2 points.")
    );
    assert_eq!(message(11, 7), None);
    assert_eq!(message(12, 14), None);
}

#[test]
fn messages_follow_configured_format() {
    let cfg = MatchConfig::new(BestOf::Three, 21, 3).unwrap();
    let message = |a, b| validate_game_score(&GameScore::scored(a, b), &cfg).error;
    assert_eq!(
        message(11, 7).as_deref(),
        Some("Winner must have at least 21 points.")
    );
    assert_eq!(
        message(21, 19).as_deref(),
        Some("Winner must lead by at least 3 points.")
    );
}

#[test]
fn two_straight_games_complete_best_of_three() {
    let cfg = standard(BestOf::Three);
    let games = vec![
        GameScore::scored(11, 7),
        GameScore::scored(11, 9),
        GameScore::unset(),
    ];
    let summary = compute_match_summary(&games, &cfg);
    assert!(summary.is_complete);
    assert_eq!(summary.winner, Some(Side::Player));
    assert_eq!(summary.player1_wins, 2);
    assert_eq!(summary.player2_wins, 0);
    assert_eq!(summary.games_needed_to_win, 2);
}

#[test]
fn summary_skips_invalid_games() {
    let cfg = standard(BestOf::Three);
    let games = vec![
        GameScore::scored(11, 7),
        GameScore::scored(10, 10),
        GameScore::scored(5, 11),
    ];
    let summary = compute_match_summary(&games, &cfg);
    assert_eq!((summary.player1_wins, summary.player2_wins), (1, 1));
    assert!(!summary.is_complete);
}

#[test]
fn cannot_save_empty_sheet() {
    let cfg = standard(BestOf::Five);
    let games = vec![GameScore::unset(); 5];
    let check = can_save_match(&games, &cfg, false);
    assert!(!check.can_save);
    assert_eq!(
        check.reason.as_deref(),
        Some("Enter at least one valid game score.")
    );

    // Allowing incomplete saves does not bypass the empty check.
    let check = can_save_match(&games, &cfg, true);
    assert_eq!(
        check.reason.as_deref(),
        Some("Enter at least one valid game score.")
    );
}

#[test]
fn invalid_game_blocks_save() {
    let cfg = standard(BestOf::Three);
    let games = vec![
        GameScore::scored(11, 7),
        GameScore::scored(10, 10),
        GameScore::unset(),
    ];
    let check = can_save_match(&games, &cfg, true);
    assert!(!check.can_save);
    assert_eq!(
        check.reason.as_deref(),
        Some("Fix invalid scores before saving.")
    );
}

#[test]
fn incomplete_match_needs_permission() {
    let cfg = standard(BestOf::Five);
    let mut games = vec![GameScore::unset(); 5];
    games[0] = GameScore::scored(11, 4);

    let check = can_save_match(&games, &cfg, false);
    assert_eq!(
        check.reason.as_deref(),
        Some("Match is not complete. 3 wins needed.")
    );

    let check = can_save_match(&games, &cfg, true);
    assert!(check.can_save);
    assert_eq!(check.reason, None);
}

#[test]
fn entry_starts_with_one_slot_per_game() {
    for best_of in BestOf::ALL {
        let entry = RetrospectiveScoreEntry::new(standard(best_of));
        assert_eq!(entry.games().len(), usize::from(best_of.games()));
        assert!(entry.games().iter().all(GameScore::is_unset));
    }
}

#[test]
fn entry_edits_revalidate_every_time() {
    let entry = RetrospectiveScoreEntry::new(standard(BestOf::Three))
        .set_score(0, Some(11), Some(7))
        .set_score(1, Some(10), Some(10));
    assert!(!entry.can_save(false).can_save);
    assert_eq!(
        entry.validation(1).and_then(|v| v.error).as_deref(),
        Some("Game cannot end in a tie.")
    );

    let entry = entry.set_score(1, Some(12), Some(10));
    assert!(entry.validations().iter().all(|v| v.is_valid));
    assert!(entry.summary().is_complete);
    assert!(entry.can_save(false).can_save);

    let entry = entry.clear_game(1);
    assert!(!entry.summary().is_complete);
    assert_eq!(
        entry.can_save(false).reason.as_deref(),
        Some("Match is not complete. 2 wins needed.")
    );
}

#[test]
fn entry_ignores_out_of_range_slot() {
    let entry = RetrospectiveScoreEntry::new(standard(BestOf::One));
    let edited = entry.clone().set_score(1, Some(11), Some(0));
    assert_eq!(edited, entry);
    assert_eq!(edited.validation(1), None);
}

#[test]
fn entry_prefills_from_stored_games() {
    let stored = vec![
        GameScore {
            player1_score: Some(11),
            player2_score: Some(6),
            winner_id: Some("you".to_string()),
        },
        GameScore::scored(3, 11),
    ];
    let entry = RetrospectiveScoreEntry::from_games(standard(BestOf::Five), &stored);
    assert_eq!(entry.games().len(), 5);
    assert_eq!(&entry.games()[..2], stored.as_slice());
    assert!(entry.games()[2..].iter().all(GameScore::is_unset));

    let overflow = vec![GameScore::scored(11, 0); 4];
    let entry = RetrospectiveScoreEntry::from_games(standard(BestOf::Three), &overflow);
    assert_eq!(entry.games().len(), 3);
}

#[test]
fn edit_clears_stale_winner() {
    let stored = vec![GameScore {
        player1_score: Some(11),
        player2_score: Some(6),
        winner_id: Some("you".to_string()),
    }];
    let entry = RetrospectiveScoreEntry::from_games(standard(BestOf::One), &stored)
        .set_score(0, Some(6), Some(11));
    assert_eq!(entry.games()[0].winner_id, None);
}

#[test]
fn decided_games_carry_winner_ids() {
    let participants = Participants::new("you", "rival");
    let entry = RetrospectiveScoreEntry::new(standard(BestOf::Five))
        .set_score(0, Some(11), Some(9))
        .set_score(2, Some(8), Some(11))
        .set_score(3, Some(11), None);

    let games = entry.decided_games(&participants);
    assert_eq!(
        games,
        vec![
            GameScore {
                player1_score: Some(11),
                player2_score: Some(9),
                winner_id: Some("you".to_string()),
            },
            GameScore {
                player1_score: Some(8),
                player2_score: Some(11),
                winner_id: Some("rival".to_string()),
            },
        ]
    );
}
