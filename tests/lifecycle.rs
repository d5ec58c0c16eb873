//! Integration tests for the tournament lifecycle: start, restart, continue,
//! round completion and scoring.

use boardgame_tournament::{
    complete_round, format_standings, get_score, next_players, restart, start, start_next,
    Activity, Participant, Tournament, TournamentError, Variant,
};

fn tournament(seed: u64, player_count: usize, activities: Vec<Activity>) -> Tournament {
    let mut t = Tournament::with_seed(Variant::FreeForAll, seed);
    for i in 0..player_count {
        t.add_player(format!("P{i}")).unwrap();
    }
    for a in activities {
        t.add_activity(a).unwrap();
    }
    t
}

fn pair_games() -> Vec<Activity> {
    vec![
        Activity::new("Chess", 2, 2).unwrap(),
        Activity::new("Go", 2, 2).unwrap(),
    ]
}

#[test]
fn start_twice_fails() {
    let mut t = tournament(1, 4, pair_games());
    start(&mut t, 0).unwrap();
    assert!(t.is_started());
    assert_eq!(start(&mut t, 0), Err(TournamentError::AlreadyStarted));
}

#[test]
fn start_rejects_group_limit_of_one() {
    let mut t = tournament(1, 4, pair_games());
    assert_eq!(start(&mut t, 1), Err(TournamentError::InvalidGroupLimit(1)));
    assert!(!t.is_started());
}

#[test]
fn start_without_players_fails() {
    let mut t = tournament(1, 0, pair_games());
    assert_eq!(start(&mut t, 0), Err(TournamentError::NoPlayers));
}

#[test]
fn start_without_activities_fails() {
    let mut t = tournament(1, 4, Vec::new());
    assert_eq!(start(&mut t, 0), Err(TournamentError::NoMatchingActivity));
}

#[test]
fn start_with_oversized_roster_fails_and_leaves_history_empty() {
    let mut t = tournament(1, 5, vec![Activity::new("Chess", 2, 2).unwrap()]);
    assert_eq!(
        start(&mut t, 0),
        Err(TournamentError::RosterTooLarge {
            players: 5,
            capacity: 2
        })
    );
    assert!(!t.is_started());
}

#[test]
fn restart_before_start_fails() {
    let mut t = tournament(1, 4, pair_games());
    assert_eq!(restart(&mut t, 0), Err(TournamentError::NotStarted));
}

#[test]
fn restart_produces_a_fresh_history() {
    let mut t = tournament(1, 4, pair_games());
    start(&mut t, 0).unwrap();
    let round_players: Vec<_> = t.rounds()[0].players().to_vec();
    complete_round(&mut t, 1, |points| {
        for p in &round_players {
            points.insert(p.id, 5);
        }
        Ok(())
    })
    .unwrap();

    restart(&mut t, 0).unwrap();
    assert!(t.is_started());
    assert!(t.rounds().iter().all(|r| !r.is_completed()));
    assert_eq!(t.rounds().len(), 2);
}

#[test]
fn complete_round_records_scores_once() {
    let mut t = tournament(2, 4, pair_games());
    start(&mut t, 0).unwrap();
    let members: Vec<_> = t.rounds()[0].players().to_vec();

    complete_round(&mut t, 1, |points| {
        for (i, p) in members.iter().enumerate() {
            points.insert(p.id, 10 * (i as u32 + 1));
        }
        Ok(())
    })
    .unwrap();

    let round = t.round(1).unwrap();
    assert!(round.is_completed());
    assert_eq!(round.points_of(members[0].id), 10);
    assert_eq!(round.points_of(members[1].id), 20);

    let err = complete_round(&mut t, 1, |_| Ok(())).unwrap_err();
    assert!(matches!(err, TournamentError::RoundAlreadyCompleted(_)));
    // First completion's scores survive the rejected second attempt.
    assert_eq!(t.round(1).unwrap().points_of(members[0].id), 10);
}

#[test]
fn unset_score_aborts_completion() {
    let mut t = tournament(2, 4, pair_games());
    start(&mut t, 0).unwrap();
    let dropped = t.rounds()[0].players()[0].id;

    let err = complete_round(&mut t, 1, |points| {
        points.remove(&dropped);
        Ok(())
    })
    .unwrap_err();
    assert!(matches!(err, TournamentError::MissingScore { .. }));
    assert!(!t.round(1).unwrap().is_completed());
}

#[test]
fn cancelled_fill_leaves_round_incomplete() {
    let mut t = tournament(2, 4, pair_games());
    start(&mut t, 0).unwrap();

    assert_eq!(
        complete_round(&mut t, 1, |_| Err(TournamentError::Cancelled)),
        Err(TournamentError::Cancelled)
    );
    let round = t.round(1).unwrap();
    assert!(!round.is_completed());
    assert!(round.players().iter().all(|p| round.points_of(p.id) == 0));
}

#[test]
fn complete_round_validates_the_number() {
    let mut t = tournament(2, 4, pair_games());
    assert_eq!(
        complete_round(&mut t, 1, |_| Ok(())),
        Err(TournamentError::NotStarted)
    );
    start(&mut t, 0).unwrap();
    assert_eq!(
        complete_round(&mut t, 0, |_| Ok(())),
        Err(TournamentError::InvalidRoundNumber(0))
    );
    assert_eq!(
        complete_round(&mut t, 3, |_| Ok(())),
        Err(TournamentError::InvalidRoundNumber(3))
    );
}

#[test]
fn free_players_are_those_without_an_incomplete_round() {
    let mut t = tournament(3, 4, pair_games());
    assert_eq!(next_players(&t).len(), 4);

    start(&mut t, 2).unwrap();
    assert_eq!(t.rounds().len(), 2);
    assert!(next_players(&t).is_empty());

    let finished: Vec<_> = t.rounds()[0].players().to_vec();
    complete_round(&mut t, 1, |points| {
        for p in &finished {
            points.insert(p.id, 1);
        }
        Ok(())
    })
    .unwrap();

    let free = next_players(&t);
    assert_eq!(free.len(), 2);
    assert!(free.iter().all(|p| finished.iter().any(|f| f.id == p.id)));
}

#[test]
fn start_next_reuses_a_played_activity_when_nothing_is_free() {
    let mut t = tournament(3, 4, pair_games());
    start(&mut t, 2).unwrap();

    // Both activities have rounds; everyone is locked in.
    assert_eq!(start_next(&mut t, 0), Err(TournamentError::NoFreePlayers));
    assert_eq!(t.rounds().len(), 2);

    let finished: Vec<_> = t.rounds()[0].players().to_vec();
    complete_round(&mut t, 1, |points| {
        for p in &finished {
            points.insert(p.id, 1);
        }
        Ok(())
    })
    .unwrap();

    // The completed round's activity becomes eligible again on the relaxed
    // pass, and only its former players are free.
    let added = start_next(&mut t, 0).unwrap();
    assert_eq!(added, vec![3]);
    let round = t.round(3).unwrap();
    assert_eq!(round.players().len(), 2);
    assert!(round
        .players()
        .iter()
        .all(|p| finished.iter().any(|f| f.id == p.id)));
}

#[test]
fn start_next_before_start_fails() {
    let mut t = tournament(3, 4, pair_games());
    assert_eq!(start_next(&mut t, 0), Err(TournamentError::NotStarted));
}

#[test]
fn scores_are_conserved_across_rounds() {
    let mut t = tournament(4, 4, pair_games());
    start(&mut t, 2).unwrap();

    let mut awarded = 0u32;
    for number in 1..=2 {
        let members: Vec<_> = t.round(number).unwrap().players().to_vec();
        complete_round(&mut t, number, |points| {
            for (i, p) in members.iter().enumerate() {
                points.insert(p.id, 3 + i as u32);
            }
            Ok(())
        })
        .unwrap();
        awarded += 3 + 4;
    }

    let standings = get_score(&t).unwrap();
    let total: u32 = standings.iter().map(|(_, points)| points).sum();
    assert_eq!(total, awarded);
}

#[test]
fn score_before_start_fails() {
    let t = tournament(4, 4, pair_games());
    assert_eq!(get_score(&t), Err(TournamentError::NotStarted));
}

#[test]
fn score_ties_keep_roster_order() {
    let mut t = tournament(4, 4, pair_games());
    start(&mut t, 2).unwrap();
    // No round completed: every total is 0, so the standings must follow
    // roster insertion order.
    let standings = get_score(&t).unwrap();
    let names: Vec<_> = standings.iter().map(|(p, _)| p.name.as_str()).collect();
    assert_eq!(names, vec!["P0", "P1", "P2", "P3"]);
}

#[test]
fn standings_share_a_rank_on_equal_totals() {
    let rows = vec![
        (Participant::new("A"), 10),
        (Participant::new("B"), 10),
        (Participant::new("C"), 5),
    ];
    assert_eq!(format_standings(&rows), "1) A - 10\n1) B - 10\n2) C - 5\n");
}

#[test]
fn duplicate_names_are_rejected() {
    let mut t = Tournament::new(Variant::FreeForAll);
    t.add_player("Alice").unwrap();
    assert_eq!(
        t.add_player("  alice "),
        Err(TournamentError::DuplicatePlayer("alice".to_string()))
    );
    assert_eq!(t.add_player("   "), Err(TournamentError::EmptyPlayerName));

    let chess = Activity::new("Chess", 2, 2).unwrap();
    t.add_activity(chess.clone()).unwrap();
    assert_eq!(
        t.add_activity(chess),
        Err(TournamentError::DuplicateActivity("Chess".to_string()))
    );
    // A distinct activity may reuse a display name.
    t.add_activity(Activity::new("Chess", 2, 2).unwrap()).unwrap();
}

#[test]
fn round_descriptions_follow_completion_state() {
    let mut t = tournament(5, 4, pair_games());
    assert_eq!(t.describe_rounds(), Err(TournamentError::NotStarted));

    start(&mut t, 2).unwrap();
    let open = t.describe_round(1).unwrap();
    assert!(open.contains(':'));
    assert!(!open.contains(" - "));

    let members: Vec<_> = t.rounds()[0].players().to_vec();
    complete_round(&mut t, 1, |points| {
        for p in &members {
            points.insert(p.id, 7);
        }
        Ok(())
    })
    .unwrap();

    let done = t.describe_round(1).unwrap();
    assert!(done.contains(" - 7"));

    let all = t.describe_rounds().unwrap();
    assert!(all.contains("#1"));
    assert!(all.contains("#2"));
    assert_eq!(t.describe_round(9), Err(TournamentError::InvalidRoundNumber(9)));
}

#[test]
fn tournament_survives_a_serde_round_trip() {
    let mut t = tournament(6, 4, pair_games());
    start(&mut t, 2).unwrap();

    let json = serde_json::to_string(&t).unwrap();
    let back: Tournament = serde_json::from_str(&json).unwrap();
    assert_eq!(back.players(), t.players());
    assert_eq!(back.rounds().len(), t.rounds().len());
    assert_eq!(back.variant(), t.variant());
}
