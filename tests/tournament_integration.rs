//! Integration tests for the tournament lifecycle.
//!
//! These tests run the engine the way a presenter would: configure, admit
//! the field, seat it, start the clock, and drive ticks and commands
//! against the aggregate's public surface.

use std::collections::HashSet;

use tournament_director::{
    BalanceOutcome, ClockEvent, Tournament, TournamentError, TournamentSettings, TournamentStatus,
};

fn saturday_special() -> Tournament {
    let mut tournament = Tournament::new("Saturday Night Special");
    tournament.configure(TournamentSettings {
        buy_in_amount: 100,
        starting_chips: 10_000,
        rebuy_amount: 100,
        rebuy_chips: 10_000,
        max_rebuy_level: 6,
        addon_amount: 100,
        addon_chips: 10_000,
        max_addon_level: 6,
        break_interval: 4,
        break_duration_mins: 15,
    });
    for level in 1..=8u32 {
        let small = 25 * i64::from(level);
        tournament.add_level(small, small * 2, 0, 20);
    }
    tournament
}

/// No player id may occupy more than one seat, and every seated player's
/// own record must point back at exactly that seat.
fn assert_seat_uniqueness(tournament: &Tournament) {
    let mut seen = HashSet::new();
    for table in tournament.tables() {
        for (idx, occupant) in table.seats().iter().enumerate() {
            if let Some(player_id) = occupant {
                assert!(
                    seen.insert(*player_id),
                    "player {player_id} occupies two seats"
                );
                let player = tournament.player(*player_id).unwrap();
                let held = player.seat.expect("seated player with empty assignment");
                assert_eq!(held.table_id, table.id);
                assert_eq!(held.seat, idx + 1);
            }
        }
    }
}

/// Ticks until something other than a plain decrement happens.
fn run_out(tournament: &mut Tournament) -> ClockEvent {
    loop {
        match tournament.tick() {
            ClockEvent::Ticked => continue,
            event => return event,
        }
    }
}

#[test]
fn test_full_lifecycle() {
    let mut tournament = saturday_special();
    let ids: Vec<_> = (0..10)
        .map(|i| tournament.add_player(format!("Player {i}")).id)
        .collect();

    let report = tournament.randomly_assign_players();
    assert_eq!(report.seated, 10);
    assert!(report.unseated.is_empty());
    assert_seat_uniqueness(&tournament);

    tournament.start_tournament().unwrap();
    assert_eq!(tournament.status(), TournamentStatus::Running);
    assert_eq!(tournament.current_level(), 1);
    assert_eq!(tournament.time_remaining_secs(), 1200);

    tournament.rebuy_player(ids[0]).unwrap();
    tournament.addon_player(ids[1]).unwrap();
    tournament.eliminate_player(ids[9]).unwrap();

    // 10 buy-ins + 1 rebuy + 1 add-on at 100 each.
    assert_eq!(tournament.total_prize_pool(), 1_200);

    let stats = tournament.stats();
    assert_eq!(stats.active_players, 9);
    assert_eq!(stats.eliminated_players, 1);
    assert_eq!(stats.current_blinds, "25/50");

    let payouts = tournament.calculate_prizes();
    assert_eq!(payouts.len(), 4); // ceil(10 * 0.4)
    assert_eq!(payouts.iter().map(|p| p.amount).sum::<i64>(), 1_200);
}

#[test]
fn test_break_cadence_with_interval_four() {
    let mut tournament = saturday_special();
    tournament.add_player("A");
    tournament.start_tournament().unwrap();

    // Levels 1 through 3 expire straight into the next level.
    for expected in 2..=4 {
        assert_eq!(run_out(&mut tournament), ClockEvent::LevelAdvanced);
        assert_eq!(tournament.current_level(), expected);
        assert_eq!(tournament.status(), TournamentStatus::Running);
    }

    // Level 4's expiry opens the one scheduled break of this stretch.
    assert_eq!(run_out(&mut tournament), ClockEvent::BreakStarted);
    assert_eq!(tournament.status(), TournamentStatus::Break);
    assert_eq!(tournament.time_remaining_secs(), 15 * 60);
    // Blinds do not move during the break.
    assert_eq!(tournament.current_level(), 5);

    // Break expiry loads level 5's countdown.
    assert_eq!(run_out(&mut tournament), ClockEvent::BreakEnded);
    assert_eq!(tournament.status(), TournamentStatus::Running);
    assert_eq!(tournament.current_level(), 5);
    assert_eq!(tournament.time_remaining_secs(), 1200);
}

#[test]
fn test_pause_resume_preserves_phase_and_time() {
    let mut tournament = saturday_special();
    tournament.start_tournament().unwrap();

    tournament.tick();
    let frozen = tournament.time_remaining_secs();
    tournament.pause_clock().unwrap();
    assert_eq!(tournament.status(), TournamentStatus::Paused);
    assert_eq!(tournament.tick(), ClockEvent::Idle);
    tournament.resume_clock().unwrap();
    assert_eq!(tournament.status(), TournamentStatus::Running);
    assert_eq!(tournament.time_remaining_secs(), frozen);

    // Skip to the break, pause there, and come back still on break.
    for _ in 0..4 {
        tournament.next_level().unwrap();
    }
    assert_eq!(tournament.status(), TournamentStatus::Break);
    let frozen = tournament.time_remaining_secs();
    tournament.pause_clock().unwrap();
    tournament.resume_clock().unwrap();
    assert_eq!(tournament.status(), TournamentStatus::Break);
    assert_eq!(tournament.time_remaining_secs(), frozen);
}

#[test]
fn test_clock_commands_reject_wrong_phase() {
    let mut tournament = saturday_special();
    assert!(matches!(
        tournament.pause_clock(),
        Err(TournamentError::InvalidTransition { .. })
    ));
    assert!(matches!(
        tournament.resume_clock(),
        Err(TournamentError::InvalidTransition { .. })
    ));
    assert!(matches!(
        tournament.next_level(),
        Err(TournamentError::InvalidTransition { .. })
    ));
}

#[test]
fn test_manual_seating_and_balancing() {
    let mut tournament = saturday_special();
    let ids: Vec<_> = (0..12)
        .map(|i| tournament.add_player(format!("Player {i}")).id)
        .collect();
    let table_one = tournament.create_table("Table 1");
    let table_two = tournament.create_table("Table 2");

    for id in &ids[..9] {
        tournament
            .assign_player_to_table(*id, table_one, None)
            .unwrap();
    }
    for id in &ids[9..] {
        tournament
            .assign_player_to_table(*id, table_two, None)
            .unwrap();
    }
    assert_eq!(tournament.table(table_one).unwrap().occupied_count(), 9);
    assert_eq!(tournament.table(table_two).unwrap().occupied_count(), 3);

    let outcome = tournament.balance_tables().unwrap();
    assert_eq!(outcome, BalanceOutcome::Balanced { moves: 3 });
    assert_eq!(tournament.table(table_one).unwrap().occupied_count(), 6);
    assert_eq!(tournament.table(table_two).unwrap().occupied_count(), 6);
    assert_seat_uniqueness(&tournament);

    // A second pass finds nothing to do.
    assert_eq!(
        tournament.balance_tables().unwrap(),
        BalanceOutcome::AlreadyBalanced
    );
}

#[test]
fn test_balancing_requires_two_tables() {
    let mut tournament = saturday_special();
    tournament.create_table("Lonely");
    assert_eq!(
        tournament.balance_tables(),
        Err(TournamentError::InsufficientTables)
    );
}

#[test]
fn test_seat_moves_are_atomic() {
    let mut tournament = saturday_special();
    let a = tournament.add_player("A").id;
    let b = tournament.add_player("B").id;
    let table_one = tournament.create_table("Table 1");
    let table_two = tournament.create_table("Table 2");

    tournament.assign_player_to_table(a, table_one, Some(1)).unwrap();
    tournament.assign_player_to_table(b, table_two, Some(1)).unwrap();

    // A failed move onto an occupied seat leaves A exactly where they were.
    assert_eq!(
        tournament.assign_player_to_table(a, table_two, Some(1)),
        Err(TournamentError::SeatOccupied {
            table_id: table_two,
            seat: 1
        })
    );
    assert_eq!(tournament.table(table_one).unwrap().seat(1), Some(a));
    assert_seat_uniqueness(&tournament);

    // A successful move vacates the old seat.
    tournament.assign_player_to_table(a, table_two, Some(5)).unwrap();
    assert_eq!(tournament.table(table_one).unwrap().seat(1), None);
    assert_eq!(tournament.table(table_two).unwrap().seat(5), Some(a));
    assert_seat_uniqueness(&tournament);
}

#[test]
fn test_randomize_reseats_from_scratch() {
    let mut tournament = saturday_special();
    for i in 0..23 {
        tournament.add_player(format!("Player {i}"));
    }
    // One undersized table exists; the allocator adds the rest on demand.
    tournament.create_table("Table 1");

    let report = tournament.randomly_assign_players();
    assert_eq!(report.seated, 23);
    assert_eq!(tournament.tables().len(), 3);
    assert_seat_uniqueness(&tournament);

    let counts: Vec<usize> = tournament
        .tables()
        .iter()
        .map(|t| t.occupied_count())
        .collect();
    let max = counts.iter().max().unwrap();
    let min = counts.iter().min().unwrap();
    assert!(max - min <= 1, "uneven deal: {counts:?}");

    // Reseating again is just as clean.
    let report = tournament.randomly_assign_players();
    assert_eq!(report.seated, 23);
    assert_seat_uniqueness(&tournament);
}

#[test]
fn test_finish_is_terminal() {
    let mut tournament = Tournament::new("Two Minute Turbo");
    tournament.configure(TournamentSettings {
        buy_in_amount: 10,
        starting_chips: 1_000,
        ..Default::default()
    });
    tournament.add_level(25, 50, 0, 1);
    tournament.add_level(50, 100, 0, 1);
    tournament.start_tournament().unwrap();

    assert_eq!(run_out(&mut tournament), ClockEvent::LevelAdvanced);
    assert_eq!(run_out(&mut tournament), ClockEvent::Finished);
    assert_eq!(tournament.status(), TournamentStatus::Finished);

    assert_eq!(tournament.tick(), ClockEvent::Idle);
    assert!(matches!(
        tournament.pause_clock(),
        Err(TournamentError::InvalidTransition { .. })
    ));
    assert!(matches!(
        tournament.next_level(),
        Err(TournamentError::InvalidTransition { .. })
    ));
}

#[test]
fn test_snapshot_round_trips_through_serde() {
    let mut tournament = saturday_special();
    let a = tournament.add_player("A").id;
    tournament.add_player("B");
    let table = tournament.create_table("Table 1");
    tournament.assign_player_to_table(a, table, Some(2)).unwrap();
    tournament.start_tournament().unwrap();
    tournament.tick();

    let json = serde_json::to_string(&tournament).unwrap();
    let restored: Tournament = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.name(), tournament.name());
    assert_eq!(restored.status(), tournament.status());
    assert_eq!(restored.current_level(), tournament.current_level());
    assert_eq!(
        restored.time_remaining_secs(),
        tournament.time_remaining_secs()
    );
    assert_eq!(restored.players().len(), 2);
    assert_eq!(restored.table(table).unwrap().seat(2), Some(a));
    assert_eq!(restored.stats(), tournament.stats());
}
