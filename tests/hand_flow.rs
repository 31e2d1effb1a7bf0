/// Integration tests for the table state machine
///
/// These drive full hands through the public API only, asserting what
/// an observer of the snapshots could see: positions, blinds, board
/// reveals, and pot integrity. Card-dependent outcomes stay out of
/// scope here since the deck is shuffled.
use holdem_table::{
    Chips, GameError, GamePhase, GameSettings, PlayerAction, PlayerStatus, Table,
};

const NAMES: [&str; 10] = [
    "alice", "bob", "carol", "dave", "erin", "fred", "grace", "henry", "iris", "jack",
];

fn started_table(n: usize) -> Table {
    let mut table = Table::new(GameSettings::default()).unwrap();
    for name in &NAMES[..n] {
        table.join(name).unwrap();
    }
    table.start_game().unwrap();
    table.drain_events();
    table
}

fn total_chips(table: &Table) -> Chips {
    let view = table.snapshot();
    view.players.iter().map(|p| p.stack).sum::<Chips>() + view.pot
}

/// Play call-or-check until the current hand resolves and the next one
/// is dealt (or the table parks idle).
fn play_hand_passively(table: &mut Table) {
    let mut guard = 0;
    loop {
        let view = table.snapshot();
        if !view.phase.is_betting() {
            break;
        }
        let seat = view.action_seat.expect("a betting phase has an actor");
        let owed = view.bet_to_call - view.players[seat].round_bet;
        let action = if owed > 0 {
            PlayerAction::Call
        } else {
            PlayerAction::Check
        };
        table.take_action(seat, action).unwrap();
        let resolved = table
            .drain_events()
            .iter()
            .any(|(_, e)| matches!(e, holdem_table::GameEvent::DeclareWinners { .. }));
        if resolved {
            break;
        }
        guard += 1;
        assert!(guard < 100, "hand did not resolve");
    }
}

#[test]
fn test_initial_positions_by_table_size() {
    // (players, dealer, small blind, big blind, under the gun)
    let expected = [
        (2, 0, 0, 1, 0),
        (3, 0, 1, 2, 0),
        (4, 1, 2, 3, 0),
        (5, 2, 3, 4, 0),
        (6, 3, 4, 5, 0),
        (10, 7, 8, 9, 0),
    ];
    for (n, dealer, small_blind, big_blind, utg) in expected {
        let view = started_table(n).snapshot();
        assert_eq!(view.dealer_seat, dealer, "dealer with {n} players");
        assert_eq!(view.small_blind_seat, small_blind, "sb with {n} players");
        assert_eq!(view.big_blind_seat, big_blind, "bb with {n} players");
        assert_eq!(view.under_the_gun_seat, utg, "utg with {n} players");
        assert_eq!(view.action_seat, Some(utg));
    }
}

#[test]
fn test_blinds_fund_the_pot() {
    let table = started_table(4);
    let view = table.snapshot();

    assert_eq!(view.phase, GamePhase::Preflop);
    assert_eq!(view.pot, 15);
    assert_eq!(view.bet_to_call, 10);
    assert_eq!(view.players[view.small_blind_seat].round_bet, 5);
    assert_eq!(view.players[view.big_blind_seat].round_bet, 10);
    assert!(view.board.is_empty());
    for player in &view.players {
        assert!(player.cards.is_empty(), "hole cards must stay hidden");
    }
}

#[test]
fn test_board_reveals_street_by_street() {
    let mut table = started_table(3);

    // Close the preflop round: call, call, check.
    table.take_action(0, PlayerAction::Call).unwrap();
    table.take_action(1, PlayerAction::Call).unwrap();
    table.take_action(2, PlayerAction::Check).unwrap();
    assert_eq!(table.snapshot().board.len(), 3);
    assert_eq!(table.snapshot().phase, GamePhase::Flop);

    // Two checks per later street.
    table.take_action(1, PlayerAction::Check).unwrap();
    table.take_action(2, PlayerAction::Check).unwrap();
    table.take_action(0, PlayerAction::Check).unwrap();
    assert_eq!(table.snapshot().board.len(), 4);

    table.take_action(1, PlayerAction::Check).unwrap();
    table.take_action(2, PlayerAction::Check).unwrap();
    table.take_action(0, PlayerAction::Check).unwrap();
    assert_eq!(table.snapshot().board.len(), 5);
    assert_eq!(table.snapshot().phase, GamePhase::River);
}

#[test]
fn test_fold_win_skips_showdown_and_chains() {
    let mut table = started_table(3);
    table.take_action(0, PlayerAction::Fold).unwrap();
    table.take_action(1, PlayerAction::Fold).unwrap();

    // The big blind took the pot unrevealed and the next hand began.
    let view = table.snapshot();
    assert_eq!(view.phase, GamePhase::Preflop);
    assert_eq!(view.pot, 15);
    assert_eq!(view.big_blind_seat, 0);
    assert_eq!(total_chips(&table), 1500);
}

#[test]
fn test_acting_out_of_turn_changes_nothing() {
    let mut table = started_table(3);
    let before = table.snapshot();

    assert_eq!(
        table.take_action(2, PlayerAction::Call),
        Err(GameError::OutOfTurn)
    );
    assert_eq!(table.snapshot(), before);
}

#[test]
fn test_start_game_rejections() {
    let mut table = Table::new(GameSettings::default()).unwrap();
    table.join("alice").unwrap();
    assert_eq!(table.start_game(), Err(GameError::NotEnoughPlayers));

    table.join("bob").unwrap();
    table.start_game().unwrap();
    assert_eq!(table.start_game(), Err(GameError::HandInProgress));
}

#[test]
fn test_chips_conserved_over_many_hands() {
    let mut table = started_table(4);
    for _ in 0..10 {
        play_hand_passively(&mut table);
        assert_eq!(total_chips(&table), 2000);
        if !table.snapshot().phase.is_betting() {
            break;
        }
    }
}

#[test]
fn test_leaving_seat_sits_out_next_hand() {
    let mut table = started_table(3);
    table.leave(2).unwrap();

    let view = table.snapshot();
    assert_eq!(view.players[2].status, PlayerStatus::Folded);

    play_hand_passively(&mut table);
    let view = table.snapshot();
    assert_eq!(view.players[2].status, PlayerStatus::SittingOut);
    assert_eq!(view.players.len(), 3, "the roster stays dense");
}

#[test]
fn test_mid_hand_rebuy_cannot_stall_the_round() {
    let mut table = started_table(3);

    // Under the gun jams and becomes the seat that closes the round;
    // rebuying may not lift it out of the hand.
    table.take_action(0, PlayerAction::AllIn).unwrap();
    assert_eq!(table.rebuy(0), Err(GameError::RebuyInPlay));

    // Levelling the bets still closes preflop through the jammer.
    table.take_action(1, PlayerAction::Call).unwrap();
    table.take_action(2, PlayerAction::Call).unwrap();
    assert_eq!(table.snapshot().phase, GamePhase::Flop);

    play_hand_passively(&mut table);
    assert_eq!(total_chips(&table), 1500);
}
