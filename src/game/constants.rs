//! Structural constants for a standard no-limit hold'em table.

/// Hard cap on seats at the table. A 52-card deck comfortably covers
/// 10 two-card hands plus the board.
pub const MAX_SEATS: usize = 10;

/// Minimum number of funded seats required to start a hand.
pub const MIN_PLAYERS: usize = 2;

/// Cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// Hole cards dealt to each participating seat.
pub const CARDS_PER_PLAYER: usize = 2;

/// Community cards dealt per hand.
pub const BOARD_SIZE: usize = 5;

/// Community cards revealed on the flop.
pub const FLOP_REVEAL: usize = 3;

/// Cards in a hand given to the evaluator (2 hole + 5 board).
pub const EVAL_HAND_SIZE: usize = 7;

/// Longest accepted player name; longer names are truncated.
pub const MAX_NAME_LENGTH: usize = 16;
