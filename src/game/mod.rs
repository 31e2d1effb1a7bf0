//! Poker game engine - deterministic core, no I/O.
//!
//! This module provides the table-level game implementation including:
//! - Cards, deck, seats, and action vocabulary
//! - Seven-card hand evaluation with a totally ordered strength
//! - The hand lifecycle state machine with an addressed event outbox

pub mod constants;
pub mod entities;
pub mod errors;
pub mod eval;
pub mod state;

pub use entities::{
    Card, Chips, Deck, Player, PlayerAction, PlayerName, PlayerStatus, Rank, SeatIndex, Suit,
};
pub use errors::GameError;
pub use eval::{HandCategory, HandStrength};
pub use state::{
    GameEvent, GamePhase, GameSettings, PlayerView, Recipient, Table, TableView, WinnerSummary,
};
