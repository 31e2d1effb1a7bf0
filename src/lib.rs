//! # Holdem Table
//!
//! A single-table Texas Hold'em engine split into a deterministic core
//! and an async actor shell.
//!
//! The core ([`game`]) is plain synchronous Rust: a [`Table`] state
//! machine that validates before mutating and queues addressed events
//! instead of performing I/O. The shell ([`table`]) owns one `Table`
//! on a Tokio task, serializes all access through messages, maps
//! opaque session credentials to seats, and runs the decision clock.
//!
//! ## Hand lifecycle
//!
//! - **Idle**: seats accumulate; any seated session may start play
//! - **Preflop/Flop/Turn/River**: betting rounds; a marker seat closes
//!   each round when action returns to it
//! - **Showdown**: best seven-card hand takes the pot, ties split it
//!
//! Hands chain automatically with rotating blinds until fewer than two
//! funded seats remain.
//!
//! ## Core Modules
//!
//! - [`game`]: cards, hand evaluation, and the table state machine
//! - [`table`]: the actor, its messages, and session handling
//!
//! ## Example
//!
//! ```
//! use holdem_table::{GameSettings, Table};
//!
//! let mut table = Table::new(GameSettings::default()).unwrap();
//! table.join("alice").unwrap();
//! table.join("bob").unwrap();
//! table.start_game().unwrap();
//! assert!(table.action_seat().is_some());
//! ```

/// Core game logic, entities, and the table state machine.
pub mod game;
pub use game::{
    Card, Chips, Deck, GameError, GameEvent, GamePhase, GameSettings, HandCategory, HandStrength,
    Player, PlayerAction, PlayerName, PlayerStatus, PlayerView, Rank, Recipient, SeatIndex, Suit,
    Table, TableView, WinnerSummary, constants, eval,
};

/// Async actor shell running a table on its own task.
pub mod table;
pub use table::{JoinReply, SessionId, TableActor, TableHandle, TableMessage};
