//! Table module running the game engine behind an async actor.
//!
//! This module implements:
//! - TableActor: async actor exclusively owning one [`Table`](crate::game::Table)
//! - TableHandle: cloneable client with typed request methods
//! - Session credentials mapping connections to seats
//! - Per-second decision clock with timeout folds
//!
//! ## Architecture
//!
//! The actor runs on its own Tokio task with an mpsc message inbox.
//! Callers never touch the game state directly: they hold a
//! [`TableHandle`], receive their results on oneshots, and consume the
//! event feed opened by [`TableHandle::subscribe`]. The actor drains
//! the table's event outbox after every message and routes each event
//! to its addressee.
//!
//! ## Example
//!
//! ```ignore
//! use holdem_table::table::TableActor;
//! use holdem_table::game::{GameSettings, PlayerAction};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (handle, _task) = TableActor::spawn(GameSettings::default()).unwrap();
//!
//!     let alice = handle.join("alice").await.unwrap();
//!     handle.join("bob").await.unwrap();
//!     let mut feed = handle.subscribe(alice.session).await.unwrap();
//!     handle.start_game(alice.session).await.unwrap();
//!
//!     while let Some(event) = feed.recv().await {
//!         println!("{event}");
//!     }
//! }
//! ```

pub mod actor;
pub mod messages;

pub use actor::{TableActor, TableHandle};
pub use messages::{JoinReply, SessionId, TableMessage};
