//! Error taxonomy shared by the deck, evaluator, state machine, and actor.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entities::Chips;

/// Errors surfaced by table operations.
///
/// Every state-mutating operation validates before it mutates, so a
/// returned error always means the table was left untouched.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum GameError {
    #[error("the deck is out of cards")]
    EmptyDeck,
    #[error("can't deal {requested} cards, only {remaining} remain")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("malformed hand: {reason}")]
    MalformedHand { reason: String },
    #[error("invalid action: {reason}")]
    InvalidAction { reason: String },
    #[error("not your turn")]
    OutOfTurn,
    #[error("{name} is already seated")]
    DuplicateJoin { name: String },
    #[error("table is full")]
    TableFull,
    #[error("need 2+ funded players")]
    NotEnoughPlayers,
    #[error("a hand is already in progress")]
    HandInProgress,
    #[error("no rebuys left (limit {limit})")]
    RebuyLimit { limit: u32 },
    #[error("need an empty stack to rebuy (have ${stack})")]
    RebuyWithChips { stack: Chips },
    #[error("can't rebuy a seat still in play")]
    RebuyInPlay,
    #[error("unknown session")]
    UnknownSession,
    #[error("invalid settings: {reason}")]
    InvalidSettings { reason: String },
    #[error("table is closed")]
    TableClosed,
}

impl GameError {
    /// Shorthand for action rejections with a one-off reason.
    pub fn invalid_action(reason: impl Into<String>) -> Self {
        Self::InvalidAction {
            reason: reason.into(),
        }
    }
}
