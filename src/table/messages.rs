//! Table actor message types.

use crate::game::entities::{Chips, PlayerAction, SeatIndex};
use crate::game::errors::GameError;
use crate::game::state::{GameEvent, TableView};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

/// Opaque per-connection credential. Knowing the session id is what
/// authorizes acting for its seat; seat indices alone never do.
pub type SessionId = Uuid;

/// Successful join: the credential to keep and the seat it maps to.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JoinReply {
    pub session: SessionId,
    pub seat: SeatIndex,
}

/// Messages that can be sent to a [`TableActor`](super::TableActor).
#[derive(Debug)]
pub enum TableMessage {
    /// Take a seat under `name`; replies with a fresh session.
    Join {
        name: String,
        response: oneshot::Sender<Result<JoinReply, GameError>>,
    },

    /// Register a channel to receive this session's event feed.
    Subscribe {
        session: SessionId,
        sender: mpsc::Sender<GameEvent>,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Open play; any seated session may ask.
    StartGame {
        session: SessionId,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Betting decision for the session's seat.
    Act {
        session: SessionId,
        action: PlayerAction,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Restore a busted stack to the buy-in.
    Rebuy {
        session: SessionId,
        response: oneshot::Sender<Result<Chips, GameError>>,
    },

    /// Depart the table and revoke the session.
    Leave {
        session: SessionId,
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Current table snapshot; available to anyone holding a handle.
    GetView {
        response: oneshot::Sender<TableView>,
    },

    /// Fold the current actor immediately, as if its clock ran out.
    CollectTimeout {
        response: oneshot::Sender<Result<(), GameError>>,
    },

    /// Stop the actor; subsequent sends fail with
    /// [`GameError::TableClosed`].
    Shutdown,
}
