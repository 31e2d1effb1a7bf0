//! Table actor with async message handling and the turn clock.
//!
//! The actor exclusively owns a [`Table`]; every mutation arrives as a
//! [`TableMessage`] and is answered on its oneshot. After each message
//! the queued game events are drained and routed: broadcasts fan out
//! to every subscriber, seat-addressed events only to the sessions
//! holding that seat. A one second tick drives the decision clock and
//! folds the prompted seat when its budget runs out.

use super::messages::{JoinReply, SessionId, TableMessage};
use crate::game::entities::{Chips, PlayerAction, SeatIndex};
use crate::game::errors::GameError;
use crate::game::state::{GameEvent, GameSettings, Recipient, Table, TableView};
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, interval};
use uuid::Uuid;

const INBOX_CAPACITY: usize = 100;
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Handle for sending messages to a running table actor.
///
/// Cloneable and cheap; every method resolves to
/// [`GameError::TableClosed`] once the actor is gone.
#[derive(Clone, Debug)]
pub struct TableHandle {
    sender: mpsc::Sender<TableMessage>,
}

impl TableHandle {
    /// Take a seat; the reply carries the session credential for all
    /// later per-seat requests.
    pub async fn join(&self, name: &str) -> Result<JoinReply, GameError> {
        let (response, reply) = oneshot::channel();
        self.send(TableMessage::Join {
            name: name.to_string(),
            response,
        })
        .await?;
        reply.await.map_err(|_| GameError::TableClosed)?
    }

    /// Open a buffered event feed for a session.
    pub async fn subscribe(
        &self,
        session: SessionId,
    ) -> Result<mpsc::Receiver<GameEvent>, GameError> {
        let (sender, receiver) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (response, reply) = oneshot::channel();
        self.send(TableMessage::Subscribe {
            session,
            sender,
            response,
        })
        .await?;
        reply.await.map_err(|_| GameError::TableClosed)??;
        Ok(receiver)
    }

    pub async fn start_game(&self, session: SessionId) -> Result<(), GameError> {
        let (response, reply) = oneshot::channel();
        self.send(TableMessage::StartGame { session, response }).await?;
        reply.await.map_err(|_| GameError::TableClosed)?
    }

    pub async fn act(&self, session: SessionId, action: PlayerAction) -> Result<(), GameError> {
        let (response, reply) = oneshot::channel();
        self.send(TableMessage::Act {
            session,
            action,
            response,
        })
        .await?;
        reply.await.map_err(|_| GameError::TableClosed)?
    }

    pub async fn rebuy(&self, session: SessionId) -> Result<Chips, GameError> {
        let (response, reply) = oneshot::channel();
        self.send(TableMessage::Rebuy { session, response }).await?;
        reply.await.map_err(|_| GameError::TableClosed)?
    }

    pub async fn leave(&self, session: SessionId) -> Result<(), GameError> {
        let (response, reply) = oneshot::channel();
        self.send(TableMessage::Leave { session, response }).await?;
        reply.await.map_err(|_| GameError::TableClosed)?
    }

    /// Snapshot of the table as any observer may see it.
    pub async fn view(&self) -> Result<TableView, GameError> {
        let (response, reply) = oneshot::channel();
        self.send(TableMessage::GetView { response }).await?;
        reply.await.map_err(|_| GameError::TableClosed)
    }

    /// Fold the prompted seat now instead of waiting out its clock.
    pub async fn collect_timeout(&self) -> Result<(), GameError> {
        let (response, reply) = oneshot::channel();
        self.send(TableMessage::CollectTimeout { response }).await?;
        reply.await.map_err(|_| GameError::TableClosed)?
    }

    pub async fn shutdown(&self) -> Result<(), GameError> {
        self.send(TableMessage::Shutdown).await
    }

    async fn send(&self, message: TableMessage) -> Result<(), GameError> {
        self.sender
            .send(message)
            .await
            .map_err(|_| GameError::TableClosed)
    }
}

/// Decision window for the currently prompted seat.
#[derive(Clone, Copy, Debug)]
struct TurnTimer {
    seat: SeatIndex,
    deadline: Instant,
}

/// Actor owning a single table.
pub struct TableActor {
    table: Table,

    /// Message inbox.
    inbox: mpsc::Receiver<TableMessage>,

    /// Session credential to seat index.
    sessions: HashMap<SessionId, SeatIndex>,

    /// Event feeds keyed by session.
    subscribers: HashMap<SessionId, mpsc::Sender<GameEvent>>,

    /// Armed while a seat is on the clock.
    timer: Option<TurnTimer>,

    closed: bool,
}

impl TableActor {
    pub fn new(settings: GameSettings) -> Result<(Self, TableHandle), GameError> {
        let table = Table::new(settings)?;
        let (sender, inbox) = mpsc::channel(INBOX_CAPACITY);
        let actor = Self {
            table,
            inbox,
            sessions: HashMap::new(),
            subscribers: HashMap::new(),
            timer: None,
            closed: false,
        };
        Ok((actor, TableHandle { sender }))
    }

    /// Create the actor and run it on a fresh task.
    pub fn spawn(settings: GameSettings) -> Result<(TableHandle, JoinHandle<()>), GameError> {
        let (actor, handle) = Self::new(settings)?;
        let task = tokio::spawn(actor.run());
        Ok((handle, task))
    }

    /// Run the actor event loop until shutdown or the last handle is
    /// dropped.
    pub async fn run(mut self) {
        log::info!("table actor starting");

        let mut tick_interval = interval(Duration::from_secs(1));

        loop {
            tokio::select! {
                message = self.inbox.recv() => {
                    match message {
                        Some(message) => {
                            self.handle_message(message);
                            if self.closed {
                                break;
                            }
                        }
                        None => break,
                    }
                }

                _ = tick_interval.tick() => {
                    self.tick();
                }
            }
        }

        log::info!("table actor closed");
    }

    fn handle_message(&mut self, message: TableMessage) {
        match message {
            TableMessage::Join { name, response } => {
                let result = self.handle_join(&name);
                let _ = response.send(result);
            }

            TableMessage::Subscribe {
                session,
                sender,
                response,
            } => {
                let result = if self.sessions.contains_key(&session) {
                    self.subscribers.insert(session, sender);
                    log::debug!("session {session} subscribed to the event feed");
                    Ok(())
                } else {
                    Err(GameError::UnknownSession)
                };
                let _ = response.send(result);
            }

            TableMessage::StartGame { session, response } => {
                let result = self
                    .seat_for(&session)
                    .and_then(|_| self.table.start_game());
                let _ = response.send(result);
            }

            TableMessage::Act {
                session,
                action,
                response,
            } => {
                let result = self
                    .seat_for(&session)
                    .and_then(|seat| self.table.take_action(seat, action));
                let _ = response.send(result);
            }

            TableMessage::Rebuy { session, response } => {
                let result = self.seat_for(&session).and_then(|seat| self.table.rebuy(seat));
                let _ = response.send(result);
            }

            TableMessage::Leave { session, response } => {
                let result = self.seat_for(&session).and_then(|seat| {
                    self.table.leave(seat)?;
                    // The credential dies with the seat's departure.
                    self.sessions.remove(&session);
                    self.subscribers.remove(&session);
                    Ok(())
                });
                let _ = response.send(result);
            }

            TableMessage::GetView { response } => {
                let _ = response.send(self.table.snapshot());
            }

            TableMessage::CollectTimeout { response } => {
                let result = self.fold_current_actor();
                let _ = response.send(result);
            }

            TableMessage::Shutdown => {
                self.closed = true;
            }
        }

        self.flush_events();
    }

    fn handle_join(&mut self, name: &str) -> Result<JoinReply, GameError> {
        let seat = self.table.join(name)?;
        let session = Uuid::new_v4();
        self.sessions.insert(session, seat);
        log::info!("session {session} holds seat {seat}");
        Ok(JoinReply { session, seat })
    }

    fn seat_for(&mut self, session: &SessionId) -> Result<SeatIndex, GameError> {
        self.sessions
            .get(session)
            .copied()
            .ok_or(GameError::UnknownSession)
    }

    fn fold_current_actor(&mut self) -> Result<(), GameError> {
        match self.table.action_seat() {
            Some(seat) => {
                log::info!("folding seat {seat} for running out of time");
                self.timer = None;
                self.table.take_action(seat, PlayerAction::Fold)
            }
            None => Err(GameError::invalid_action("no decision pending")),
        }
    }

    /// Route everything the table queued since the last flush, arming
    /// the decision clock for whichever prompt comes out last.
    fn flush_events(&mut self) {
        for (recipient, event) in self.table.drain_events() {
            if let GameEvent::StartTurn { seat, time_budget } = event {
                self.timer = Some(TurnTimer {
                    seat,
                    deadline: Instant::now() + time_budget,
                });
            }
            match recipient {
                Recipient::All => self.broadcast(event),
                Recipient::Seat(seat) => self.notify(seat, event),
            }
        }
        if self.table.action_seat().is_none() {
            self.timer = None;
        }
    }

    /// Send to every subscriber, dropping the disconnected.
    fn broadcast(&mut self, event: GameEvent) {
        self.subscribers.retain(|session, sender| {
            match sender.try_send(event.clone()) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!("session {session} event channel full, dropping event");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("session {session} disconnected, removing subscriber");
                    false
                }
            }
        });
    }

    /// Send to the sessions holding `seat` only.
    fn notify(&mut self, seat: SeatIndex, event: GameEvent) {
        let targets: Vec<SessionId> = self
            .sessions
            .iter()
            .filter_map(|(session, held)| (*held == seat).then_some(*session))
            .collect();
        for session in targets {
            let Some(sender) = self.subscribers.get(&session) else {
                continue;
            };
            match sender.try_send(event.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!("session {session} event channel full, dropping event");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    self.subscribers.remove(&session);
                }
            }
        }
    }

    /// Advance the decision clock: count down out loud each second and
    /// fold the prompted seat once the deadline passes.
    fn tick(&mut self) {
        let Some(timer) = self.timer else {
            return;
        };
        let now = Instant::now();
        if now >= timer.deadline {
            log::info!("seat {} ran out of time; folding", timer.seat);
            self.timer = None;
            if let Err(err) = self.table.take_action(timer.seat, PlayerAction::Fold) {
                log::error!("timeout fold failed: {err}");
            }
            self.flush_events();
        } else {
            let remaining = timer.deadline.saturating_duration_since(now);
            self.broadcast(GameEvent::TurnClock {
                seat: timer.seat,
                remaining_secs: remaining.as_secs(),
            });
        }
    }
}
