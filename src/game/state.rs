//! The single-table state machine.
//!
//! [`Table`] owns every seat, the deck, the pot, and the per-hand
//! position/turn bookkeeping. All operations are synchronous and
//! deterministic; side effects toward connected players are queued as
//! addressed [`GameEvent`]s in an outbox that the owning task drains
//! after each mutation. Validation always happens before mutation, so
//! an `Err` means nothing changed.

use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use super::constants::{BOARD_SIZE, CARDS_PER_PLAYER, FLOP_REVEAL, MAX_SEATS, MIN_PLAYERS};
use super::entities::{Card, Chips, Player, PlayerAction, PlayerName, PlayerStatus, SeatIndex};
use super::entities::Deck;
use super::errors::GameError;
use super::eval::{self, HandStrength};

pub const DEFAULT_BUY_IN: Chips = 500;
pub const DEFAULT_SMALL_BLIND: Chips = 5;
pub const DEFAULT_BIG_BLIND: Chips = 10;
pub const DEFAULT_MAX_REBUYS: u32 = 3;
pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Table configuration, validated at construction.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GameSettings {
    pub max_players: usize,
    pub buy_in: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub max_rebuys: u32,
    pub action_timeout: Duration,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::new(
            MAX_SEATS,
            DEFAULT_BUY_IN,
            DEFAULT_SMALL_BLIND,
            DEFAULT_BIG_BLIND,
            DEFAULT_MAX_REBUYS,
            DEFAULT_ACTION_TIMEOUT,
        )
    }
}

impl GameSettings {
    #[must_use]
    pub const fn new(
        max_players: usize,
        buy_in: Chips,
        small_blind: Chips,
        big_blind: Chips,
        max_rebuys: u32,
        action_timeout: Duration,
    ) -> Self {
        Self {
            max_players,
            buy_in,
            small_blind,
            big_blind,
            max_rebuys,
            action_timeout,
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let reason = if self.max_players < MIN_PLAYERS || self.max_players > MAX_SEATS {
            format!("max_players must be within {MIN_PLAYERS}..={MAX_SEATS}")
        } else if self.small_blind == 0 {
            "small blind must be nonzero".to_string()
        } else if self.big_blind <= self.small_blind {
            "big blind must exceed the small blind".to_string()
        } else if self.buy_in < self.big_blind {
            "buy-in must cover the big blind".to_string()
        } else if self.action_timeout.as_secs() == 0 {
            "action timeout must be at least one second".to_string()
        } else {
            return Ok(());
        };
        Err(GameError::InvalidSettings { reason })
    }
}

/// Hand lifecycle; betting happens in Preflop through River.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GamePhase {
    Idle,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl GamePhase {
    pub fn is_betting(self) -> bool {
        matches!(self, Self::Preflop | Self::Flop | Self::Turn | Self::River)
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Idle => "idle",
            Self::Preflop => "preflop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
            Self::Showdown => "showdown",
        };
        write!(f, "{repr}")
    }
}

/// Who an outbox event is addressed to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Recipient {
    Seat(SeatIndex),
    All,
}

/// A hand-end payout line.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct WinnerSummary {
    pub seat: SeatIndex,
    pub name: PlayerName,
    pub payout: Chips,
    /// Present at showdown; a win by everyone else folding never
    /// evaluates (or reveals) the hand.
    pub strength: Option<HandStrength>,
}

impl fmt::Display for WinnerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wins ${}", self.name, self.payout)
    }
}

/// Events queued toward connected players.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum GameEvent {
    /// To the joining seat: where it ended up.
    PlayerInfo { seat: SeatIndex, name: PlayerName },
    /// To one seat: its hole cards.
    DealCards { cards: Vec<Card> },
    /// To the prompted seat: it is their turn, with the decision budget.
    StartTurn {
        seat: SeatIndex,
        time_budget: Duration,
    },
    /// Broadcast once per second while a decision window is open.
    TurnClock { seat: SeatIndex, remaining_secs: u64 },
    /// Broadcast snapshot after every mutation.
    GameState(TableView),
    /// Broadcast for every applied action, synthesized folds included.
    PlayerActed { seat: SeatIndex, action: PlayerAction },
    /// Broadcast at hand end.
    DeclareWinners { winners: Vec<WinnerSummary> },
    /// Broadcast when a betting round closes or a hand starts/ends;
    /// clears any stale action UI.
    ResetPrompts,
    /// Broadcast when a seat departs.
    PlayerLeft { seat: SeatIndex },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::PlayerInfo { seat, name } => format!("{name} seated at seat {seat}"),
            Self::DealCards { cards } => format!("{} hole cards dealt", cards.len()),
            Self::StartTurn { seat, time_budget } => {
                format!("seat {seat} to act within {}s", time_budget.as_secs())
            }
            Self::TurnClock {
                seat,
                remaining_secs,
            } => format!("seat {seat} has {remaining_secs}s left"),
            Self::GameState(_) => "table state updated".to_string(),
            Self::PlayerActed { seat, action } => format!("seat {seat} {action}"),
            Self::DeclareWinners { winners } => winners
                .iter()
                .map(WinnerSummary::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            Self::ResetPrompts => "action prompts cleared".to_string(),
            Self::PlayerLeft { seat } => format!("seat {seat} left the table"),
        };
        write!(f, "{repr}")
    }
}

/// One seat as the rest of the table sees it; hole cards only appear
/// once their owner is showing.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PlayerView {
    pub seat: SeatIndex,
    pub name: PlayerName,
    pub stack: Chips,
    pub round_bet: Chips,
    pub status: PlayerStatus,
    pub rebuys: u32,
    pub cards: Vec<Card>,
}

/// Serializable snapshot of the table.
///
/// Position seats are meaningful once a game has started; the board
/// only carries the revealed community cards.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TableView {
    pub phase: GamePhase,
    pub pot: Chips,
    pub bet_to_call: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub board: Vec<Card>,
    pub dealer_seat: SeatIndex,
    pub small_blind_seat: SeatIndex,
    pub big_blind_seat: SeatIndex,
    pub under_the_gun_seat: SeatIndex,
    pub action_seat: Option<SeatIndex>,
    pub players: Vec<PlayerView>,
}

/// The table state machine.
///
/// One hand at a time: `start_game` seats the positions and opens the
/// first hand; afterwards hands chain themselves (rotating positions)
/// until fewer than two funded seats remain and the table parks in
/// [`GamePhase::Idle`]. Turn order, betting legality, pot integrity,
/// and showdown resolution all live here; timers and delivery live
/// with the owner draining [`Table::drain_events`].
#[derive(Debug)]
pub struct Table {
    settings: GameSettings,
    players: Vec<Player>,
    deck: Deck,
    /// All five community cards for the hand; `revealed` gates what
    /// views and the evaluator's street logic may see.
    board: Vec<Card>,
    revealed: usize,
    phase: GamePhase,
    pot: Chips,
    bet_to_call: Chips,
    dealer: SeatIndex,
    small_blind: SeatIndex,
    big_blind: SeatIndex,
    under_the_gun: SeatIndex,
    action_seat: Option<SeatIndex>,
    /// The seat that closes the betting round when reached again.
    marker: Option<SeatIndex>,
    events: VecDeque<(Recipient, GameEvent)>,
}

impl Table {
    pub fn new(settings: GameSettings) -> Result<Self, GameError> {
        settings.validate()?;
        Ok(Self {
            settings,
            players: Vec::new(),
            deck: Deck::new(),
            board: Vec::with_capacity(BOARD_SIZE),
            revealed: 0,
            phase: GamePhase::Idle,
            pot: 0,
            bet_to_call: 0,
            dealer: 0,
            small_blind: 0,
            big_blind: 0,
            under_the_gun: 0,
            action_seat: None,
            marker: None,
            events: VecDeque::new(),
        })
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn pot(&self) -> Chips {
        self.pot
    }

    pub fn bet_to_call(&self) -> Chips {
        self.bet_to_call
    }

    pub fn action_seat(&self) -> Option<SeatIndex> {
        self.action_seat
    }

    pub fn dealer_seat(&self) -> SeatIndex {
        self.dealer
    }

    pub fn small_blind_seat(&self) -> SeatIndex {
        self.small_blind
    }

    pub fn big_blind_seat(&self) -> SeatIndex {
        self.big_blind
    }

    pub fn under_the_gun_seat(&self) -> SeatIndex {
        self.under_the_gun
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Take everything queued since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<(Recipient, GameEvent)> {
        self.events.drain(..).collect()
    }

    /// Seat a new player with the configured buy-in. The seat is dealt
    /// into the next hand; joining never disturbs a hand in progress.
    pub fn join(&mut self, name: &str) -> Result<SeatIndex, GameError> {
        let name = PlayerName::new(name);
        if name.is_empty() {
            return Err(GameError::invalid_action("name can't be empty"));
        }
        if self.players.iter().any(|player| player.name == name) {
            return Err(GameError::DuplicateJoin {
                name: name.to_string(),
            });
        }
        if self.players.len() >= self.settings.max_players {
            return Err(GameError::TableFull);
        }
        let seat = self.players.len();
        self.players
            .push(Player::new(name.clone(), seat, self.settings.buy_in));
        info!("{name} joined at seat {seat}");
        self.push(Recipient::Seat(seat), GameEvent::PlayerInfo { seat, name });
        self.push_state();
        Ok(seat)
    }

    /// Open play: compute the initial positions from the seat count and
    /// start the first hand. Subsequent hands chain automatically; this
    /// is only needed again after the table parks idle.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::Idle {
            return Err(GameError::HandInProgress);
        }
        if self.funded_seat_count() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers);
        }
        info!("starting game with {} seats", self.players.len());
        self.begin_hand(true)
    }

    /// Apply the current actor's decision. Rejected wholesale (no
    /// mutation) when it is not `seat`'s turn, the phase isn't a
    /// betting round, or the action itself is illegal.
    pub fn take_action(&mut self, seat: SeatIndex, action: PlayerAction) -> Result<(), GameError> {
        if !self.phase.is_betting() {
            return Err(GameError::invalid_action("no betting round in progress"));
        }
        if self.action_seat != Some(seat) {
            return Err(GameError::OutOfTurn);
        }

        let player = &self.players[seat];
        let owed = self.bet_to_call.saturating_sub(player.round_bet);
        let (delta, aggressive) = match action {
            PlayerAction::Fold => (0, false),
            PlayerAction::Check => {
                if owed > 0 {
                    return Err(GameError::invalid_action(format!(
                        "can't check facing ${owed}"
                    )));
                }
                (0, false)
            }
            PlayerAction::Call => (owed.min(player.stack), false),
            PlayerAction::Raise(total) => {
                if total <= self.bet_to_call {
                    return Err(GameError::invalid_action(format!(
                        "raise must exceed the ${} to call",
                        self.bet_to_call
                    )));
                }
                let delta = total - player.round_bet;
                if delta > player.stack {
                    return Err(GameError::invalid_action(format!(
                        "raise to ${total} exceeds the stack"
                    )));
                }
                (delta, true)
            }
            // A seat already all-in re-prompts as a no-op; committing
            // nothing must not claim the round marker.
            PlayerAction::AllIn => (player.stack, player.stack > 0),
        };

        let player = &mut self.players[seat];
        if action == PlayerAction::Fold {
            player.status = PlayerStatus::Folded;
        } else {
            player.stack -= delta;
            player.round_bet += delta;
            self.pot += delta;
            if player.round_bet > self.bet_to_call {
                self.bet_to_call = player.round_bet;
            }
            // First voluntary action of the round, or any raise,
            // becomes the seat that closes the round on re-visitation.
            if self.marker.is_none() || aggressive {
                self.marker = Some(seat);
            }
        }
        debug!("seat {seat} {action} (pot ${})", self.pot);
        self.push(Recipient::All, GameEvent::PlayerActed { seat, action });
        self.after_action(seat);
        Ok(())
    }

    /// Restore a busted seat to the configured buy-in. Only an empty
    /// stack already sitting out may rebuy, and only `max_rebuys`
    /// times; an all-in seat keeps its claim on the pot until the
    /// hand resolves.
    pub fn rebuy(&mut self, seat: SeatIndex) -> Result<Chips, GameError> {
        if seat >= self.players.len() {
            return Err(GameError::invalid_action("no such seat"));
        }
        let limit = self.settings.max_rebuys;
        let buy_in = self.settings.buy_in;
        let player = &mut self.players[seat];
        if player.stack > 0 {
            return Err(GameError::RebuyWithChips {
                stack: player.stack,
            });
        }
        if player.status != PlayerStatus::SittingOut {
            return Err(GameError::RebuyInPlay);
        }
        if player.rebuys >= limit {
            return Err(GameError::RebuyLimit { limit });
        }
        player.stack = buy_in;
        player.rebuys += 1;
        player.status = PlayerStatus::Waiting;
        info!("seat {seat} rebought for ${buy_in}");
        self.push_state();
        Ok(buy_in)
    }

    /// Depart the table. A seat active in a hand folds first (through
    /// the normal path when it is the actor); the seat then sits out
    /// from the next hand boundary. The roster stays dense, so the
    /// seat index remains occupied.
    pub fn leave(&mut self, seat: SeatIndex) -> Result<(), GameError> {
        if seat >= self.players.len() {
            return Err(GameError::invalid_action("no such seat"));
        }
        self.players[seat].departed = true;
        info!("seat {seat} is leaving the table");
        self.push(Recipient::All, GameEvent::PlayerLeft { seat });

        let in_hand = self.phase.is_betting()
            && self.players[seat].status == PlayerStatus::Active;
        if in_hand {
            if self.action_seat == Some(seat) {
                return self.take_action(seat, PlayerAction::Fold);
            }
            self.players[seat].status = PlayerStatus::Folded;
            self.push(
                Recipient::All,
                GameEvent::PlayerActed {
                    seat,
                    action: PlayerAction::Fold,
                },
            );
            if self.active_count() == 1 {
                self.award_to_last_standing();
                return Ok(());
            }
            // An out-of-turn fold can orphan the round-closing marker;
            // hand it to the next seat still in.
            if self.marker == Some(seat) {
                self.marker = Some(self.next_active_after(seat));
            }
        } else {
            self.players[seat].status = PlayerStatus::SittingOut;
        }
        self.push_state();
        Ok(())
    }

    /// Current table snapshot with unrevealed information redacted.
    pub fn snapshot(&self) -> TableView {
        TableView {
            phase: self.phase,
            pot: self.pot,
            bet_to_call: self.bet_to_call,
            small_blind: self.settings.small_blind,
            big_blind: self.settings.big_blind,
            board: self.board[..self.revealed].to_vec(),
            dealer_seat: self.dealer,
            small_blind_seat: self.small_blind,
            big_blind_seat: self.big_blind,
            under_the_gun_seat: self.under_the_gun,
            action_seat: self.action_seat,
            players: self
                .players
                .iter()
                .map(|player| PlayerView {
                    seat: player.seat,
                    name: player.name.clone(),
                    stack: player.stack,
                    round_bet: player.round_bet,
                    status: player.status,
                    rebuys: player.rebuys,
                    cards: if player.showing {
                        player.cards.clone()
                    } else {
                        Vec::new()
                    },
                })
                .collect(),
        }
    }

    // ---- hand lifecycle -------------------------------------------------

    /// Start a hand. `first_hand` uses the seat-count formulas for the
    /// positions; otherwise positions rotate among eligible seats. On
    /// failure the table parks idle and the error propagates.
    fn begin_hand(&mut self, first_hand: bool) -> Result<(), GameError> {
        let prev_small_blind = self.small_blind;
        let prev_big_blind = self.big_blind;

        self.board.clear();
        self.revealed = 0;
        self.marker = None;
        self.action_seat = None;
        for player in &mut self.players {
            player.reset_for_hand();
        }

        // Bust and departure marking. A blind seat wiped out last hand
        // is flagged so the coming rotation skips it exactly once.
        for seat in 0..self.players.len() {
            let player = &mut self.players[seat];
            if player.status == PlayerStatus::SittingOut {
                continue;
            }
            if player.stack == 0 {
                player.status = PlayerStatus::SittingOut;
                if seat == prev_small_blind || seat == prev_big_blind {
                    player.eliminated = true;
                }
                info!("seat {seat} busted and sits out");
            } else if player.departed {
                player.status = PlayerStatus::SittingOut;
            }
        }

        let participants: Vec<SeatIndex> = (0..self.players.len())
            .filter(|&seat| self.players[seat].status != PlayerStatus::SittingOut)
            .collect();
        if participants.len() < MIN_PLAYERS {
            info!("not enough funded seats to deal; table is idle");
            self.park_idle();
            return Err(GameError::NotEnoughPlayers);
        }

        if first_hand {
            // A fresh start is not a rotation; elimination flags only
            // ever skip rotations.
            for player in &mut self.players {
                player.eliminated = false;
            }
            self.assign_initial_positions();
        } else {
            self.rotate_positions();
        }

        for &seat in &participants {
            self.players[seat].status = PlayerStatus::Active;
        }

        self.deck.reset();
        match self.deck.deal_hands(participants.len(), CARDS_PER_PLAYER) {
            Ok(hands) => {
                for (&seat, hand) in participants.iter().zip(hands) {
                    self.players[seat].cards = hand;
                }
            }
            Err(err) => {
                error!("dealing failed: {err}");
                self.park_idle();
                return Err(err);
            }
        }
        for _ in 0..BOARD_SIZE {
            match self.deck.draw() {
                Ok(card) => self.board.push(card),
                Err(err) => {
                    error!("dealing the board failed: {err}");
                    self.park_idle();
                    return Err(err);
                }
            }
        }

        self.post_blinds();
        self.phase = GamePhase::Preflop;
        info!(
            "hand started: dealer {}, blinds {}/{}, utg {}",
            self.dealer, self.small_blind, self.big_blind, self.under_the_gun
        );

        self.push(Recipient::All, GameEvent::ResetPrompts);
        for &seat in &participants {
            let cards = self.players[seat].cards.clone();
            self.push(Recipient::Seat(seat), GameEvent::DealCards { cards });
        }
        self.push_state();
        self.prompt(self.under_the_gun);
        Ok(())
    }

    /// Initial positions from the seat count: the dealer starts three
    /// seats from the end, blinds follow, and under-the-gun wraps to
    /// the front. Two seats degenerate to dealer == small blind.
    fn assign_initial_positions(&mut self) {
        let n = self.players.len();
        let dealer = n.saturating_sub(3);
        let (small_blind, big_blind, under_the_gun) = if n == MIN_PLAYERS {
            (dealer, 1 - dealer, dealer)
        } else {
            let small_blind = if dealer + 1 > n - 1 { 0 } else { dealer + 1 };
            let big_blind = (small_blind + 1) % n;
            (small_blind, big_blind, (big_blind + 1) % n)
        };
        self.dealer = dealer;
        self.small_blind = small_blind;
        self.big_blind = big_blind;
        self.under_the_gun = under_the_gun;

        // Busted seats can linger when the table restarts after going
        // idle; re-anchor the positions on seats that can play.
        let all_live = [dealer, small_blind, big_blind, under_the_gun]
            .into_iter()
            .all(|seat| self.seat_eligible(seat));
        if !all_live {
            let anchor = if self.seat_eligible(self.big_blind) {
                self.big_blind
            } else {
                self.next_eligible_after(self.big_blind)
            };
            self.positions_from_big_blind(anchor);
        }
    }

    /// Move the blinds one eligible seat forward and re-derive the
    /// rest, clearing every elimination flag on the way out.
    fn rotate_positions(&mut self) {
        let next_big_blind = self.next_eligible_after(self.big_blind);
        self.positions_from_big_blind(next_big_blind);
        for player in &mut self.players {
            player.eliminated = false;
        }
    }

    fn positions_from_big_blind(&mut self, big_blind: SeatIndex) {
        self.big_blind = big_blind;
        self.small_blind = self.prev_eligible_before(big_blind);
        self.dealer = if self.eligible_count() == 2 {
            self.small_blind
        } else {
            self.prev_eligible_before(self.small_blind)
        };
        self.under_the_gun = self.next_eligible_after(big_blind);
    }

    /// Post the forced bets. A short stack posts what it has; the
    /// price of the round stays the configured big blind.
    fn post_blinds(&mut self) {
        for (seat, blind) in [
            (self.small_blind, self.settings.small_blind),
            (self.big_blind, self.settings.big_blind),
        ] {
            let player = &mut self.players[seat];
            let amount = blind.min(player.stack);
            player.stack -= amount;
            player.round_bet += amount;
            self.pot += amount;
        }
        self.bet_to_call = self.settings.big_blind;
    }

    fn after_action(&mut self, seat: SeatIndex) {
        if self.active_count() == 1 {
            self.award_to_last_standing();
            return;
        }
        let next = self.next_active_after(seat);
        if self.marker == Some(next) {
            self.advance_phase();
        } else {
            self.push_state();
            self.prompt(next);
        }
    }

    /// Close the betting round: reveal the street, reset the bets, and
    /// prompt the post-flop first actor; off the river, resolve the
    /// hand instead.
    fn advance_phase(&mut self) {
        match self.phase {
            GamePhase::Preflop => {
                self.revealed = FLOP_REVEAL;
                self.phase = GamePhase::Flop;
            }
            GamePhase::Flop => {
                self.revealed += 1;
                self.phase = GamePhase::Turn;
            }
            GamePhase::Turn => {
                self.revealed += 1;
                self.phase = GamePhase::River;
            }
            GamePhase::River => {
                self.phase = GamePhase::Showdown;
                self.resolve_showdown();
                return;
            }
            GamePhase::Idle | GamePhase::Showdown => {
                error!("phase advance outside a betting round");
                return;
            }
        }
        debug!("betting round closed; now {}", self.phase);
        for player in &mut self.players {
            player.round_bet = 0;
        }
        self.bet_to_call = 0;
        self.marker = None;
        self.push(Recipient::All, GameEvent::ResetPrompts);
        self.push_state();
        let first = if self.is_active(self.small_blind) {
            self.small_blind
        } else {
            self.next_active_after(self.small_blind)
        };
        self.prompt(first);
    }

    /// Compare the remaining hands, split the pot evenly among the
    /// best (odd chips go to the first winner past the dealer), reveal
    /// the contenders, and chain into the next hand.
    fn resolve_showdown(&mut self) {
        let contenders: Vec<SeatIndex> = (0..self.players.len())
            .filter(|&seat| self.is_active(seat))
            .collect();
        if contenders.is_empty() {
            error!("showdown with no contenders");
            self.park_idle();
            return;
        }

        let mut strengths = Vec::with_capacity(contenders.len());
        for &seat in &contenders {
            let mut seven = self.players[seat].cards.clone();
            seven.extend_from_slice(&self.board);
            match eval::rank(&seven) {
                Ok(strength) => strengths.push(strength),
                Err(err) => {
                    error!("hand evaluation failed for seat {seat}: {err}");
                    self.park_idle();
                    return;
                }
            }
        }

        let mut winner_seats: Vec<(SeatIndex, HandStrength)> = eval::winners(&strengths)
            .into_iter()
            .map(|i| (contenders[i], strengths[i]))
            .collect();
        // Seat order starting just past the dealer decides who takes
        // the odd chips.
        let n = self.players.len();
        let anchor = (self.dealer + 1) % n;
        winner_seats.sort_by_key(|(seat, _)| (seat + n - anchor) % n);

        let share = self.pot / winner_seats.len() as Chips;
        let remainder = self.pot % winner_seats.len() as Chips;
        let mut winners = Vec::with_capacity(winner_seats.len());
        for (i, (seat, strength)) in winner_seats.iter().enumerate() {
            let payout = share + if i == 0 { remainder } else { 0 };
            self.players[*seat].stack += payout;
            winners.push(WinnerSummary {
                seat: *seat,
                name: self.players[*seat].name.clone(),
                payout,
                strength: Some(*strength),
            });
        }
        self.pot = 0;

        for &seat in &contenders {
            self.players[seat].showing = true;
        }
        for winner in &winners {
            info!("{winner}");
        }
        self.action_seat = None;
        self.push_state();
        self.push(Recipient::All, GameEvent::DeclareWinners { winners });
        self.push(Recipient::All, GameEvent::ResetPrompts);
        self.continue_next_hand();
    }

    /// Everyone else folded: the last seat standing takes the pot
    /// uncontested and unrevealed.
    fn award_to_last_standing(&mut self) {
        let Some(winner) = (0..self.players.len()).find(|&seat| self.is_active(seat)) else {
            error!("no active seat left to award the pot to");
            self.park_idle();
            return;
        };
        let payout = self.pot;
        self.players[winner].stack += payout;
        self.pot = 0;
        let summary = WinnerSummary {
            seat: winner,
            name: self.players[winner].name.clone(),
            payout,
            strength: None,
        };
        info!("{summary}");
        self.action_seat = None;
        self.push_state();
        self.push(
            Recipient::All,
            GameEvent::DeclareWinners {
                winners: vec![summary],
            },
        );
        self.push(Recipient::All, GameEvent::ResetPrompts);
        self.continue_next_hand();
    }

    /// Chain into the next hand; quorum loss parks the table instead
    /// of failing the action that ended this one.
    fn continue_next_hand(&mut self) {
        match self.begin_hand(false) {
            Ok(()) => {}
            Err(GameError::NotEnoughPlayers) => {}
            Err(err) => error!("failed to start the next hand: {err}"),
        }
    }

    fn park_idle(&mut self) {
        self.phase = GamePhase::Idle;
        self.action_seat = None;
        self.marker = None;
        self.push_state();
    }

    fn prompt(&mut self, seat: SeatIndex) {
        self.action_seat = Some(seat);
        self.push(
            Recipient::Seat(seat),
            GameEvent::StartTurn {
                seat,
                time_budget: self.settings.action_timeout,
            },
        );
    }

    // ---- seat arithmetic ------------------------------------------------

    fn is_active(&self, seat: SeatIndex) -> bool {
        self.players[seat].status == PlayerStatus::Active
    }

    /// In the game for rotation purposes: seated, not sitting out, and
    /// not flagged off this rotation.
    fn seat_eligible(&self, seat: SeatIndex) -> bool {
        let player = &self.players[seat];
        player.status != PlayerStatus::SittingOut && !player.eliminated
    }

    fn eligible_count(&self) -> usize {
        (0..self.players.len())
            .filter(|&seat| self.seat_eligible(seat))
            .count()
    }

    /// Seats that would be dealt into a fresh hand right now.
    fn funded_seat_count(&self) -> usize {
        self.players
            .iter()
            .filter(|player| {
                player.stack > 0
                    && !player.departed
                    && player.status != PlayerStatus::SittingOut
            })
            .count()
    }

    fn active_count(&self) -> usize {
        (0..self.players.len())
            .filter(|&seat| self.is_active(seat))
            .count()
    }

    fn next_active_after(&self, from: SeatIndex) -> SeatIndex {
        let n = self.players.len();
        let mut seat = (from + 1) % n;
        for _ in 0..n {
            if self.is_active(seat) {
                return seat;
            }
            seat = (seat + 1) % n;
        }
        from
    }

    /// Next eligible seat strictly after `from`, clearing the
    /// elimination flag of every seat skipped on the way.
    fn next_eligible_after(&mut self, from: SeatIndex) -> SeatIndex {
        let n = self.players.len();
        let mut seat = (from + 1) % n;
        for _ in 0..n {
            if self.seat_eligible(seat) {
                return seat;
            }
            self.players[seat].eliminated = false;
            seat = (seat + 1) % n;
        }
        from
    }

    /// Mirror image of [`Self::next_eligible_after`].
    fn prev_eligible_before(&mut self, from: SeatIndex) -> SeatIndex {
        let n = self.players.len();
        let mut seat = (from + n - 1) % n;
        for _ in 0..n {
            if self.seat_eligible(seat) {
                return seat;
            }
            self.players[seat].eliminated = false;
            seat = (seat + n - 1) % n;
        }
        from
    }

    // ---- outbox ---------------------------------------------------------

    fn push(&mut self, recipient: Recipient, event: GameEvent) {
        self.events.push_back((recipient, event));
    }

    fn push_state(&mut self) {
        let view = self.snapshot();
        self.events
            .push_back((Recipient::All, GameEvent::GameState(view)));
    }
}
