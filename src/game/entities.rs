//! Cards, chips, players, and the deck they're dealt from.

use rand::seq::SliceRandom;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::constants;
use super::errors::GameError;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Club, Self::Diamond, Self::Heart, Self::Spade];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Diamond => "♦",
            Self::Heart => "♥",
            Self::Spade => "♠",
        };
        write!(f, "{repr}")
    }
}

/// Card rank. Jack=11, Queen=12, King=13, Ace=14; the ace only ever
/// counts low inside the evaluator's wheel detection.
pub type Rank = u8;

pub const MIN_RANK: Rank = 2;
pub const MAX_RANK: Rank = 14;

/// A rank/suit pair.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Rank, pub Suit);

impl Card {
    pub fn rank(&self) -> Rank {
        self.0
    }

    pub fn suit(&self) -> Suit {
        self.1
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rank = match self.0 {
            14 => "A",
            13 => "K",
            12 => "Q",
            11 => "J",
            r => &r.to_string(),
        };
        let repr = format!("{rank}{}", self.1);
        write!(f, "{repr:>3}")
    }
}

/// Type alias for whole chips. Stacks, bets, and the pot are all counted
/// in these; fractions of a chip don't exist, which is exactly why pot
/// splits can leave a remainder.
pub type Chips = u32;

/// Type alias for seat positions at the table. Seats are dense and
/// never reorder once assigned.
pub type SeatIndex = usize;

/// A table-unique display name. Whitespace is folded to underscores and
/// overlong names are truncated rather than rejected.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(s: &str) -> Self {
        let mut name: String = s
            .trim()
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        name.truncate(constants::MAX_NAME_LENGTH);
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for PlayerName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<&str> for PlayerName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Where a seat stands relative to the hand in progress.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PlayerStatus {
    /// Seated after the current hand started; dealt in next hand.
    Waiting,
    /// Busted or departed; skipped until a rebuy brings them back.
    SittingOut,
    /// Folded this hand.
    Folded,
    /// Contesting the current hand. All-in players stay active.
    Active,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Waiting => "waiting",
            Self::SittingOut => "sitting out",
            Self::Folded => "folded",
            Self::Active => "active",
        };
        write!(f, "{repr}")
    }
}

/// The closed set of things a seat can do on its turn.
///
/// `Raise` names the round total being raised *to*, not the increment.
/// `Call` carries no amount: the table computes the price itself and a
/// short stack calling simply goes all-in for less.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PlayerAction {
    AllIn,
    Call,
    Check,
    Fold,
    Raise(Chips),
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::AllIn => "goes all-in",
            Self::Call => "calls",
            Self::Check => "checks",
            Self::Fold => "folds",
            Self::Raise(amount) => &format!("raises to ${amount}"),
        };
        write!(f, "{repr}")
    }
}

/// One seat at the table. Owned exclusively by the table state machine;
/// everything here is mutated only through its operations.
#[derive(Clone, Debug)]
pub struct Player {
    pub name: PlayerName,
    pub seat: SeatIndex,
    pub stack: Chips,
    /// Hole cards; empty between hands, 2 while dealt in.
    pub cards: Vec<Card>,
    /// Chips committed in the current betting round only.
    pub round_bet: Chips,
    pub status: PlayerStatus,
    pub rebuys: u32,
    /// Busted while posting a blind; excluded from the next rotation
    /// only, even if a rebuy lands in between.
    pub eliminated: bool,
    /// Asked to leave; becomes sitting-out at the next hand boundary.
    pub departed: bool,
    /// Hole cards revealed (showdown).
    pub showing: bool,
}

impl Player {
    #[must_use]
    pub fn new(name: PlayerName, seat: SeatIndex, stack: Chips) -> Self {
        Self {
            name,
            seat,
            stack,
            cards: Vec::with_capacity(constants::CARDS_PER_PLAYER),
            round_bet: 0,
            status: PlayerStatus::Waiting,
            rebuys: 0,
            eliminated: false,
            departed: false,
            showing: false,
        }
    }

    /// Clear per-hand state. Status is reassigned by the hand start.
    pub fn reset_for_hand(&mut self) {
        self.cards.clear();
        self.round_bet = 0;
        self.showing = false;
    }
}

/// A standard 52-card deck drawn without replacement.
///
/// `reset` rebuilds the population and reshuffles; draws walk the
/// shuffled order so no card repeats until the next reset.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

impl Deck {
    #[must_use]
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(constants::DECK_SIZE);
        for rank in MIN_RANK..=MAX_RANK {
            for suit in Suit::ALL {
                cards.push(Card(rank, suit));
            }
        }
        let mut deck = Self { cards, next: 0 };
        deck.reset();
        deck
    }

    /// Restore all 52 cards and reshuffle, discarding prior draw state.
    pub fn reset(&mut self) {
        self.cards.shuffle(&mut rand::rng());
        self.next = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }

    pub fn draw(&mut self) -> Result<Card, GameError> {
        if self.next >= self.cards.len() {
            return Err(GameError::EmptyDeck);
        }
        let card = self.cards[self.next];
        self.next += 1;
        Ok(card)
    }

    /// Deal `cards_per_player` cards to each of `num_players` hands.
    ///
    /// The availability check happens up front, so a failed deal never
    /// consumes any cards.
    pub fn deal_hands(
        &mut self,
        num_players: usize,
        cards_per_player: usize,
    ) -> Result<Vec<Vec<Card>>, GameError> {
        let requested = num_players * cards_per_player;
        if requested > self.remaining() {
            return Err(GameError::InsufficientCards {
                requested,
                remaining: self.remaining(),
            });
        }
        let mut hands = Vec::with_capacity(num_players);
        for _ in 0..num_players {
            let mut hand = Vec::with_capacity(cards_per_player);
            for _ in 0..cards_per_player {
                hand.push(self.draw()?);
            }
            hands.push(hand);
        }
        Ok(hands)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
