/// Integration tests for deck construction and dealing
///
/// These tests verify that a deck behaves like a real fifty-two card
/// deck: full coverage, honest exhaustion errors, and all-or-nothing
/// multi-hand deals.
use holdem_table::{Card, Deck, GameError, constants::DECK_SIZE};
use std::collections::HashSet;

#[test]
fn test_fresh_deck_covers_every_card() {
    let mut deck = Deck::new();
    let mut seen: HashSet<Card> = HashSet::new();

    for _ in 0..DECK_SIZE {
        let card = deck.draw().unwrap();
        assert!((2..=14).contains(&card.rank()));
        assert!(seen.insert(card), "drew {card} twice");
    }
    assert_eq!(seen.len(), DECK_SIZE);
}

#[test]
fn test_exhausted_deck_errors() {
    let mut deck = Deck::new();
    for _ in 0..DECK_SIZE {
        deck.draw().unwrap();
    }
    assert_eq!(deck.remaining(), 0);
    assert_eq!(deck.draw(), Err(GameError::EmptyDeck));
}

#[test]
fn test_oversubscribed_deal_rejects_without_drawing() {
    let mut deck = Deck::new();
    // 27 two-card hands need 54 cards; the deck must stay untouched.
    let result = deck.deal_hands(27, 2);
    assert_eq!(
        result,
        Err(GameError::InsufficientCards {
            requested: 54,
            remaining: 52,
        })
    );
    assert_eq!(deck.remaining(), DECK_SIZE);
}

#[test]
fn test_deal_hands_consumes_exactly_what_it_deals() {
    let mut deck = Deck::new();
    let hands = deck.deal_hands(6, 2).unwrap();

    assert_eq!(hands.len(), 6);
    assert!(hands.iter().all(|hand| hand.len() == 2));
    assert_eq!(deck.remaining(), DECK_SIZE - 12);

    let unique: HashSet<Card> = hands.iter().flatten().copied().collect();
    assert_eq!(unique.len(), 12, "dealt cards must not repeat");
}

#[test]
fn test_reset_restores_the_full_deck() {
    let mut deck = Deck::new();
    deck.deal_hands(10, 2).unwrap();
    assert_eq!(deck.remaining(), DECK_SIZE - 20);

    deck.reset();
    assert_eq!(deck.remaining(), DECK_SIZE);

    // A full redraw still covers all fifty-two cards.
    let mut seen: HashSet<Card> = HashSet::new();
    while deck.remaining() > 0 {
        seen.insert(deck.draw().unwrap());
    }
    assert_eq!(seen.len(), DECK_SIZE);
}
