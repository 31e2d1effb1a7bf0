//! Hand Ranking Example
//!
//! Demonstrates evaluating seven-card hands and picking winners.

use holdem_table::eval;
use holdem_table::{Card, Suit};

fn fmt_cards(cards: &[Card]) -> String {
    cards.iter().map(Card::to_string).collect::<Vec<_>>().join(" ")
}

fn main() {
    println!("=== Hand Ranking Example ===\n");

    // Example 1: Evaluate a single seven-card hand
    println!("Example 1: Evaluating a 7-card hand");
    let hand = vec![
        Card(14, Suit::Heart), // Ace of Hearts
        Card(13, Suit::Heart), // King of Hearts
        Card(12, Suit::Heart), // Queen of Hearts
        Card(11, Suit::Heart), // Jack of Hearts
        Card(10, Suit::Heart), // Ten of Hearts
        Card(9, Suit::Spade),  // Nine of Spades
        Card(2, Suit::Club),   // Two of Clubs
    ];

    let strength = eval::rank(&hand).unwrap();
    println!("Hand: {}", fmt_cards(&hand));
    println!("Strength: {strength}\n");

    // Example 2: Two players sharing a board
    println!("Example 2: Comparing two hands on the same board");
    let board = [
        Card(13, Suit::Spade),
        Card(9, Suit::Heart),
        Card(5, Suit::Diamond),
        Card(4, Suit::Club),
        Card(11, Suit::Heart),
    ];
    let alice_hole = [Card(14, Suit::Spade), Card(14, Suit::Diamond)];
    let bob_hole = [Card(13, Suit::Diamond), Card(12, Suit::Club)];

    let alice: Vec<Card> = alice_hole.iter().chain(&board).copied().collect();
    let bob: Vec<Card> = bob_hole.iter().chain(&board).copied().collect();

    let alice_strength = eval::rank(&alice).unwrap();
    let bob_strength = eval::rank(&bob).unwrap();
    println!("Board: {}", fmt_cards(&board));
    println!("Alice holds {}: {alice_strength}", fmt_cards(&alice_hole));
    println!("Bob holds   {}: {bob_strength}", fmt_cards(&bob_hole));

    match eval::winners(&[alice_strength, bob_strength]).as_slice() {
        [0] => println!("Winner: Alice\n"),
        [1] => println!("Winner: Bob\n"),
        _ => println!("Tie!\n"),
    }

    // Example 3: When the board plays, everyone splits
    println!("Example 3: A board so strong it plays for everyone");
    let big_board = [
        Card(14, Suit::Spade),
        Card(14, Suit::Diamond),
        Card(13, Suit::Spade),
        Card(13, Suit::Diamond),
        Card(12, Suit::Heart),
    ];
    let holes = [
        [Card(2, Suit::Club), Card(3, Suit::Diamond)],
        [Card(2, Suit::Heart), Card(3, Suit::Spade)],
        [Card(7, Suit::Club), Card(2, Suit::Spade)],
    ];

    let strengths: Vec<_> = holes
        .iter()
        .map(|hole| {
            let seven: Vec<Card> = hole.iter().chain(&big_board).copied().collect();
            eval::rank(&seven).unwrap()
        })
        .collect();
    println!("Board: {}", fmt_cards(&big_board));
    for (i, strength) in strengths.iter().enumerate() {
        println!("Player {} holds {}: {strength}", i + 1, fmt_cards(&holes[i]));
    }
    let winners = eval::winners(&strengths);
    println!(
        "Winner(s): players {:?}\n",
        winners.iter().map(|&i| i + 1).collect::<Vec<_>>()
    );

    // Example 4: One of each hand class
    println!("Example 4: The ladder, weakest to strongest");
    let ladder = vec![
        ("High Card", vec![
            Card(14, Suit::Spade),
            Card(12, Suit::Heart),
            Card(10, Suit::Diamond),
            Card(7, Suit::Club),
            Card(3, Suit::Spade),
            Card(2, Suit::Heart),
            Card(5, Suit::Diamond),
        ]),
        ("One Pair", vec![
            Card(9, Suit::Spade),
            Card(9, Suit::Heart),
            Card(13, Suit::Diamond),
            Card(7, Suit::Club),
            Card(4, Suit::Spade),
            Card(2, Suit::Heart),
            Card(3, Suit::Diamond),
        ]),
        ("Two Pair", vec![
            Card(12, Suit::Spade),
            Card(12, Suit::Heart),
            Card(5, Suit::Diamond),
            Card(5, Suit::Club),
            Card(2, Suit::Spade),
            Card(3, Suit::Heart),
            Card(7, Suit::Diamond),
        ]),
        ("Three of a Kind", vec![
            Card(7, Suit::Spade),
            Card(7, Suit::Heart),
            Card(7, Suit::Diamond),
            Card(12, Suit::Club),
            Card(3, Suit::Spade),
            Card(2, Suit::Heart),
            Card(9, Suit::Diamond),
        ]),
        ("Straight", vec![
            Card(10, Suit::Spade),
            Card(9, Suit::Heart),
            Card(8, Suit::Diamond),
            Card(7, Suit::Club),
            Card(6, Suit::Spade),
            Card(2, Suit::Heart),
            Card(3, Suit::Club),
        ]),
        ("Flush", vec![
            Card(13, Suit::Club),
            Card(11, Suit::Club),
            Card(8, Suit::Club),
            Card(5, Suit::Club),
            Card(3, Suit::Club),
            Card(2, Suit::Heart),
            Card(4, Suit::Diamond),
        ]),
        ("Full House", vec![
            Card(10, Suit::Spade),
            Card(10, Suit::Heart),
            Card(10, Suit::Diamond),
            Card(6, Suit::Club),
            Card(6, Suit::Spade),
            Card(2, Suit::Heart),
            Card(4, Suit::Diamond),
        ]),
        ("Four of a Kind", vec![
            Card(8, Suit::Spade),
            Card(8, Suit::Heart),
            Card(8, Suit::Diamond),
            Card(8, Suit::Club),
            Card(2, Suit::Spade),
            Card(3, Suit::Heart),
            Card(5, Suit::Diamond),
        ]),
        ("Straight Flush", vec![
            Card(9, Suit::Heart),
            Card(8, Suit::Heart),
            Card(7, Suit::Heart),
            Card(6, Suit::Heart),
            Card(5, Suit::Heart),
            Card(2, Suit::Club),
            Card(13, Suit::Diamond),
        ]),
        ("Royal Flush", vec![
            Card(14, Suit::Spade),
            Card(13, Suit::Spade),
            Card(12, Suit::Spade),
            Card(11, Suit::Spade),
            Card(10, Suit::Spade),
            Card(2, Suit::Heart),
            Card(3, Suit::Diamond),
        ]),
    ];

    for (name, cards) in ladder {
        let strength = eval::rank(&cards).unwrap();
        println!("{name}: {strength}");
    }

    println!("\n=== End of Hand Ranking Example ===");
}
