//! Seven-card hand evaluation.
//!
//! [`rank`] reduces 2 hole cards plus the 5-card board to a
//! [`HandStrength`] descriptor with a total order, so showdown is a
//! plain max over the contenders. Three detectors run over the
//! rank-sorted cards: a single-pass run-length scan for paired
//! patterns, a straight scan with ace-low wheel seeding, and a
//! re-scan within the (at most one) suit holding five or more cards
//! for flushes, straight flushes, and royals. The strongest category
//! among the three wins.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::constants::EVAL_HAND_SIZE;
use super::entities::{Card, MAX_RANK, MIN_RANK, Rank, Suit};
use super::errors::GameError;

/// The ten hand classes, weakest to strongest.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[repr(u8)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "high card",
            Self::OnePair => "one pair",
            Self::TwoPair => "two pair",
            Self::ThreeOfAKind => "three of a kind",
            Self::Straight => "straight",
            Self::Flush => "flush",
            Self::FullHouse => "full house",
            Self::FourOfAKind => "four of a kind",
            Self::StraightFlush => "straight flush",
            Self::RoyalFlush => "royal flush",
        };
        write!(f, "{repr}")
    }
}

/// A comparable hand strength.
///
/// Ordering is lexicographic over (category, value, tiebreaker); the
/// derived `Ord` does exactly that given the field order. Equal on all
/// three means tied hands and a split pot.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct HandStrength {
    pub category: HandCategory,
    /// The category's primary rank: the pair/trip/quad rank, the
    /// straight's high card, or the best rank for high card/flush.
    pub value: Rank,
    /// Category-specific residue: the top single for pairs/trips/quads,
    /// `lower_pair * 14 + kicker` for two pair, the pair rank for a
    /// full house, 0 elsewhere.
    pub tiebreaker: u16,
}

impl HandStrength {
    const fn new(category: HandCategory, value: Rank, tiebreaker: u16) -> Self {
        Self {
            category,
            value,
            tiebreaker,
        }
    }
}

impl fmt::Display for HandStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} high)", self.category, self.value)
    }
}

/// Rank exactly 7 distinct cards into a comparable strength.
///
/// Anything other than 7 distinct, in-range cards is a caller bug and
/// comes back as [`GameError::MalformedHand`].
pub fn rank(cards: &[Card]) -> Result<HandStrength, GameError> {
    validate(cards)?;
    let mut sorted = cards.to_vec();
    sorted.sort_by_key(Card::rank);

    let mut best = match_scan(&sorted);
    if let Some(straight) = straight_scan(&sorted)
        && straight.category > best.category
    {
        best = straight;
    }
    if let Some(suited) = suited_scan(&sorted)
        && suited.category > best.category
    {
        best = suited;
    }
    Ok(best)
}

/// Indices of the maximal strengths (ties all win).
pub fn winners(strengths: &[HandStrength]) -> Vec<usize> {
    let Some(best) = strengths.iter().max() else {
        return Vec::new();
    };
    strengths
        .iter()
        .enumerate()
        .filter(|(_, strength)| *strength == best)
        .map(|(i, _)| i)
        .collect()
}

fn validate(cards: &[Card]) -> Result<(), GameError> {
    if cards.len() != EVAL_HAND_SIZE {
        return Err(GameError::MalformedHand {
            reason: format!("expected {EVAL_HAND_SIZE} cards, got {}", cards.len()),
        });
    }
    let mut seen = HashSet::with_capacity(EVAL_HAND_SIZE);
    for card in cards {
        if !(MIN_RANK..=MAX_RANK).contains(&card.rank()) {
            return Err(GameError::MalformedHand {
                reason: format!("rank {} out of range", card.rank()),
            });
        }
        if !seen.insert(*card) {
            return Err(GameError::MalformedHand {
                reason: format!("duplicate card {}", card.to_string().trim()),
            });
        }
    }
    Ok(())
}

/// One ascending pass over rank run-lengths, tracking the paired
/// pattern as it grows.
///
/// `value`/`second` hold the pattern's primary/secondary ranks and
/// `high` the best single seen. The quirks are deliberate and
/// order-sensitive: a third pair bumps the best two up and lets the
/// discarded pair compete as the kicker, a pair landing on quads is
/// ignored entirely, and two trips promote to a full house with the
/// higher trip on top.
fn match_scan(sorted: &[Card]) -> HandStrength {
    use HandCategory::*;

    let mut category = HighCard;
    let mut value: Rank = 0;
    let mut second: Rank = 0;
    let mut high: Rank = 0;

    let mut i = 0;
    while i < sorted.len() {
        let rank = sorted[i].rank();
        let mut count = 1;
        while i + count < sorted.len() && sorted[i + count].rank() == rank {
            count += 1;
        }
        i += count;

        match count {
            1 => high = rank,
            2 => match category {
                HighCard | OnePair => {
                    category = if category == HighCard { OnePair } else { TwoPair };
                    second = value;
                    value = rank;
                }
                TwoPair => {
                    // Third pair: keep the top two, and the pair being
                    // discarded may still outrank the best single.
                    if second > high {
                        high = second;
                    }
                    second = value;
                    value = rank;
                }
                ThreeOfAKind | FullHouse => {
                    category = FullHouse;
                    second = rank;
                }
                _ => {}
            },
            3 => match category {
                FourOfAKind => {}
                _ if value != 0 => {
                    category = FullHouse;
                    second = value;
                    value = rank;
                }
                _ => {
                    category = ThreeOfAKind;
                    second = value;
                    value = rank;
                }
            },
            // Four suits cap a run at 4.
            _ => {
                category = FourOfAKind;
                second = value;
                value = rank;
            }
        }
    }

    match category {
        HighCard => HandStrength::new(category, high, 0),
        TwoPair => HandStrength::new(category, value, u16::from(second) * 14 + u16::from(high)),
        FullHouse => HandStrength::new(category, value, u16::from(second)),
        _ => HandStrength::new(category, value, u16::from(high)),
    }
}

/// Find the highest 5-run over ascending ranks, duplicates skipped.
/// An ace at the top seeds the run at a virtual rank 1 so the wheel
/// (A-2-3-4-5) counts.
fn straight_scan(sorted: &[Card]) -> Option<HandStrength> {
    let mut best: Rank = 0;
    let mut run = 0usize;
    let mut prev: Rank = 0;
    if sorted.last()?.rank() == MAX_RANK {
        run = 1;
        prev = 1;
    }
    for card in sorted {
        let rank = card.rank();
        if rank == prev {
            // same rank, run unaffected
        } else if rank == prev + 1 {
            run += 1;
        } else {
            run = 1;
        }
        if run >= 5 {
            best = rank;
        }
        prev = rank;
    }
    (best > 0).then(|| HandStrength::new(HandCategory::Straight, best, 0))
}

/// Flush-family detector: within the suit holding 5+ cards (at most
/// one can), a straight to the ace is a royal, any other straight a
/// straight flush, and otherwise it's a plain flush.
fn suited_scan(sorted: &[Card]) -> Option<HandStrength> {
    for suit in Suit::ALL {
        let suited: Vec<Card> = sorted
            .iter()
            .copied()
            .filter(|card| card.suit() == suit)
            .collect();
        if suited.len() < 5 {
            continue;
        }
        let strength = match straight_scan(&suited) {
            Some(straight) if straight.value == MAX_RANK => {
                HandStrength::new(HandCategory::RoyalFlush, MAX_RANK, 0)
            }
            Some(straight) => {
                HandStrength::new(HandCategory::StraightFlush, straight.value, 0)
            }
            None => {
                let top = suited.last().map_or(0, |card| card.rank());
                HandStrength::new(HandCategory::Flush, top, 0)
            }
        };
        return Some(strength);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Suit::{Club, Diamond, Heart, Spade};

    fn strength_of(cards: [Card; 7]) -> HandStrength {
        rank(&cards).unwrap()
    }

    #[test]
    fn straight_flush_low_run() {
        let strength = strength_of([
            Card(2, Club),
            Card(3, Club),
            Card(4, Club),
            Card(5, Club),
            Card(6, Club),
            Card(10, Diamond),
            Card(13, Spade),
        ]);
        assert_eq!(
            strength,
            HandStrength::new(HandCategory::StraightFlush, 6, 0)
        );
    }

    #[test]
    fn quads_take_the_top_single_as_kicker() {
        let strength = strength_of([
            Card(2, Club),
            Card(2, Diamond),
            Card(2, Heart),
            Card(2, Spade),
            Card(5, Club),
            Card(5, Diamond),
            Card(6, Heart),
        ]);
        assert_eq!(strength, HandStrength::new(HandCategory::FourOfAKind, 2, 6));
    }

    #[test]
    fn quads_over_trips_have_no_single_kicker() {
        let strength = strength_of([
            Card(2, Club),
            Card(2, Diamond),
            Card(2, Heart),
            Card(2, Spade),
            Card(9, Club),
            Card(9, Diamond),
            Card(9, Heart),
        ]);
        assert_eq!(strength, HandStrength::new(HandCategory::FourOfAKind, 2, 0));
    }

    #[test]
    fn royal_flush() {
        let strength = strength_of([
            Card(14, Spade),
            Card(13, Spade),
            Card(12, Spade),
            Card(11, Spade),
            Card(10, Spade),
            Card(2, Heart),
            Card(3, Diamond),
        ]);
        assert_eq!(strength, HandStrength::new(HandCategory::RoyalFlush, 14, 0));
    }

    #[test]
    fn wheel_counts_ace_low() {
        let strength = strength_of([
            Card(14, Spade),
            Card(2, Diamond),
            Card(3, Club),
            Card(4, Heart),
            Card(5, Spade),
            Card(9, Diamond),
            Card(11, Club),
        ]);
        assert_eq!(strength, HandStrength::new(HandCategory::Straight, 5, 0));
    }

    #[test]
    fn broadway_beats_the_wheel() {
        let broadway = strength_of([
            Card(10, Spade),
            Card(11, Diamond),
            Card(12, Club),
            Card(13, Heart),
            Card(14, Spade),
            Card(2, Diamond),
            Card(7, Club),
        ]);
        let wheel = strength_of([
            Card(14, Club),
            Card(2, Spade),
            Card(3, Diamond),
            Card(4, Club),
            Card(5, Heart),
            Card(9, Spade),
            Card(11, Heart),
        ]);
        assert_eq!(broadway.category, HandCategory::Straight);
        assert_eq!(broadway.value, 14);
        assert!(broadway > wheel);
    }

    #[test]
    fn high_card_takes_the_top_rank() {
        let strength = strength_of([
            Card(2, Club),
            Card(4, Diamond),
            Card(6, Heart),
            Card(8, Spade),
            Card(10, Club),
            Card(12, Diamond),
            Card(14, Heart),
        ]);
        assert_eq!(strength, HandStrength::new(HandCategory::HighCard, 14, 0));
    }

    #[test]
    fn one_pair_kicker_is_the_best_single() {
        let strength = strength_of([
            Card(3, Club),
            Card(3, Diamond),
            Card(14, Spade),
            Card(13, Diamond),
            Card(9, Heart),
            Card(7, Club),
            Card(5, Spade),
        ]);
        assert_eq!(strength, HandStrength::new(HandCategory::OnePair, 3, 14));
    }

    #[test]
    fn two_pair_encodes_lower_pair_and_kicker() {
        let strength = strength_of([
            Card(12, Club),
            Card(12, Diamond),
            Card(5, Heart),
            Card(5, Spade),
            Card(13, Club),
            Card(9, Diamond),
            Card(2, Heart),
        ]);
        // lower pair 5, kicker K: 5 * 14 + 13
        assert_eq!(strength, HandStrength::new(HandCategory::TwoPair, 12, 83));
    }

    #[test]
    fn three_pairs_keep_the_top_two() {
        let strength = strength_of([
            Card(7, Spade),
            Card(7, Diamond),
            Card(5, Club),
            Card(5, Heart),
            Card(3, Diamond),
            Card(3, Club),
            Card(13, Spade),
        ]);
        // pairs 7 and 5 survive; the king outkicks the discarded 3s
        assert_eq!(strength, HandStrength::new(HandCategory::TwoPair, 7, 83));
    }

    #[test]
    fn a_discarded_pair_can_be_the_kicker() {
        let strength = strength_of([
            Card(2, Spade),
            Card(3, Club),
            Card(3, Diamond),
            Card(5, Heart),
            Card(5, Spade),
            Card(7, Diamond),
            Card(7, Club),
        ]);
        // pairs 7 and 5 survive; the discarded pair of 3s outranks the 2
        assert_eq!(strength, HandStrength::new(HandCategory::TwoPair, 7, 73));
    }

    #[test]
    fn trips_with_a_single_kicker() {
        let strength = strength_of([
            Card(8, Club),
            Card(8, Diamond),
            Card(8, Heart),
            Card(14, Spade),
            Card(12, Club),
            Card(9, Diamond),
            Card(4, Heart),
        ]);
        assert_eq!(
            strength,
            HandStrength::new(HandCategory::ThreeOfAKind, 8, 14)
        );
    }

    #[test]
    fn trips_plus_pair_promote_to_full_house() {
        let strength = strength_of([
            Card(9, Club),
            Card(9, Diamond),
            Card(9, Heart),
            Card(4, Spade),
            Card(4, Diamond),
            Card(14, Club),
            Card(13, Heart),
        ]);
        assert_eq!(strength, HandStrength::new(HandCategory::FullHouse, 9, 4));
    }

    #[test]
    fn pair_then_trips_also_promote() {
        let strength = strength_of([
            Card(4, Spade),
            Card(4, Diamond),
            Card(8, Club),
            Card(8, Diamond),
            Card(8, Heart),
            Card(11, Club),
            Card(2, Spade),
        ]);
        assert_eq!(strength, HandStrength::new(HandCategory::FullHouse, 8, 4));
    }

    #[test]
    fn two_trips_promote_with_the_higher_on_top() {
        let strength = strength_of([
            Card(3, Club),
            Card(3, Diamond),
            Card(3, Heart),
            Card(7, Spade),
            Card(7, Diamond),
            Card(7, Club),
            Card(13, Spade),
        ]);
        assert_eq!(strength, HandStrength::new(HandCategory::FullHouse, 7, 3));
    }

    #[test]
    fn flush_beats_a_mixed_suit_straight() {
        let strength = strength_of([
            Card(2, Heart),
            Card(4, Heart),
            Card(6, Heart),
            Card(8, Heart),
            Card(10, Heart),
            Card(7, Spade),
            Card(9, Diamond),
        ]);
        assert_eq!(strength, HandStrength::new(HandCategory::Flush, 10, 0));
    }

    #[test]
    fn steel_wheel_is_a_straight_flush_not_a_royal() {
        let strength = strength_of([
            Card(14, Club),
            Card(2, Club),
            Card(3, Club),
            Card(4, Club),
            Card(5, Club),
            Card(9, Heart),
            Card(13, Diamond),
        ]);
        assert_eq!(
            strength,
            HandStrength::new(HandCategory::StraightFlush, 5, 0)
        );
    }

    #[test]
    fn category_ladder_orders_concrete_hands() {
        let hands = [
            strength_of([
                Card(2, Club),
                Card(4, Diamond),
                Card(6, Heart),
                Card(8, Spade),
                Card(10, Club),
                Card(12, Diamond),
                Card(14, Heart),
            ]),
            strength_of([
                Card(2, Club),
                Card(2, Diamond),
                Card(6, Heart),
                Card(8, Spade),
                Card(10, Club),
                Card(12, Diamond),
                Card(14, Heart),
            ]),
            strength_of([
                Card(2, Club),
                Card(2, Diamond),
                Card(8, Heart),
                Card(8, Spade),
                Card(10, Club),
                Card(12, Diamond),
                Card(14, Heart),
            ]),
            strength_of([
                Card(2, Club),
                Card(2, Diamond),
                Card(2, Heart),
                Card(8, Spade),
                Card(10, Club),
                Card(12, Diamond),
                Card(14, Heart),
            ]),
            strength_of([
                Card(2, Club),
                Card(3, Diamond),
                Card(4, Heart),
                Card(5, Spade),
                Card(6, Club),
                Card(12, Diamond),
                Card(14, Heart),
            ]),
            strength_of([
                Card(2, Club),
                Card(5, Club),
                Card(8, Club),
                Card(11, Club),
                Card(13, Club),
                Card(12, Diamond),
                Card(14, Heart),
            ]),
            strength_of([
                Card(2, Club),
                Card(2, Diamond),
                Card(2, Heart),
                Card(8, Spade),
                Card(8, Club),
                Card(12, Diamond),
                Card(14, Heart),
            ]),
            strength_of([
                Card(2, Club),
                Card(2, Diamond),
                Card(2, Heart),
                Card(2, Spade),
                Card(10, Club),
                Card(12, Diamond),
                Card(14, Heart),
            ]),
            strength_of([
                Card(2, Club),
                Card(3, Club),
                Card(4, Club),
                Card(5, Club),
                Card(6, Club),
                Card(12, Diamond),
                Card(14, Heart),
            ]),
            strength_of([
                Card(10, Club),
                Card(11, Club),
                Card(12, Club),
                Card(13, Club),
                Card(14, Club),
                Card(2, Diamond),
                Card(3, Heart),
            ]),
        ];
        for pair in hands.windows(2) {
            assert!(
                pair[0] < pair[1],
                "expected {} < {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn winners_returns_every_tied_index() {
        let a = HandStrength::new(HandCategory::TwoPair, 10, 50);
        let b = HandStrength::new(HandCategory::TwoPair, 10, 50);
        let c = HandStrength::new(HandCategory::OnePair, 14, 13);
        assert_eq!(winners(&[a, c, b]), vec![0, 2]);
        assert_eq!(winners(&[c]), vec![0]);
        assert!(winners(&[]).is_empty());
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        let six = [
            Card(2, Club),
            Card(3, Club),
            Card(4, Club),
            Card(5, Club),
            Card(6, Club),
            Card(7, Club),
        ];
        assert!(matches!(
            rank(&six),
            Err(GameError::MalformedHand { .. })
        ));

        let duplicated = [
            Card(2, Club),
            Card(2, Club),
            Card(4, Club),
            Card(5, Club),
            Card(6, Club),
            Card(7, Club),
            Card(8, Club),
        ];
        assert!(matches!(
            rank(&duplicated),
            Err(GameError::MalformedHand { .. })
        ));

        let out_of_range = [
            Card(1, Club),
            Card(3, Club),
            Card(4, Club),
            Card(5, Club),
            Card(6, Club),
            Card(7, Club),
            Card(8, Club),
        ];
        assert!(matches!(
            rank(&out_of_range),
            Err(GameError::MalformedHand { .. })
        ));
    }
}
