use std::fmt;

use super::cards::{Card, Rank};
use crate::shared::AppError;

/// Hand classifications ordered weakest to strongest. Exactly one applies
/// to any 5-card hand.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum HandRank {
    Nothing = 0,
    JacksOrBetter = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandRank {
    pub const ALL: [HandRank; 10] = [
        HandRank::Nothing,
        HandRank::JacksOrBetter,
        HandRank::TwoPair,
        HandRank::ThreeOfAKind,
        HandRank::Straight,
        HandRank::Flush,
        HandRank::FullHouse,
        HandRank::FourOfAKind,
        HandRank::StraightFlush,
        HandRank::RoyalFlush,
    ];
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                HandRank::Nothing => "Nothing",
                HandRank::JacksOrBetter => "Jacks or Better",
                HandRank::TwoPair => "Two Pair",
                HandRank::ThreeOfAKind => "Three of a Kind",
                HandRank::Straight => "Straight",
                HandRank::Flush => "Flush",
                HandRank::FullHouse => "Full House",
                HandRank::FourOfAKind => "Four of a Kind",
                HandRank::StraightFlush => "Straight Flush",
                HandRank::RoyalFlush => "Royal Flush",
            }
        )
    }
}

/// Per-rank multiplicities indexed by numeric rank value (2..=14). A fixed
/// array keeps the strategy engine's enumeration loop allocation-free.
fn rank_counts(cards: &[Card]) -> [u8; 15] {
    let mut counts = [0u8; 15];
    for card in cards {
        counts[card.rank.value() as usize] += 1;
    }
    counts
}

fn is_flush(cards: &[Card]) -> bool {
    cards.iter().all(|card| card.suit == cards[0].suit)
}

/// Five distinct rank values forming a consecutive run, or the wheel
/// A-2-3-4-5 where the ace plays low.
fn is_straight(cards: &[Card]) -> bool {
    let mut values = [0u8; 5];
    for (slot, card) in values.iter_mut().zip(cards) {
        *slot = card.rank.value();
    }
    values.sort_unstable();
    if values.windows(2).any(|pair| pair[1] == pair[0]) {
        return false;
    }

    if values.windows(2).all(|pair| pair[1] == pair[0] + 1) {
        return true;
    }

    // Wheel: ace sorts high (14) so the consecutive check misses it.
    values == [2, 3, 4, 5, 14]
}

/// Classifies a 5-card hand. First matching tier in strength order wins.
pub fn evaluate(cards: &[Card]) -> Result<HandRank, AppError> {
    if cards.len() != 5 {
        return Err(AppError::InputSize(format!(
            "Expected 5 cards, got {}",
            cards.len()
        )));
    }

    let flush = is_flush(cards);
    let straight = is_straight(cards);

    if flush && straight {
        let has_ace = cards.iter().any(|card| card.rank == Rank::Ace);
        let has_king = cards.iter().any(|card| card.rank == Rank::King);
        if has_ace && has_king {
            return Ok(HandRank::RoyalFlush);
        }
        return Ok(HandRank::StraightFlush);
    }

    let counts = rank_counts(cards);
    let mut quads = false;
    let mut trips = false;
    let mut pairs = 0u8;
    let mut high_pair = false;
    for (value, &count) in counts.iter().enumerate() {
        match count {
            4 => quads = true,
            3 => trips = true,
            2 => {
                pairs += 1;
                if value >= Rank::Jack.value() as usize {
                    high_pair = true;
                }
            }
            _ => {}
        }
    }

    if quads {
        return Ok(HandRank::FourOfAKind);
    }
    if trips && pairs == 1 {
        return Ok(HandRank::FullHouse);
    }
    if flush {
        return Ok(HandRank::Flush);
    }
    if straight {
        return Ok(HandRank::Straight);
    }
    if trips {
        return Ok(HandRank::ThreeOfAKind);
    }
    if pairs == 2 {
        return Ok(HandRank::TwoPair);
    }
    if pairs == 1 && high_pair {
        return Ok(HandRank::JacksOrBetter);
    }

    Ok(HandRank::Nothing)
}

/// Positions that contributed to the made hand, for client highlighting.
/// Whole-hand ranks mark all five positions; matched-rank hands mark only
/// the positions holding the matching rank(s).
pub fn winning_positions(cards: &[Card], rank: HandRank) -> Vec<usize> {
    match rank {
        HandRank::RoyalFlush
        | HandRank::StraightFlush
        | HandRank::FullHouse
        | HandRank::Flush
        | HandRank::Straight => (0..cards.len()).collect(),
        HandRank::FourOfAKind => positions_with_count(cards, 4, false),
        HandRank::ThreeOfAKind => positions_with_count(cards, 3, false),
        HandRank::TwoPair => positions_with_count(cards, 2, false),
        HandRank::JacksOrBetter => positions_with_count(cards, 2, true),
        HandRank::Nothing => Vec::new(),
    }
}

fn positions_with_count(cards: &[Card], count: u8, high_only: bool) -> Vec<usize> {
    let counts = rank_counts(cards);
    cards
        .iter()
        .enumerate()
        .filter(|(_, card)| {
            counts[card.rank.value() as usize] == count
                && (!high_only || card.rank.is_jacks_or_better())
        })
        .map(|(index, _)| index)
        .collect()
}
