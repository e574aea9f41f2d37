use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::shared::AppError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, EnumIter,
)]
pub enum Suit {
    Spades = 0,
    Hearts = 1,
    Diamonds = 2,
    Clubs = 3,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Suit::Spades => "S",
                Suit::Hearts => "H",
                Suit::Diamonds => "D",
                Suit::Clubs => "C",
            }
        )
    }
}

impl TryFrom<&str> for Suit {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "S" => Ok(Suit::Spades),
            "H" => Ok(Suit::Hearts),
            "D" => Ok(Suit::Diamonds),
            "C" => Ok(Suit::Clubs),
            _ => Err(s.to_string()),
        }
    }
}

/// Poker rank order: deuce low, ace high. The discriminant is the numeric
/// rank value used by the straight check.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, EnumIter,
)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Jacks, queens, kings and aces qualify for the minimum payout pair.
    pub fn is_jacks_or_better(&self) -> bool {
        self.value() >= Rank::Jack.value()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Rank::Two => "2",
                Rank::Three => "3",
                Rank::Four => "4",
                Rank::Five => "5",
                Rank::Six => "6",
                Rank::Seven => "7",
                Rank::Eight => "8",
                Rank::Nine => "9",
                Rank::Ten => "10",
                Rank::Jack => "J",
                Rank::Queen => "Q",
                Rank::King => "K",
                Rank::Ace => "A",
            }
        )
    }
}

impl TryFrom<&str> for Rank {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "2" => Ok(Rank::Two),
            "3" => Ok(Rank::Three),
            "4" => Ok(Rank::Four),
            "5" => Ok(Rank::Five),
            "6" => Ok(Rank::Six),
            "7" => Ok(Rank::Seven),
            "8" => Ok(Rank::Eight),
            "9" => Ok(Rank::Nine),
            "10" => Ok(Rank::Ten),
            "J" => Ok(Rank::Jack),
            "Q" => Ok(Rank::Queen),
            "K" => Ok(Rank::King),
            "A" => Ok(Rank::Ace),
            _ => Err(s.to_string()),
        }
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value().cmp(&other.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Parses a wire code such as "AS" or "10H": rank symbol followed by one
    /// suit character. Ten is the only two-character rank, so codes are 2 or
    /// 3 characters long.
    pub fn from_code(s: &str) -> Result<Self, AppError> {
        if s.len() < 2 || s.len() > 3 {
            return Err(AppError::Validation(format!("Invalid card code: {}", s)));
        }

        let (rank_str, suit_str) = s.split_at(s.len() - 1);
        let rank = Rank::try_from(rank_str)
            .map_err(|_| AppError::Validation(format!("Invalid card code: {}", s)))?;
        let suit = Suit::try_from(suit_str)
            .map_err(|_| AppError::Validation(format!("Invalid card code: {}", s)))?;

        Ok(Self::new(rank, suit))
    }

    pub fn code(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Builds the ordered 52-card deck: suit-major, deuce to ace within each suit.
pub fn create_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for suit in Suit::iter() {
        for rank in Rank::iter() {
            cards.push(Card::new(rank, suit));
        }
    }
    cards
}

/// Parses the 5 wire codes of a client-supplied hand.
pub fn parse_hand(codes: &[String]) -> Result<Vec<Card>, AppError> {
    if codes.len() != 5 {
        return Err(AppError::InputSize(format!(
            "Expected 5 cards, got {}",
            codes.len()
        )));
    }
    codes.iter().map(|code| Card::from_code(code)).collect()
}
