// Public API
pub use cards::{create_deck, parse_hand, Card, Rank, Suit};
pub use evaluator::{evaluate, winning_positions, HandRank};
pub use strategy::{analyze_hand, HoldStrategy};

// Internal modules
pub mod cards;
pub mod evaluator;
pub mod payout;
pub mod strategy;
