// Library crate for the Jacks or Better game server
// This file exposes the public API for integration tests

pub mod fairness;
pub mod game;
pub mod session;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use game::{analyze_hand, evaluate, winning_positions, Card, HandRank, HoldStrategy};
pub use session::{InMemorySessionRepository, SessionRepository, SessionService};
pub use shared::{AppError, AppState};
