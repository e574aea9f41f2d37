use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::cards::Card;

/// How long a dealt hand stays drawable.
pub const SESSION_TTL_SECONDS: i64 = 60 * 60;

/// Authoritative server-side record for one deal→draw round. The client
/// only ever sees the first five cards and the commitment hash; the full
/// shuffled deck and the seed stay here until the draw reveals them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandSession {
    pub id: String, // UUID v4 as string, the client's hand handle
    pub deck: Vec<Card>,
    pub dealt: [Card; 5],
    /// Index of the next undealt card. Starts at 5 (the dealt hand is
    /// already spent), only ever increases, never exceeds 52.
    pub cursor: usize,
    pub bet: u32,
    pub seed: String,
    pub nonce: u32,
    pub created_at: DateTime<Utc>,
    pub completed: bool,
}

impl HandSession {
    pub fn new(deck: Vec<Card>, bet: u32, seed: String, nonce: u32) -> Self {
        let dealt = [deck[0], deck[1], deck[2], deck[3], deck[4]];
        Self {
            id: Uuid::new_v4().to_string(),
            deck,
            dealt,
            cursor: 5,
            bet,
            seed,
            nonce,
            created_at: Utc::now(),
            completed: false,
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.created_at + Duration::seconds(SESSION_TTL_SECONDS)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at()
    }
}
