use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, error, instrument, warn};

use super::models::HandSession;
use crate::game::cards::Card;
use crate::shared::AppError;

/// Result of the atomic draw transition: the completed session snapshot
/// and the cards consumed from the deck cursor.
#[derive(Debug, Clone)]
pub struct DrawOutcome {
    pub session: HandSession,
    pub drawn: Vec<Card>,
}

/// Storage port for hand sessions. Implementations must make
/// `complete_session` an exclusive check-and-set: validation of the
/// not-completed/not-expired state and the completion write happen as one
/// atomic step, so two concurrent draws on the same handle can never both
/// succeed.
#[async_trait]
pub trait SessionRepository {
    async fn create_session(&self, session: &HandSession) -> Result<(), AppError>;
    async fn get_session(&self, hand_id: &str) -> Result<Option<HandSession>, AppError>;
    /// Atomically validates the session, consumes `draw_count` cards at the
    /// cursor and marks the session completed.
    async fn complete_session(
        &self,
        hand_id: &str,
        draw_count: usize,
    ) -> Result<DrawOutcome, AppError>;
    async fn delete_session(&self, hand_id: &str) -> Result<(), AppError>;
    async fn cleanup_expired_sessions(&self) -> Result<u64, AppError>;
}

/// In-memory implementation of SessionRepository.
///
/// A single `Mutex` over the session map gives the draw path its exclusive
/// check-and-set for free. Data is lost on restart, which is acceptable for
/// sessions with a one-hour lifetime; a TTL-capable external store can
/// replace this behind the same trait.
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<String, HandSession>>,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the current number of sessions in the repository
    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    #[instrument(skip(self, session))]
    async fn create_session(&self, session: &HandSession) -> Result<(), AppError> {
        debug!(hand_id = %session.id, bet = session.bet, "Creating hand session");

        let mut sessions = self.sessions.lock().unwrap();
        if sessions.contains_key(&session.id) {
            warn!(hand_id = %session.id, "Hand session id collision");
            return Err(AppError::Internal);
        }
        sessions.insert(session.id.clone(), session.clone());

        debug!(hand_id = %session.id, "Hand session created");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_session(&self, hand_id: &str) -> Result<Option<HandSession>, AppError> {
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions.get(hand_id).cloned())
    }

    #[instrument(skip(self))]
    async fn complete_session(
        &self,
        hand_id: &str,
        draw_count: usize,
    ) -> Result<DrawOutcome, AppError> {
        debug!(hand_id = %hand_id, draw_count, "Completing hand session");

        // Everything from validation to the completion write happens under
        // this one guard; a rejected draw leaves the record untouched.
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .get_mut(hand_id)
            .ok_or(AppError::SessionNotFound)?;

        if session.is_expired() {
            warn!(hand_id = %hand_id, "Draw against expired session");
            return Err(AppError::SessionExpired);
        }
        if session.completed {
            warn!(hand_id = %hand_id, "Draw against completed session (replay)");
            return Err(AppError::SessionCompleted);
        }
        if session.cursor + draw_count > session.deck.len() {
            // 5 dealt + at most 47 drawable makes this unreachable.
            error!(
                hand_id = %hand_id,
                cursor = session.cursor,
                draw_count,
                "Deck cursor would overflow"
            );
            return Err(AppError::DeckExhausted);
        }

        let drawn = session.deck[session.cursor..session.cursor + draw_count].to_vec();
        session.cursor += draw_count;
        session.completed = true;

        debug!(hand_id = %hand_id, cursor = session.cursor, "Hand session completed");
        Ok(DrawOutcome {
            session: session.clone(),
            drawn,
        })
    }

    #[instrument(skip(self))]
    async fn delete_session(&self, hand_id: &str) -> Result<(), AppError> {
        debug!(hand_id = %hand_id, "Deleting hand session");

        let mut sessions = self.sessions.lock().unwrap();
        if sessions.remove(hand_id).is_none() {
            warn!(hand_id = %hand_id, "Hand session not found for deletion");
            return Err(AppError::SessionNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn cleanup_expired_sessions(&self) -> Result<u64, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        let initial_count = sessions.len();

        sessions.retain(|_, session| !session.is_expired());

        let removed_count = initial_count - sessions.len();
        if removed_count > 0 {
            debug!(
                expired_sessions_removed = removed_count,
                "Expired hand sessions swept"
            );
        }
        Ok(removed_count as u64)
    }
}
