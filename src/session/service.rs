use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::repository::SessionRepository;
use super::types::{DealResponse, DrawResponse, Evaluation};
use crate::fairness::{self, shuffle::shuffle_seeded};
use crate::game::cards::create_deck;
use crate::game::evaluator::{evaluate, winning_positions};
use crate::game::payout::{multiplier, MAX_BET, MIN_BET};
use crate::session::models::HandSession;
use crate::shared::AppError;

/// Business logic for the deal→draw round trip.
pub struct SessionService {
    repository: Arc<dyn SessionRepository + Send + Sync>,
}

impl SessionService {
    pub fn new(repository: Arc<dyn SessionRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Deal transition: commit to a seed, shuffle, custody the deck and hand
    /// the client only the first five cards plus the commitment hash.
    #[instrument(skip(self))]
    pub async fn deal(&self, bet: u32, balance: i64) -> Result<DealResponse, AppError> {
        if !(MIN_BET..=MAX_BET).contains(&bet) {
            return Err(AppError::Validation(format!(
                "Bet must be between {} and {}",
                MIN_BET, MAX_BET
            )));
        }
        if balance < i64::from(bet) {
            return Err(AppError::Validation(
                "Insufficient balance for bet".to_string(),
            ));
        }

        let seed = fairness::generate_seed();
        let nonce = fairness::generate_nonce();
        let commitment = fairness::commit(&seed, nonce);
        let shuffle_key = fairness::combine(&seed, nonce);

        let mut deck = create_deck();
        shuffle_seeded(&mut deck, &shuffle_key);

        let session = HandSession::new(deck, bet, seed, nonce);
        let hand_id = session.id.clone();
        let hand: Vec<String> = session.dealt.iter().map(|card| card.code()).collect();
        self.repository.create_session(&session).await?;

        info!(hand_id = %hand_id, bet, "Hand dealt");

        Ok(DealResponse {
            hand_id,
            hand,
            balance: balance - i64::from(bet),
            seed_commitment: commitment,
        })
    }

    /// Draw transition: atomically complete the session, rebuild the final
    /// hand from the cached deck, pay out and reveal the seed.
    #[instrument(skip(self))]
    pub async fn draw(
        &self,
        hand_id: &str,
        held: &[bool],
        balance: i64,
    ) -> Result<DrawResponse, AppError> {
        if hand_id.is_empty() {
            return Err(AppError::Validation("Missing hand id".to_string()));
        }
        if held.len() != 5 {
            return Err(AppError::Validation(format!(
                "Hold selection must have 5 entries, got {}",
                held.len()
            )));
        }

        let draw_count = held.iter().filter(|&&hold| !hold).count();
        let outcome = self
            .repository
            .complete_session(hand_id, draw_count)
            .await?;

        // Held positions keep their dealt card; unheld positions consume
        // the next deck card in the order fixed at deal time.
        let mut drawn = outcome.drawn.iter();
        let mut final_hand = Vec::with_capacity(5);
        for (position, &hold) in held.iter().enumerate() {
            if hold {
                final_hand.push(outcome.session.dealt[position]);
            } else {
                final_hand.push(*drawn.next().ok_or(AppError::Internal)?);
            }
        }

        let rank = evaluate(&final_hand)?;
        let bet = outcome.session.bet;
        let rank_multiplier = multiplier(rank, bet);
        let payout = rank_multiplier * bet;
        let winning_indices = winning_positions(&final_hand, rank);

        info!(
            hand_id = %hand_id,
            rank = %rank,
            payout,
            "Hand completed"
        );

        // The reveal travels in this response; the record has nothing left
        // to serve.
        if let Err(e) = self.repository.delete_session(hand_id).await {
            warn!(hand_id = %hand_id, error = %e, "Failed to delete completed session");
        }

        Ok(DrawResponse {
            hand: final_hand.iter().map(|card| card.code()).collect(),
            evaluation: Evaluation {
                rank: rank.to_string(),
                multiplier: rank_multiplier,
                payout,
                winning_indices,
            },
            balance: balance + i64::from(payout),
            seed: outcome.session.seed,
            nonce: outcome.session.nonce,
        })
    }
}
