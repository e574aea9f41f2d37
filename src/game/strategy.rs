use serde::{Deserialize, Serialize};

use super::cards::{create_deck, Card};
use super::evaluator::{evaluate, HandRank};
use super::payout::base_multiplier;
use crate::shared::AppError;

/// Number of hold patterns over 5 positions.
const HOLD_MASK_COUNT: u8 = 32;

/// One ranked hold recommendation. Ephemeral, serialized straight to the
/// client and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldStrategy {
    /// 5-bit hold mask, LSB = position 0.
    pub hold_mask: u8,
    pub held_indices: Vec<usize>,
    pub held_cards: Vec<String>,
    pub expected_value: f64,
    pub most_likely_outcome: String,
    pub explanation: String,
}

/// Iterative k-combination enumerator over `0..n`. Yields index sets in
/// lexicographic order without recursion, so stack and memory stay bounded
/// for the worst case draw of 5 from 47.
pub struct Combinations {
    n: usize,
    k: usize,
    indices: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            indices: (0..k).collect(),
            started: false,
            exhausted: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        // Advance the rightmost index that can still move, then reset
        // everything to its right.
        let mut i = self.k;
        loop {
            if i == 0 {
                self.exhausted = true;
                return None;
            }
            i -= 1;
            if self.indices[i] < self.n - self.k + i {
                self.indices[i] += 1;
                for j in (i + 1)..self.k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return Some(self.indices.clone());
            }
        }
    }
}

/// Exact outcome distribution for one hold mask.
struct MaskOutcome {
    expected_value: f64,
    combination_count: u64,
    rank_counts: [u64; 10],
}

/// Enumerates every completion of `mask` over the pool of 47 cards not in
/// the dealt hand, classifying each final hand. Total enumeration, so the
/// returned expectation is exact.
fn evaluate_hold_mask(cards: &[Card], mask: u8) -> Result<MaskOutcome, AppError> {
    let held_indices: Vec<usize> = (0..5).filter(|i| (mask >> i) & 1 == 1).collect();
    let draw_count = 5 - held_indices.len();

    // Discards are face-up spent cards, not redrawable: the candidate pool
    // is the deck minus the entire dealt hand.
    let pool: Vec<Card> = create_deck()
        .into_iter()
        .filter(|card| !cards.contains(card))
        .collect();

    let mut total_multiplier: u64 = 0;
    let mut combination_count: u64 = 0;
    let mut rank_counts = [0u64; 10];
    let mut candidate = [cards[0]; 5];

    for combo in Combinations::new(pool.len(), draw_count) {
        // Held cards keep their original positions; drawn cards fill the
        // gaps in index order.
        let mut drawn = combo.iter().map(|&pool_index| pool[pool_index]);
        for (position, slot) in candidate.iter_mut().enumerate() {
            if (mask >> position) & 1 == 1 {
                *slot = cards[position];
            } else {
                *slot = drawn.next().ok_or(AppError::Internal)?;
            }
        }

        let rank = evaluate(&candidate)?;
        total_multiplier += u64::from(base_multiplier(rank));
        rank_counts[rank as usize] += 1;
        combination_count += 1;
    }

    Ok(MaskOutcome {
        expected_value: total_multiplier as f64 / combination_count as f64,
        combination_count,
        rank_counts,
    })
}

/// The most frequent non-Nothing rank, falling back to the overall most
/// frequent when every completion busts.
fn most_likely_outcome(rank_counts: &[u64; 10]) -> HandRank {
    let best_winning = HandRank::ALL
        .iter()
        .filter(|&&rank| rank != HandRank::Nothing && rank_counts[rank as usize] > 0)
        .max_by_key(|&&rank| rank_counts[rank as usize]);

    match best_winning {
        Some(&rank) => rank,
        None => *HandRank::ALL
            .iter()
            .max_by_key(|&&rank| rank_counts[rank as usize])
            .unwrap_or(&HandRank::Nothing),
    }
}

fn is_consecutive_run(values: &mut Vec<u8>) -> bool {
    values.sort_unstable();
    values.dedup();
    values.len() == 4 && values.windows(2).all(|pair| pair[1] == pair[0] + 1)
}

fn explain(cards: &[Card], held_indices: &[usize]) -> String {
    let held: Vec<Card> = held_indices.iter().map(|&i| cards[i]).collect();

    match held.len() {
        0 => "Discard everything and draw five fresh cards".to_string(),
        5 => "Keep your current made hand".to_string(),
        2 if held[0].rank == held[1].rank => {
            if held[0].rank.is_jacks_or_better() {
                "Hold the high pair - it already guarantees a winning hand and can improve to three or four of a kind".to_string()
            } else {
                "Hold the low pair for a shot at three or four of a kind".to_string()
            }
        }
        4 => {
            let unpaired = !held
                .iter()
                .any(|a| held.iter().filter(|b| b.rank == a.rank).count() > 1);
            let mut values: Vec<u8> = held.iter().map(|card| card.rank.value()).collect();

            if held.iter().all(|card| card.suit == held[0].suit) {
                "Four to a flush - draw one card to complete it".to_string()
            } else if held.iter().all(|card| card.rank.is_jacks_or_better()) && unpaired {
                // Four unpaired high cards are always J-Q-K-A; pairing any
                // of them pays, which beats the straight-draw framing.
                "Hold the high cards - any pairing of them pays".to_string()
            } else if is_consecutive_run(&mut values) {
                "Four to a straight - draw one card to complete it".to_string()
            } else {
                "Draw 1 for the best chance of improvement".to_string()
            }
        }
        held_count => format!(
            "Draw {} for the best chance of improvement",
            5 - held_count
        ),
    }
}

/// Exhaustively evaluates all 32 hold patterns for a dealt hand and returns
/// the top 3 by exact expected value, ties keeping mask order.
pub fn analyze_hand(cards: &[Card]) -> Result<Vec<HoldStrategy>, AppError> {
    if cards.len() != 5 {
        return Err(AppError::InputSize(format!(
            "Expected 5 cards, got {}",
            cards.len()
        )));
    }

    let mut strategies = Vec::with_capacity(HOLD_MASK_COUNT as usize);
    for mask in 0..HOLD_MASK_COUNT {
        let outcome = evaluate_hold_mask(cards, mask)?;
        let held_indices: Vec<usize> = (0..5).filter(|i| (mask >> i) & 1 == 1).collect();
        let held_cards: Vec<String> = held_indices.iter().map(|&i| cards[i].code()).collect();
        let explanation = explain(cards, &held_indices);

        strategies.push(HoldStrategy {
            hold_mask: mask,
            held_indices,
            held_cards,
            expected_value: outcome.expected_value,
            most_likely_outcome: most_likely_outcome(&outcome.rank_counts).to_string(),
            explanation,
        });
    }

    // sort_by is stable: equal EVs preserve mask enumeration order.
    strategies.sort_by(|a, b| {
        b.expected_value
            .partial_cmp(&a.expected_value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    strategies.truncate(3);
    Ok(strategies)
}
