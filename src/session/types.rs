use serde::{Deserialize, Serialize};

use crate::game::strategy::HoldStrategy;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealRequest {
    pub bet: u32,
    pub balance: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealResponse {
    pub hand_id: String,
    pub hand: Vec<String>,
    pub balance: i64,
    /// Hex SHA-256 of the shuffle key, sent before any hold decision exists.
    pub seed_commitment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawRequest {
    pub hand_id: String,
    pub held: Vec<bool>,
    pub balance: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub rank: String,
    pub multiplier: u32,
    pub payout: u32,
    pub winning_indices: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawResponse {
    pub hand: Vec<String>,
    pub evaluation: Evaluation,
    pub balance: i64,
    /// Revealed for post-hand audit against the deal's commitment.
    pub seed: String,
    pub nonce: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyRequest {
    pub hand: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResponse {
    pub strategies: Vec<HoldStrategy>,
}
