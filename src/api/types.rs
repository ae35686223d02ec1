use serde::{Deserialize, Serialize};

use crate::classifier::MevStatus;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

#[derive(Serialize, Debug)]
pub struct BlockRewardResponse {
    pub status: MevStatus,
    /// Total reward in GWEI
    pub reward: u64,
}

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub status: &'static str,
}
