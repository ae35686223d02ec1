use std::fmt;

use serde::Deserialize;

/// Slots per epoch on mainnet.
pub const SLOTS_PER_EPOCH: u64 = 32;
/// Epochs per sync committee period on mainnet.
pub const EPOCHS_PER_SYNC_COMMITTEE_PERIOD: u64 = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockId {
    Head,
    Slot(u64),
}

#[derive(Deserialize, Debug, Clone)]
pub struct ExecutionPayload {
    pub fee_recipient: String,
    pub block_number: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockBody {
    pub execution_payload: Option<ExecutionPayload>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockMessage {
    pub slot: String,
    pub proposer_index: String,
    pub body: BlockBody,
}

#[derive(Deserialize, Debug)]
pub struct Block {
    pub message: BlockMessage,
}

#[derive(Deserialize, Debug)]
pub struct BlockResponse {
    pub data: Block,
}

#[derive(Deserialize, Debug)]
pub struct BlockHeaderMessage {
    pub slot: String,
}

#[derive(Deserialize, Debug)]
pub struct InnerBlockHeader {
    pub message: BlockHeaderMessage,
}

#[derive(Deserialize, Debug)]
pub struct BlockHeaderData {
    pub header: InnerBlockHeader,
}

#[derive(Deserialize, Debug)]
pub struct BlockHeaderResponse {
    pub data: BlockHeaderData,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Validator {
    pub withdrawal_credentials: String,
}

#[derive(Deserialize, Debug)]
pub struct ValidatorData {
    pub validator: Validator,
}

#[derive(Deserialize, Debug)]
pub struct ValidatorResponse {
    pub data: ValidatorData,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct SyncCommittee {
    pub validators: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct SyncCommitteeResponse {
    pub data: SyncCommittee,
}

/// Beacon block proposed at a slot, as used for reward classification.
#[derive(Debug, Clone)]
pub struct BeaconBlock {
    pub slot: u64,
    pub proposer_index: u64,
    pub execution_payload: Option<ExecutionPayload>,
}

/// First slot of the sync committee period containing `slot`.
pub fn sync_committee_period_start_slot(slot: u64) -> u64 {
    let epoch = slot / SLOTS_PER_EPOCH;
    let period = epoch / EPOCHS_PER_SYNC_COMMITTEE_PERIOD;

    period * EPOCHS_PER_SYNC_COMMITTEE_PERIOD * SLOTS_PER_EPOCH
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockId::Head => write!(f, "head"),
            BlockId::Slot(slot) => write!(f, "{}", slot),
        }
    }
}
