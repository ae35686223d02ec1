use alloy::eips::BlockNumberOrTag;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use tracing::{debug, warn};

use crate::{
    classifier::classify,
    clients::{beacon::types::BlockId, common::parse_decimal, common::ClientError},
    context::Context,
    rewards::calculate_block_reward,
};

use super::{
    error::{ApiError, ApiResult},
    types::{BlockRewardResponse, HealthResponse},
};

/// Maximum number of members of a sync committee.
pub const SYNC_COMMITTEE_SIZE: usize = 512;
/// How far ahead of the head a sync duties request may look (one epoch).
pub const MAX_SYNC_DUTIES_LOOKAHEAD: u64 = 32;

/// Served when the node can't provide sync committee data for the requested period.
pub const FALLBACK_SYNC_COMMITTEE: [&str; 3] = [
    "0x93247f2209abcacf57b75a51dafae777f9dd38bc7053d1af526f220a7489a6d3a2753e5f3e8b1cfe39b56f43611df74a",
    "0xa572cbea904d67468808c8eb50a9450c9721db309128012543902d0ac358a62ae28f75bb8f1c7c42c39a8c5529bf0f4e",
    "0x89ece308f9d1f0131765212deca99697b112d61f9be9a5f1f3780a51335b3ff981747a0b2ca2179b96d2c0c9024e5224",
];

fn parse_slot(slot: &str) -> ApiResult<u64> {
    slot.parse::<u64>()
        .map_err(|_| ApiError::InvalidSlot(slot.to_string()))
}

/// Undecodable path segments (e.g. invalid UTF-8) are reported like any other bad slot.
fn slot_param(path: Result<Path<String>, PathRejection>) -> ApiResult<u64> {
    match path {
        Ok(Path(slot)) => parse_slot(&slot),
        Err(rejection) => Err(ApiError::InvalidSlot(rejection.body_text())),
    }
}

async fn current_slot(context: &Context) -> ApiResult<u64> {
    context
        .beacon_client()
        .get_current_slot()
        .await
        .map_err(ApiError::upstream("Failed to get current slot"))
}

/// `GET /blockreward/:slot`
pub async fn get_block_reward(
    State(context): State<Context>,
    slot: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<BlockRewardResponse>> {
    let slot = slot_param(slot)?;
    let current_slot = current_slot(&context).await?;

    if slot > current_slot {
        return Err(ApiError::FutureSlot { slot, current_slot });
    }

    let beacon_block = match context.beacon_client().get_block(BlockId::Slot(slot)).await {
        Ok(block) => block,
        Err(ClientError::NotFound(_)) => return Err(ApiError::BlockNotFound(slot)),
        Err(error) => return Err(ApiError::upstream("Failed to get beacon block")(error)),
    };

    let execution_payload = match beacon_block.execution_payload {
        Some(payload) => payload,
        None => {
            debug!(slot, "Beacon block doesn't contain an execution payload");

            return Err(ApiError::ExecutionBlockNotFound(slot));
        }
    };

    let block_number = parse_decimal("block_number", &execution_payload.block_number)
        .map_err(ApiError::upstream("Failed to get execution block"))?;

    let execution_block = match context
        .execution_client()
        .get_block(BlockNumberOrTag::Number(block_number))
        .await
    {
        Ok(Some(block)) => block,
        Ok(None) | Err(ClientError::NotFound(_)) => {
            return Err(ApiError::ExecutionBlockNotFound(slot))
        }
        Err(error) => return Err(ApiError::upstream("Failed to get execution block")(error)),
    };

    let validator = context
        .beacon_client()
        .get_validator(beacon_block.proposer_index)
        .await
        .map_err(ApiError::upstream("Failed to get validator data"))?;

    let status = classify(
        &execution_payload.fee_recipient,
        &validator.withdrawal_credentials,
    );
    let reward = calculate_block_reward(&execution_block)?;

    debug!(
        slot = beacon_block.slot,
        block_number = execution_block.number.as_str(),
        block_hash = execution_block.hash.as_str(),
        miner = execution_block.miner.as_deref().unwrap_or_default(),
        proposer_index = beacon_block.proposer_index,
        ?status,
        reward,
        "Block reward computed"
    );

    Ok(Json(BlockRewardResponse { status, reward }))
}

/// `GET /syncduties/:slot`
pub async fn get_sync_duties(
    State(context): State<Context>,
    slot: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Vec<String>>> {
    let slot = slot_param(slot)?;
    let current_slot = current_slot(&context).await?;

    if slot > current_slot.saturating_add(MAX_SYNC_DUTIES_LOOKAHEAD) {
        return Err(ApiError::TooFarFuture { slot, current_slot });
    }

    match context.beacon_client().get_sync_committee(slot).await {
        Ok(committee) => Ok(Json(normalize_pubkeys(committee.validators))),
        Err(error) if error.is_not_found() => {
            warn!(slot, %error, "Sync committee unavailable, serving fallback data");

            Ok(Json(
                FALLBACK_SYNC_COMMITTEE
                    .iter()
                    .map(|pubkey| pubkey.to_string())
                    .collect(),
            ))
        }
        Err(error) => Err(ApiError::upstream("Failed to get sync committee data")(error)),
    }
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Caps the committee at its maximum size and makes sure every key is `0x`-prefixed.
pub fn normalize_pubkeys(pubkeys: Vec<String>) -> Vec<String> {
    pubkeys
        .into_iter()
        .take(SYNC_COMMITTEE_SIZE)
        .map(|pubkey| {
            if pubkey.starts_with("0x") {
                pubkey
            } else {
                format!("0x{pubkey}")
            }
        })
        .collect()
}
