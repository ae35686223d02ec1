use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::context::Context;

pub mod error;
pub mod handlers;
pub mod types;

pub fn router(context: Context) -> Router {
    Router::new()
        .route("/blockreward/:slot", get(handlers::get_block_reward))
        .route("/syncduties/:slot", get(handlers::get_sync_duties))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(context)
}

#[cfg(test)]
mod tests {
    use alloy::eips::BlockNumberOrTag;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use mockall::predicate::eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::clients::{
        beacon::{
            types::{BeaconBlock, BlockId, ExecutionPayload, SyncCommittee, Validator},
            MockCommonBeaconClient,
        },
        common::ClientError,
        execution::{
            types::{ExecutionBlock, Transaction},
            MockCommonExecutionClient,
        },
    };

    use super::*;

    const FEE_RECIPIENT: &str = "0x95222290DD7278Aa3Ddd389Cc1E1d165CC4BAfe5";
    const PROPOSER_CREDENTIALS: &str =
        "0x01000000000000000000000095222290dd7278aa3ddd389cc1e1d165cc4bafe5";
    const BUILDER_CREDENTIALS: &str =
        "0x010000000000000000000000388c818ca8b9251b393131c08a736a67ccb19297";

    async fn get(
        beacon: MockCommonBeaconClient,
        execution: MockCommonExecutionClient,
        uri: &str,
    ) -> (StatusCode, Value) {
        let context = Context::from_clients(Box::new(beacon), Box::new(execution));
        let response = router(context)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    fn beacon_with_head(current_slot: u64) -> MockCommonBeaconClient {
        let mut beacon = MockCommonBeaconClient::new();
        beacon
            .expect_get_current_slot()
            .returning(move || Ok(current_slot));

        beacon
    }

    fn beacon_block(slot: u64) -> BeaconBlock {
        BeaconBlock {
            slot,
            proposer_index: 1234,
            execution_payload: Some(ExecutionPayload {
                fee_recipient: FEE_RECIPIENT.into(),
                block_number: "19426589".into(),
            }),
        }
    }

    fn execution_block() -> ExecutionBlock {
        ExecutionBlock {
            number: "0x1286d1d".into(),
            hash: "0xabc".into(),
            base_fee_per_gas: Some("0x3b9aca00".into()),
            gas_used: "0x5208".into(),
            miner: Some(FEE_RECIPIENT.to_lowercase()),
            transactions: vec![Transaction {
                hash: "0x01".into(),
                gas_price: Some("0x77359400".into()),
                gas: "0x5208".into(),
                ..Default::default()
            }],
        }
    }

    fn execution_with_block(block: Option<ExecutionBlock>) -> MockCommonExecutionClient {
        let mut execution = MockCommonExecutionClient::new();
        execution
            .expect_get_block()
            .with(eq(BlockNumberOrTag::Number(19_426_589)))
            .returning(move |_| Ok(block.clone()));

        execution
    }

    fn reward_beacon(credentials: &'static str) -> MockCommonBeaconClient {
        reward_beacon_at_head(100, credentials)
    }

    fn reward_beacon_at_head(head: u64, credentials: &'static str) -> MockCommonBeaconClient {
        let mut beacon = beacon_with_head(head);
        beacon
            .expect_get_block()
            .with(eq(BlockId::Slot(90)))
            .returning(|_| Ok(beacon_block(90)));
        beacon
            .expect_get_validator()
            .with(eq(1234))
            .returning(move |_| {
                Ok(Validator {
                    withdrawal_credentials: credentials.into(),
                })
            });

        beacon
    }

    #[tokio::test]
    async fn block_reward_vanilla() {
        let (status, body) = get(
            reward_beacon(PROPOSER_CREDENTIALS),
            execution_with_block(Some(execution_block())),
            "/blockreward/90",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "VANILLA", "reward": 42000}));
    }

    #[tokio::test]
    async fn block_reward_mev() {
        let (status, body) = get(
            reward_beacon(BUILDER_CREDENTIALS),
            execution_with_block(Some(execution_block())),
            "/blockreward/90",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "MEV", "reward": 42000}));
    }

    #[tokio::test]
    async fn block_reward_invalid_slot() {
        let (status, body) = get(
            MockCommonBeaconClient::new(),
            MockCommonExecutionClient::new(),
            "/blockreward/invalid",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid slot number", "code": 400}));
    }

    #[tokio::test]
    async fn block_reward_undecodable_slot() {
        let (status, body) = get(
            MockCommonBeaconClient::new(),
            MockCommonExecutionClient::new(),
            "/blockreward/%FF",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid slot number", "code": 400}));
    }

    #[tokio::test]
    async fn block_reward_at_current_slot() {
        let (status, body) = get(
            reward_beacon_at_head(90, PROPOSER_CREDENTIALS),
            execution_with_block(Some(execution_block())),
            "/blockreward/90",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "VANILLA", "reward": 42000}));
    }

    #[tokio::test]
    async fn block_reward_future_slot() {
        let (status, body) = get(
            beacon_with_head(100),
            MockCommonExecutionClient::new(),
            "/blockreward/101",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Slot is in the future", "code": 400}));
    }

    #[tokio::test]
    async fn block_reward_current_slot_unavailable() {
        let mut beacon = MockCommonBeaconClient::new();
        beacon
            .expect_get_current_slot()
            .returning(|| Err(ClientError::Transport("connection refused".into())));

        let (status, body) = get(beacon, MockCommonExecutionClient::new(), "/blockreward/1").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Failed to get current slot", "code": 500})
        );
    }

    #[tokio::test]
    async fn block_reward_missing_beacon_block() {
        let mut beacon = beacon_with_head(100);
        beacon
            .expect_get_block()
            .returning(|block_id| Err(ClientError::NotFound(format!("beacon block {block_id}"))));

        let (status, body) = get(beacon, MockCommonExecutionClient::new(), "/blockreward/90").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Block not found for slot", "code": 404}));
    }

    #[tokio::test]
    async fn block_reward_beacon_failure() {
        let mut beacon = beacon_with_head(100);
        beacon
            .expect_get_block()
            .returning(|_| Err(ClientError::Timeout(std::time::Duration::from_secs(30))));

        let (status, body) = get(beacon, MockCommonExecutionClient::new(), "/blockreward/90").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Failed to get beacon block", "code": 500})
        );
    }

    #[tokio::test]
    async fn block_reward_missing_execution_block() {
        let mut beacon = beacon_with_head(100);
        beacon
            .expect_get_block()
            .returning(|_| Ok(beacon_block(90)));

        let (status, body) = get(beacon, execution_with_block(None), "/blockreward/90").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"error": "Execution block not found", "code": 404})
        );
    }

    #[tokio::test]
    async fn block_reward_pre_merge_block() {
        let mut beacon = beacon_with_head(100);
        beacon.expect_get_block().returning(|_| {
            Ok(BeaconBlock {
                slot: 90,
                proposer_index: 1234,
                execution_payload: None,
            })
        });

        let (status, _) = get(beacon, MockCommonExecutionClient::new(), "/blockreward/90").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn block_reward_rpc_error() {
        let mut beacon = beacon_with_head(100);
        beacon
            .expect_get_block()
            .returning(|_| Ok(beacon_block(90)));
        let mut execution = MockCommonExecutionClient::new();
        execution.expect_get_block().returning(|_| {
            Err(ClientError::Rpc {
                code: -32000,
                message: "internal error".into(),
            })
        });

        let (status, body) = get(beacon, execution, "/blockreward/90").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Failed to get execution block", "code": 500})
        );
    }

    #[tokio::test]
    async fn block_reward_validator_failure() {
        let mut beacon = beacon_with_head(100);
        beacon
            .expect_get_block()
            .returning(|_| Ok(beacon_block(90)));
        beacon
            .expect_get_validator()
            .returning(|index| Err(ClientError::NotFound(format!("validator {index}"))));

        let (status, body) = get(
            beacon,
            execution_with_block(Some(execution_block())),
            "/blockreward/90",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Failed to get validator data", "code": 500})
        );
    }

    #[tokio::test]
    async fn block_reward_malformed_fee_fields() {
        let mut block = execution_block();
        block.base_fee_per_gas = None;

        let (status, body) = get(
            reward_beacon(PROPOSER_CREDENTIALS),
            execution_with_block(Some(block)),
            "/blockreward/90",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Failed to calculate block reward", "code": 500})
        );
    }

    #[tokio::test]
    async fn sync_duties_normalizes_committee() {
        let mut beacon = beacon_with_head(100);
        beacon
            .expect_get_sync_committee()
            .with(eq(120))
            .returning(|_| {
                Ok(SyncCommittee {
                    validators: vec!["0xaa".into(), "bb".into()],
                })
            });

        let (status, body) = get(beacon, MockCommonExecutionClient::new(), "/syncduties/120").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["0xaa", "0xbb"]));
    }

    #[tokio::test]
    async fn sync_duties_one_epoch_ahead() {
        let mut beacon = beacon_with_head(100);
        beacon
            .expect_get_sync_committee()
            .with(eq(132))
            .returning(|_| {
                Ok(SyncCommittee {
                    validators: vec!["0xaa".into()],
                })
            });

        let (status, body) = get(beacon, MockCommonExecutionClient::new(), "/syncduties/132").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["0xaa"]));
    }

    #[tokio::test]
    async fn sync_duties_undecodable_slot() {
        let (status, body) = get(
            MockCommonBeaconClient::new(),
            MockCommonExecutionClient::new(),
            "/syncduties/%C3%28",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid slot number", "code": 400}));
    }

    #[tokio::test]
    async fn sync_duties_too_far_in_future() {
        let (status, body) = get(
            beacon_with_head(100),
            MockCommonExecutionClient::new(),
            "/syncduties/133",
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "Slot is too far in the future", "code": 400})
        );
    }

    #[tokio::test]
    async fn sync_duties_fallback_when_committee_not_found() {
        let mut beacon = beacon_with_head(100);
        beacon
            .expect_get_sync_committee()
            .returning(|_| Err(ClientError::NotFound("sync committee".into())));

        let (status, body) = get(beacon, MockCommonExecutionClient::new(), "/syncduties/50").await;
        let pubkeys = body.as_array().unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(pubkeys.len(), 3);
        assert!(pubkeys
            .iter()
            .all(|pubkey| pubkey.as_str().unwrap().starts_with("0x")));
    }

    #[tokio::test]
    async fn sync_duties_upstream_failure() {
        let mut beacon = beacon_with_head(100);
        beacon
            .expect_get_sync_committee()
            .returning(|_| Err(ClientError::Transport("connection reset".into())));

        let (status, body) = get(beacon, MockCommonExecutionClient::new(), "/syncduties/50").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Failed to get sync committee data", "code": 500})
        );
    }

    #[tokio::test]
    async fn health() {
        let (status, body) = get(
            MockCommonBeaconClient::new(),
            MockCommonExecutionClient::new(),
            "/health",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }
}
