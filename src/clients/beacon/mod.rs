use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

#[cfg(test)]
use mockall::automock;

use crate::{
    clients::common::{parse_decimal, ClientError, ClientResult},
    json_get,
};

use self::types::{
    sync_committee_period_start_slot, BeaconBlock, BlockHeaderResponse, BlockId, BlockResponse,
    SyncCommittee, SyncCommitteeResponse, Validator, ValidatorResponse,
};

pub mod types;

#[derive(Debug, Clone)]
pub struct BeaconClient {
    base_url: Url,
    client: Client,
}

pub struct Config {
    pub base_url: String,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommonBeaconClient: Send + Sync + Debug {
    async fn get_current_slot(&self) -> ClientResult<u64>;
    async fn get_block(&self, block_id: BlockId) -> ClientResult<BeaconBlock>;
    async fn get_validator(&self, index: u64) -> ClientResult<Validator>;
    async fn get_sync_committee(&self, slot: u64) -> ClientResult<SyncCommittee>;
}

impl BeaconClient {
    pub fn try_with_client(client: Client, config: Config) -> ClientResult<Self> {
        let base_url = Url::parse(&format!(
            "{}/eth/",
            config.base_url.trim_end_matches('/')
        ))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Option<T>> {
        let url = self.base_url.join(path)?;

        json_get!(&self.client, url, T)
    }
}

#[async_trait]
impl CommonBeaconClient for BeaconClient {
    async fn get_current_slot(&self) -> ClientResult<u64> {
        let path = format!("v1/beacon/headers/{}", BlockId::Head);
        let response = self
            .fetch::<BlockHeaderResponse>(&path)
            .await?
            .ok_or_else(|| ClientError::NotFound("head block header".into()))?;

        parse_decimal("slot", &response.data.header.message.slot)
    }

    async fn get_block(&self, block_id: BlockId) -> ClientResult<BeaconBlock> {
        let path = format!("v2/beacon/blocks/{block_id}");
        let message = self
            .fetch::<BlockResponse>(&path)
            .await?
            .ok_or_else(|| ClientError::NotFound(format!("beacon block {block_id}")))?
            .data
            .message;

        Ok(BeaconBlock {
            slot: parse_decimal("slot", &message.slot)?,
            proposer_index: parse_decimal("proposer_index", &message.proposer_index)?,
            execution_payload: message.body.execution_payload,
        })
    }

    async fn get_validator(&self, index: u64) -> ClientResult<Validator> {
        let path = format!("v1/beacon/states/{}/validators/{index}", BlockId::Head);

        self.fetch::<ValidatorResponse>(&path)
            .await?
            .map(|res| res.data.validator)
            .ok_or_else(|| ClientError::NotFound(format!("validator {index}")))
    }

    async fn get_sync_committee(&self, slot: u64) -> ClientResult<SyncCommittee> {
        let state_id = BlockId::Slot(sync_committee_period_start_slot(slot));
        let path = format!("v1/beacon/states/{state_id}/sync_committees");

        self.fetch::<SyncCommitteeResponse>(&path)
            .await?
            .map(|res| res.data)
            .ok_or_else(|| ClientError::NotFound(format!("sync committee for state {state_id}")))
    }
}
