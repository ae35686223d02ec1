use std::{fmt::Debug, time::Duration};

use alloy::{
    eips::BlockNumberOrTag,
    providers::{Provider, RootProvider},
    transports::{RpcError, TransportError},
};
use async_trait::async_trait;
use url::Url;

#[cfg(test)]
use mockall::automock;

use crate::clients::common::{ClientError, ClientResult};

use self::types::ExecutionBlock;

pub mod types;

#[derive(Debug, Clone)]
pub struct ExecutionClient {
    provider: RootProvider,
    timeout: Duration,
}

pub struct Config {
    pub rpc_url: String,
    pub timeout: Duration,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommonExecutionClient: Send + Sync + Debug {
    /// Fetches a block with full transaction objects. `None` means the node doesn't know it.
    async fn get_block(&self, block: BlockNumberOrTag) -> ClientResult<Option<ExecutionBlock>>;
}

impl ExecutionClient {
    pub fn try_new(config: Config) -> ClientResult<Self> {
        let url = Url::parse(&config.rpc_url)?;

        Ok(Self {
            provider: RootProvider::new_http(url),
            timeout: config.timeout,
        })
    }
}

#[async_trait]
impl CommonExecutionClient for ExecutionClient {
    async fn get_block(&self, block: BlockNumberOrTag) -> ClientResult<Option<ExecutionBlock>> {
        tracing::debug!(
            method = "eth_getBlockByNumber",
            block = %block,
            "Dispatching JSON-RPC request"
        );

        let request = self.provider.raw_request::<_, Option<ExecutionBlock>>(
            "eth_getBlockByNumber".into(),
            (block, true),
        );

        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result.map_err(ClientError::from),
            Err(_) => Err(ClientError::Timeout(self.timeout)),
        }
    }
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        match err {
            RpcError::ErrorResp(payload) => ClientError::Rpc {
                code: payload.code,
                message: payload.message.to_string(),
            },
            RpcError::DeserError { err, text } => {
                tracing::warn!(
                    method = "eth_getBlockByNumber",
                    response = text.as_str(),
                    "Unexpected response from server"
                );

                ClientError::Decode(err)
            }
            other => ClientError::Transport(other.to_string()),
        }
    }
}
