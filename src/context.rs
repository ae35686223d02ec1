use std::{sync::Arc, time::Duration};

use anyhow::Result as AnyhowResult;
use tracing::debug;

use crate::{
    clients::{
        beacon::{BeaconClient, CommonBeaconClient, Config as BeaconClientConfig},
        execution::{CommonExecutionClient, Config as ExecutionClientConfig, ExecutionClient},
    },
    env::Settings,
};

pub struct Config {
    pub rpc_url: String,
    pub request_timeout: Duration,
}

#[derive(Debug)]
struct ContextRef {
    pub beacon_client: Box<dyn CommonBeaconClient>,
    pub execution_client: Box<dyn CommonExecutionClient>,
}

/// Upstream clients shared by every request handler.
#[derive(Debug, Clone)]
pub struct Context {
    inner: Arc<ContextRef>,
}

impl Context {
    pub fn try_new(config: Config) -> AnyhowResult<Self> {
        let Config {
            rpc_url,
            request_timeout,
        } = config;

        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        let beacon_client = BeaconClient::try_with_client(
            client,
            BeaconClientConfig {
                base_url: rpc_url.clone(),
            },
        )?;
        let execution_client = ExecutionClient::try_new(ExecutionClientConfig {
            rpc_url,
            timeout: request_timeout,
        })?;

        debug!(
            beacon_api = %beacon_client.base_url(),
            timeout = ?request_timeout,
            "Upstream clients created"
        );

        Ok(Self::from_clients(
            Box::new(beacon_client),
            Box::new(execution_client),
        ))
    }

    pub fn from_clients(
        beacon_client: Box<dyn CommonBeaconClient>,
        execution_client: Box<dyn CommonExecutionClient>,
    ) -> Self {
        Self {
            inner: Arc::new(ContextRef {
                beacon_client,
                execution_client,
            }),
        }
    }

    pub fn beacon_client(&self) -> &dyn CommonBeaconClient {
        self.inner.beacon_client.as_ref()
    }

    pub fn execution_client(&self) -> &dyn CommonExecutionClient {
        self.inner.execution_client.as_ref()
    }
}

impl From<&Settings> for Config {
    fn from(settings: &Settings) -> Self {
        Self {
            rpc_url: settings.rpc_url.clone(),
            request_timeout: settings.request_timeout,
        }
    }
}
