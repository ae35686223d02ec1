use std::{fmt::Display, str::FromStr, time::Duration};

use envy::Error::MissingValue;
use serde::Deserialize;
use tracing::warn;

use crate::args::Args;

/// Placeholder endpoint for local runs. Real deployments must set `ETH_RPC_URL`.
pub const DEFAULT_ETH_RPC_URL: &str = "http://localhost:8545";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SHUTDOWN_GRACE_PERIOD_SECS: u64 = 5;

/// Raw process environment. Numeric settings are kept as text so a bad value can fall
/// back to its default instead of aborting startup.
#[derive(Deserialize, Debug)]
pub struct Environment {
    pub port: Option<String>,
    #[serde(default = "default_eth_rpc_url")]
    pub eth_rpc_url: String,
    pub request_timeout: Option<String>,
    pub shutdown_grace_period: Option<String>,
    pub sentry_dsn: Option<String>,
}

fn default_eth_rpc_url() -> String {
    DEFAULT_ETH_RPC_URL.into()
}

impl Environment {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env::<Environment>().and_then(Self::validate)
    }

    fn validate(self) -> Result<Self, envy::Error> {
        if self.eth_rpc_url.is_empty() {
            return Err(MissingValue("ETH_RPC_URL"));
        }

        Ok(self)
    }
}

/// Effective service configuration: environment, overridden by command line arguments.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub rpc_url: String,
    pub request_timeout: Duration,
    pub shutdown_grace_period: Duration,
}

impl Settings {
    pub fn resolve(env: &Environment, args: &Args) -> Self {
        let port = args
            .port
            .unwrap_or_else(|| parse_or_default("PORT", env.port.as_deref(), DEFAULT_PORT));
        let rpc_url = args
            .rpc_url
            .clone()
            .unwrap_or_else(|| env.eth_rpc_url.clone());

        if rpc_url == DEFAULT_ETH_RPC_URL {
            warn!(
                rpc_url = DEFAULT_ETH_RPC_URL,
                "ETH_RPC_URL not set, using placeholder endpoint"
            );
        }

        let request_timeout = parse_or_default(
            "REQUEST_TIMEOUT",
            env.request_timeout.as_deref(),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        );
        let shutdown_grace_period = parse_or_default(
            "SHUTDOWN_GRACE_PERIOD",
            env.shutdown_grace_period.as_deref(),
            DEFAULT_SHUTDOWN_GRACE_PERIOD_SECS,
        );

        Self {
            port,
            rpc_url,
            request_timeout: Duration::from_secs(request_timeout),
            shutdown_grace_period: Duration::from_secs(shutdown_grace_period),
        }
    }
}

fn parse_or_default<T>(key: &str, value: Option<&str>, default: T) -> T
where
    T: FromStr + Display + Copy,
{
    match value.map(str::trim) {
        None | Some("") => default,
        Some(value) => value.parse().unwrap_or_else(|_| {
            warn!(
                key,
                value,
                %default,
                "Invalid value for environment variable, using default"
            );

            default
        }),
    }
}
