use clap::Parser;

/// HTTP API serving Ethereum block rewards and sync committee duties.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Port to listen on. Overrides `PORT`
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Node endpoint serving both the execution JSON-RPC and the beacon REST API. Overrides `ETH_RPC_URL`
    #[arg(short, long)]
    pub rpc_url: Option<String>,
}
