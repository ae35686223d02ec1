use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;

use args::Args;
use context::{Config as ContextConfig, Context};
use env::{Environment, Settings};
use utils::{
    banner::print_banner,
    telemetry::{get_subscriber, init_subscriber},
};

mod api;
mod args;
mod classifier;
mod clients;
mod context;
mod env;
mod rewards;
mod server;
mod utils;

async fn run() -> Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    let env = Environment::from_env().context("Failed to read environment")?;

    let _guard = env.sentry_dsn.clone().map(|sentry_dsn| {
        sentry::init((
            sentry_dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let subscriber = get_subscriber("info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    let settings = Settings::resolve(&env, &args);

    print_banner(&settings, env.sentry_dsn.is_some());

    let context = Context::try_new(ContextConfig::from(&settings))
        .context("Failed to create upstream clients")?;

    server::run(
        context,
        server::Config {
            port: settings.port,
            shutdown_grace_period: settings.shutdown_grace_period,
        },
    )
    .await?;

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
