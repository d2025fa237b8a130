//! `simulate-website <path> [--host H] [--port N] [--verbose] [--dump]`

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sitesim::config::Config;
use sitesim::{Error, Server, Simulator};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("# {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), Error> {
    let simulator = Simulator::load(&config.path).await?;

    if config.dump {
        let dump = serde_json::to_string_pretty(simulator.rules()).map_err(Error::Dump)?;
        println!("{dump}");
    }

    let router = simulator.router()?;
    Server::bind(config.addr()).serve(router).await
}
