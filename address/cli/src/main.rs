mod cmd;
mod error;

use clap::Parser;
use fil_address::Network;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    filter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::cmd::Command;

/// Encode, decode and inspect Filecoin addresses.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Network used when rendering addresses, `f` (mainnet) or `t` (testnet).
    #[arg(long, global = true, env = "FIL_ADDRESS_NETWORK", default_value_t = Network::Main)]
    pub network: Network,
}

fn main() -> Result<(), anyhow::Error> {
    // Logger initialization.
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(LevelFilter::INFO.into())
                        .from_env()?,
                )
                .with_filter(filter::filter_fn(|metadata| {
                    if let Some(module_path) = metadata.module_path() {
                        module_path.starts_with("fil_address")
                    } else {
                        true
                    }
                })),
        )
        .init();

    let cli_arguments = Cli::parse();
    let output = cli_arguments.command.run(cli_arguments.network)?;
    println!("{output}");

    Ok(())
}
