//! Wormhole Messaging Deployment CLI
//!
//! Replaces the three one-shot deployment scripts with subcommands sharing
//! one data contract (chains.json + deployedContracts.json):
//!
//! - `xmsg-deployer deploy-sender`    -> deploy MessageSender
//! - `xmsg-deployer deploy-receiver`  -> deploy MessageReceiver + register the sender
//! - `xmsg-deployer send-message`     -> quote the relay fee and send a test message
//! - `xmsg-deployer status`           -> registry, records, journal, RPC health
//!
//! The subcommands are meant to be run by a human in that order; they are
//! not designed for concurrent invocation against the same record file.

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use xmsg_rs::ChainName;

mod commands;
mod config;

use config::DeployConfig;

#[derive(Parser)]
#[command(name = "xmsg-deployer")]
#[command(about = "Deploy and drive the Wormhole messaging contracts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory holding chains.json and deployedContracts.json
    #[arg(long, global = true, default_value = "deploy-config")]
    deploy_config: PathBuf,

    /// Directory holding compiled contract artifacts (Foundry out/)
    #[arg(long, global = true, default_value = "out")]
    artifacts: PathBuf,

    /// Seconds to wait for each transaction receipt
    #[arg(long, global = true, default_value_t = 120)]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the MessageSender contract to the source chain
    DeploySender {
        /// Chain to deploy to
        #[arg(long, default_value_t = ChainName::Avalanche)]
        chain: ChainName,
    },

    /// Deploy the MessageReceiver contract and register the sender for its
    /// source chain
    DeployReceiver {
        /// Chain to deploy to
        #[arg(long, default_value_t = ChainName::Celo)]
        chain: ChainName,

        /// Chain whose recorded MessageSender gets registered
        #[arg(long, default_value_t = ChainName::Avalanche)]
        sender_chain: ChainName,
    },

    /// Send a test message from the recorded sender to the recorded receiver
    SendMessage {
        /// Source chain (must have a recorded MessageSender)
        #[arg(long, default_value_t = ChainName::Avalanche)]
        from: ChainName,

        /// Target chain (must have a recorded MessageReceiver)
        #[arg(long, default_value_t = ChainName::Celo)]
        to: ChainName,

        /// Message payload
        #[arg(long, default_value = "Hello from Avalanche to Celo!")]
        message: String,
    },

    /// Show registry, recorded deployments, journal state, and RPC health
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = DeployConfig::load(&cli.deploy_config, &cli.artifacts, cli.timeout)?;

    match cli.command {
        Commands::DeploySender { chain } => commands::sender::run(&config, chain).await,
        Commands::DeployReceiver {
            chain,
            sender_chain,
        } => commands::receiver::run(&config, chain, sender_chain).await,
        Commands::SendMessage { from, to, message } => {
            commands::message::run(&config, from, to, &message).await
        }
        Commands::Status => commands::status::run(&config).await,
    }
}
