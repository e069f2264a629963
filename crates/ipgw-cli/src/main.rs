//! pkuipgw CLI
//!
//! Sends one session-control request to the PKU IP gateway and prints the
//! reply:
//! - conn (open a session), disconn (close it), disconnall (close all)
//! - getconns (list sessions), disconnip (close the session of an address)

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ipgw_core::config::{self, Overrides, Settings};
use ipgw_core::{GatewayClient, GatewayConfig};
use ipgw_protocol::{Operation, Password};
use pkuipgw::commands::{self, GatewayCommand};
use pkuipgw::prompt;

#[derive(Parser)]
#[command(name = "pkuipgw")]
#[command(author, version, about = "PKU IP gateway client")]
struct Cli {
    /// Operation to perform
    #[arg(value_enum)]
    cmd: GatewayCommand,

    /// Path to configuration file
    #[arg(short = 'c', long = "config_file", alias = "config-file")]
    config_file: Option<PathBuf>,

    /// Gateway account name
    #[arg(short, long, env = "PKUIPGW_USER")]
    user: Option<String>,

    /// Gateway account password
    #[arg(short, long, env = "PKUIPGW_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Connect to the fee network (-f, or --fee=false to override the config)
    #[arg(
        short,
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    fee: Option<bool>,

    /// Address whose session disconnip closes
    #[arg(long)]
    ip: Option<String>,

    /// Exit with an error status when the request fails
    #[arg(long)]
    strict: bool,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Gateway endpoint URL
    #[arg(long, env = "PKUIPGW_ENDPOINT", hide = true)]
    endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let operation = Operation::from(cli.cmd);

    let source = config::locate_config(cli.config_file.as_deref());
    tracing::debug!(path = %source.path().display(), cmd = %operation, "Resolved config file");
    let file_config = config::load_config(&source)
        .with_context(|| format!("Failed to load config from {:?}", source.path()))?;

    let overrides = Overrides {
        user: cli.user,
        password: cli.password.map(Password::from),
        fee: cli.fee,
        ip: cli.ip,
    };
    let mut settings = Settings::resolve(file_config, overrides);

    prompt::fill_missing(&mut settings, operation)
        .with_context(|| format!("Cannot run '{}'", operation.cli_name()))?;

    let mut gateway_config = GatewayConfig::default();
    if let Some(endpoint) = cli.endpoint {
        gateway_config = gateway_config.with_endpoint(endpoint);
    }
    let client =
        GatewayClient::with_config(gateway_config).context("Failed to create gateway client")?;

    Ok(commands::gateway_command(&client, operation, &settings, cli.strict).await)
}
