//! Gateway command implementation

use std::process::ExitCode;

use clap::ValueEnum;

use ipgw_core::{GatewayClient, Settings};
use ipgw_protocol::Operation;

use crate::output::{format_reply, print_error};

/// Operation names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GatewayCommand {
    /// Open a session (connect)
    Conn,
    /// Close this address's session
    Disconn,
    /// Close all sessions of the account
    Disconnall,
    /// List the account's active sessions
    Getconns,
    /// Close the session of the address given with --ip
    Disconnip,
}

impl From<GatewayCommand> for Operation {
    fn from(cmd: GatewayCommand) -> Self {
        match cmd {
            GatewayCommand::Conn => Operation::Open,
            GatewayCommand::Disconn => Operation::Close,
            GatewayCommand::Disconnall => Operation::CloseAll,
            GatewayCommand::Getconns => Operation::GetConnections,
            GatewayCommand::Disconnip => Operation::DisconnectIp,
        }
    }
}

/// Execute one gateway operation and print the reply
///
/// Without `strict`, a failed request is printed as an `error : ...` line and
/// the command still succeeds. With `strict`, the failure is reported once on
/// stderr and the exit code is a failure.
pub async fn gateway_command(
    client: &GatewayClient,
    operation: Operation,
    settings: &Settings,
    strict: bool,
) -> ExitCode {
    let credentials = settings.credentials();
    let ip = settings.ip.as_deref();

    let reply = if strict {
        match client.execute(operation, &credentials, ip).await {
            Ok(reply) => reply,
            Err(e) => {
                print_error(&format!("{} failed: {}", operation.cli_name(), e));
                return ExitCode::FAILURE;
            }
        }
    } else {
        client.execute_or_error(operation, &credentials, ip).await
    };

    print!("{}", format_reply(&reply));
    ExitCode::SUCCESS
}
