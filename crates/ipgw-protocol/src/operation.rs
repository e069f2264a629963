//! Gateway operations

use std::fmt;

/// One of the five session-control commands understood by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Open a session for this address
    Open,
    /// Close the session for this address
    Close,
    /// Close every session of the account
    CloseAll,
    /// List the account's active sessions
    GetConnections,
    /// Close the session bound to a given address
    DisconnectIp,
}

impl Operation {
    /// Value of the `cmd` form field
    pub fn keyword(self) -> &'static str {
        match self {
            Operation::Open => "open",
            Operation::Close => "close",
            Operation::CloseAll => "closeall",
            Operation::GetConnections => "getconnections",
            Operation::DisconnectIp => "disconnect",
        }
    }

    /// Name used on the command line
    pub fn cli_name(self) -> &'static str {
        match self {
            Operation::Open => "conn",
            Operation::Close => "disconn",
            Operation::CloseAll => "disconnall",
            Operation::GetConnections => "getconns",
            Operation::DisconnectIp => "disconnip",
        }
    }

    /// Whether the request carries `username` and `password`
    pub fn requires_credentials(self) -> bool {
        !matches!(self, Operation::Close)
    }

    /// Whether the request carries an `ip` field
    pub fn requires_ip(self) -> bool {
        matches!(self, Operation::DisconnectIp)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
