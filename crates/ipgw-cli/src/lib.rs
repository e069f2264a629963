//! pkuipgw: Command-line interface for the PKU IP gateway
//!
//! Provides the `pkuipgw` CLI for opening, closing and listing network
//! sessions on the campus gateway.

pub mod commands;
pub mod output;
pub mod prompt;
