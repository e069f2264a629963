//! Core error types for pkuipgw

use ipgw_protocol::ProtocolError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while talking to the gateway
///
/// Every variant is a transport failure from the caller's point of view. The
/// CLI may fold any of them into an `{"error": ...}` reply.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Connection, TLS or body read failure
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// Gateway answered with a non-success status
    #[error("{status} {reason} for url: {url}")]
    Status {
        status: u16,
        reason: String,
        url: String,
    },

    /// Request could not be built or reply could not be decoded
    #[error("{0}")]
    Protocol(#[from] ProtocolError),

    /// Endpoint URL is not usable
    #[error("Invalid gateway endpoint: {0}")]
    InvalidEndpoint(String),
}

impl GatewayError {
    /// HTTP status code, if the gateway answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            GatewayError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file missing or not a regular file
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Config file could not be read or parsed
    #[error("Failed to load config: {0}")]
    Load(#[from] ini::Error),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),
}
