//! ipgw-core: Gateway client and configuration for pkuipgw
//!
//! This crate sends gateway requests over HTTPS and resolves the account
//! settings used to build them from a configuration file and command-line
//! overrides.

pub mod client;
pub mod config;
pub mod error;

pub use client::{GatewayClient, GatewayConfig};
pub use config::{Overrides, Settings};
pub use error::{ConfigError, GatewayError};
