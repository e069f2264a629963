//! CLI command implementations

mod gateway;

pub use gateway::{gateway_command, GatewayCommand};
