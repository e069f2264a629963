//! ipgw-protocol: Wire vocabulary for the PKU IP gateway
//!
//! This crate defines the five gateway operations, the form-encoded request
//! bodies sent for each of them, and the order-preserving JSON reply returned
//! by the gateway. It performs no I/O.

pub mod error;
pub mod operation;
pub mod reply;
pub mod request;
pub mod secret;

pub use error::ProtocolError;
pub use operation::Operation;
pub use reply::Reply;
pub use request::{Credentials, RequestBody};
pub use secret::Password;

/// Gateway session-control endpoint
pub const DEFAULT_ENDPOINT: &str = "https://its.pku.edu.cn/cas/ITSClient";

/// Client identifier sent as the `app` field and as the `User-Agent` header
pub const DEFAULT_APP_ID: &str = "myxxxsquared_IPGW_RUST";
