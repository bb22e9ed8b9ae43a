//! API access layer
//!
//! This module provides the client surface for talking to the REST API:
//! building authenticated requests, mapping response statuses to typed
//! errors, and registering the account's top-level collections.
//!
//! # Module Structure
//!
//! - [`client`] - Root client and builder
//! - [`http`] - HTTP transport for REST API calls
//!
//! # Example
//!
//! ```ignore
//! use pdclient::Client;
//!
//! async fn example() -> Result<(), pdclient::Error> {
//!     let client = Client::new("acme", "REDACTED-TOKEN")?;
//!     let open = client.incidents.list(&[("status", "triggered")]).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
