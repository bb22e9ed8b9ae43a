//! pdclient - client for the PagerDuty REST API.
//!
//! The API organizes itself around pluralized resource collections
//! (`incidents`, `schedules`) and singular resource instances (`incident`).
//! This crate maps that layout onto an object graph by naming convention:
//! collections build their own CRUD paths, responses decode recursively
//! into entities, and nested sub-resources (a schedule's overrides, a
//! user's contact methods) are addressed through their parent entity.
//!
//! # Module Structure
//!
//! - [`api`] - Root client, builder, and HTTP transport
//! - [`resource`] - Naming conventions, kind registry, collections, entities
//! - [`error`] - Error taxonomy for API calls and attribute access
//!
//! # Example
//!
//! ```ignore
//! use pdclient::Client;
//! use serde_json::json;
//!
//! async fn example() -> Result<(), pdclient::Error> {
//!     let client = Client::new("acme", "REDACTED-TOKEN")?;
//!
//!     // Top-level CRUD
//!     let open = client.incidents.list(&[("status", "triggered")]).await?;
//!     let user = client
//!         .users
//!         .create(json!({"name": "Alice Example", "email": "alice@example.com"}))
//!         .await?;
//!
//!     // Nested sub-resources hang off their parent entity
//!     let schedule = client.schedules.show("S123", &[]).await?;
//!     if let Some(overrides) = schedule.subcollection("overrides") {
//!         overrides.list(&[]).await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod error;
pub mod resource;

pub use api::client::{Client, ClientBuilder};
pub use api::http::HttpTransport;
pub use error::Error;
pub use resource::collection::{Collection, Incidents, MaintenanceWindows, Services};
pub use resource::entity::{AttrValue, Entity};
pub use resource::registry::{CollectionKind, EntityKind};
