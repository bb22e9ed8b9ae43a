//! Resource abstraction layer
//!
//! This module turns the API's pluralized resource collections and singular
//! resource instances into an object graph, using naming-convention
//! inference instead of per-resource boilerplate.
//!
//! # Architecture
//!
//! - [`naming`] - Wire/type-name and singular/plural transforms
//! - [`registry`] - Immutable table from wire names to declared kinds
//! - [`collection`] - Addressable resource lists with CRUD operations
//! - [`entity`] - Decoded resource instances with a dynamic attribute bag
//!
//! Control flow: an operation on a [`collection::Collection`] builds a
//! request path (consulting the parent entity reference for nesting),
//! issues the HTTP call, and decodes the response. Nested payload fields
//! resolve through the [`registry`] to decide whether they materialize as
//! typed entities, generic bags, or verbatim scalars.

pub mod collection;
pub mod entity;
pub mod naming;
pub mod registry;

pub use collection::{Collection, Incidents, MaintenanceWindows, ParentRef, Services};
pub use entity::{AttrValue, Entity};
pub use registry::{get_registry, CollectionKind, EntityKind, Registry};
