//! Collections - addressable resource lists with CRUD operations.
//!
//! A collection derives its request paths from naming conventions, issues
//! the HTTP call, and decodes responses into entities. A collection nested
//! under a parent entity prefixes every path with the parent's own segment,
//! which is how sub-resources are addressed without duplicating CRUD logic.

use crate::api::http::HttpTransport;
use crate::error::Error;
use crate::resource::entity::Entity;
use crate::resource::naming;
use crate::resource::registry::{get_registry, CollectionKind, EntityKind};
use reqwest::Method;
use serde_json::{json, Map, Value};
use std::ops::Deref;
use std::sync::Arc;

/// Back-reference to the entity a nested collection is scoped under.
///
/// Carries only what path construction needs.
#[derive(Debug, Clone)]
pub struct ParentRef {
    /// Plural wire name of the parent's collection.
    pub collection: String,
    /// Identity of the parent entity.
    pub id: String,
}

/// An addressable list of resources of one kind.
#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    singular_name: String,
    entity_kind: EntityKind,
    kind: CollectionKind,
    parent: Option<ParentRef>,
    transport: Arc<HttpTransport>,
}

impl Collection {
    /// Create a collection addressed by its plural wire name. Entity and
    /// collection kinds resolve through the registry, falling back to the
    /// generic kinds for unregistered names.
    pub(crate) fn new(
        transport: Arc<HttpTransport>,
        name: &str,
        parent: Option<ParentRef>,
    ) -> Self {
        let singular_name = naming::singularize(name);
        let registry = get_registry();
        let entity_kind = registry
            .entity_kind(&singular_name)
            .unwrap_or(EntityKind::Generic);
        let kind = registry
            .collection_kind(name)
            .unwrap_or(CollectionKind::Generic);

        Self {
            name: name.to_string(),
            singular_name,
            entity_kind,
            kind,
            parent,
            transport,
        }
    }

    /// Plural wire name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Singular wire name, used for request/response payload keys.
    pub fn singular_name(&self) -> &str {
        &self.singular_name
    }

    /// Kind of the entities this collection decodes.
    pub fn entity_kind(&self) -> EntityKind {
        self.entity_kind
    }

    /// Declared kind of this collection.
    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    /// Parent entity reference, when this collection is nested.
    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    pub(crate) fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }

    /// Collection path, prefixed with the parent's segment when nested.
    fn path(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{}/{}/{}", parent.collection, parent.id, self.name),
            None => self.name.clone(),
        }
    }

    /// Path addressing one resource of the collection.
    fn entity_path(&self, id: &str) -> String {
        format!("{}/{}", self.path(), id)
    }

    /// Wrap fields under the singular resource key. A `requester_id` field
    /// needs to be up a level.
    fn write_payload(&self, fields: Value) -> Result<Value, Error> {
        let mut fields = match fields {
            Value::Object(map) => map,
            _ => return Err(Error::InvalidFields),
        };

        let mut data = Map::new();
        if let Some(requester_id) = fields.remove("requester_id") {
            data.insert("requester_id".to_string(), requester_id);
        }
        data.insert(self.singular_name.clone(), Value::Object(fields));
        Ok(Value::Object(data))
    }

    /// Decode the entity found under the singular key of a response. A
    /// missing key yields an entity with an empty attribute bag.
    pub(crate) fn entity_from_response(&self, response: &Value) -> Entity {
        let payload = response
            .get(&self.singular_name)
            .cloned()
            .unwrap_or(Value::Null);
        Entity::from_payload(self.clone(), payload)
    }

    /// Decode the entities found under the plural key of a list response.
    pub(crate) fn list_response(&self, response: &Value) -> Vec<Entity> {
        response
            .get(&self.name)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|item| Entity::from_payload(self.clone(), item.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Create a resource from a JSON object of fields.
    pub async fn create(&self, fields: Value) -> Result<Entity, Error> {
        let data = self.write_payload(fields)?;
        let response = self
            .transport
            .request(Method::POST, &self.path(), &[], Some(&data), &[])
            .await?;
        Ok(self.entity_from_response(&response))
    }

    /// Update one resource by id.
    pub async fn update(&self, id: &str, fields: Value) -> Result<Entity, Error> {
        let data = self.write_payload(fields)?;
        let response = self
            .transport
            .request(Method::PUT, &self.entity_path(id), &[], Some(&data), &[])
            .await?;
        Ok(self.entity_from_response(&response))
    }

    /// List resources. Query parameters pass through verbatim; a missing or
    /// empty result key yields an empty vec, never an error.
    pub async fn list(&self, query: &[(&str, &str)]) -> Result<Vec<Entity>, Error> {
        let response = self
            .transport
            .request(Method::GET, &self.path(), query, None, &[])
            .await?;
        Ok(self.list_response(&response))
    }

    /// Count resources matching the query. An absent total comes back as
    /// `None`.
    pub async fn count(&self, query: &[(&str, &str)]) -> Result<Option<u64>, Error> {
        let path = format!("{}/count", self.name);
        let response = self
            .transport
            .request(Method::GET, &path, query, None, &[])
            .await?;
        Ok(response.get("total").and_then(Value::as_u64))
    }

    /// Fetch one resource by id.
    pub async fn show(&self, id: &str, query: &[(&str, &str)]) -> Result<Entity, Error> {
        let response = self
            .transport
            .request(Method::GET, &self.entity_path(id), query, None, &[])
            .await?;
        Ok(self.entity_from_response(&response))
    }

    /// Delete a resource, returning the decoded response body verbatim.
    /// Deletion responses are not guaranteed to carry the resource shape,
    /// so no entity is built.
    pub async fn delete(&self, id: &str) -> Result<Value, Error> {
        self.transport
            .request(Method::DELETE, &self.entity_path(id), &[], None, &[])
            .await
    }
}

/// Incident collection, with the API's bulk-update shape.
#[derive(Debug, Clone)]
pub struct Incidents(Collection);

impl Incidents {
    pub(crate) fn new(transport: Arc<HttpTransport>) -> Self {
        Self(Collection::new(transport, "incidents", None))
    }

    /// Update several incidents in a single request. Each element of
    /// `updates` is one per-incident payload; `requester_id` and the
    /// payload list travel as top-level keys.
    pub async fn update(&self, requester_id: &str, updates: &[Value]) -> Result<Entity, Error> {
        let data = json!({
            "requester_id": requester_id,
            "incidents": updates,
        });
        let response = self
            .0
            .transport
            .request(Method::PUT, &self.0.path(), &[], Some(&data), &[])
            .await?;
        Ok(self.0.entity_from_response(&response))
    }
}

impl Deref for Incidents {
    type Target = Collection;

    fn deref(&self) -> &Collection {
        &self.0
    }
}

/// Maintenance window collection, with the type-filter path splice.
#[derive(Debug, Clone)]
pub struct MaintenanceWindows(Collection);

impl MaintenanceWindows {
    pub(crate) fn new(transport: Arc<HttpTransport>) -> Self {
        Self(Collection::new(transport, "maintenance_windows", None))
    }

    /// List maintenance windows. A `type` filter ("ongoing", "future",
    /// "past") selects a sub-path instead of being sent as a query
    /// parameter.
    pub async fn list(&self, query: &[(&str, &str)]) -> Result<Vec<Entity>, Error> {
        let mut path = self.0.path();
        let mut rest: Vec<(&str, &str)> = Vec::with_capacity(query.len());
        for &(name, value) in query {
            if name == "type" {
                path = format!("{}/{}", self.0.name, value);
            } else {
                rest.push((name, value));
            }
        }

        let response = self
            .0
            .transport
            .request(Method::GET, &path, &rest, None, &[])
            .await?;
        Ok(self.0.list_response(&response))
    }

    /// Update a maintenance window. This endpoint takes the fields as the
    /// raw request body, without the singular-key wrapping.
    pub async fn update(&self, id: &str, fields: Value) -> Result<Entity, Error> {
        let response = self
            .0
            .transport
            .request(Method::PUT, &self.0.entity_path(id), &[], Some(&fields), &[])
            .await?;
        Ok(self.0.entity_from_response(&response))
    }
}

impl Deref for MaintenanceWindows {
    type Target = Collection;

    fn deref(&self) -> &Collection {
        &self.0
    }
}

/// Service collection, with the enable/disable/key-rotation actions.
#[derive(Debug, Clone)]
pub struct Services(Collection);

impl Services {
    pub(crate) fn new(transport: Arc<HttpTransport>) -> Self {
        Self(Collection::new(transport, "services", None))
    }

    /// Disable a service on behalf of a requester. Returns the raw
    /// response body.
    pub async fn disable(&self, id: &str, requester_id: &str) -> Result<Value, Error> {
        let path = format!("{}/disable", self.0.entity_path(id));
        let data = json!({ "requester_id": requester_id });
        self.0
            .transport
            .request(Method::PUT, &path, &[], Some(&data), &[])
            .await
    }

    /// Re-enable a disabled service. Returns the raw response body.
    pub async fn enable(&self, id: &str) -> Result<Value, Error> {
        let path = format!("{}/enable", self.0.entity_path(id));
        self.0
            .transport
            .request(Method::PUT, &path, &[], None, &[])
            .await
    }

    /// Rotate the service's integration key.
    pub async fn regenerate_key(&self, id: &str) -> Result<Entity, Error> {
        let path = format!("{}/regenerate_key", self.0.entity_path(id));
        let response = self
            .0
            .transport
            .request(Method::POST, &path, &[], None, &[])
            .await?;
        Ok(self.0.entity_from_response(&response))
    }
}

impl Deref for Services {
    type Target = Collection;

    fn deref(&self) -> &Collection {
        &self.0
    }
}
