//! Entities - decoded resource instances with a dynamic attribute bag.
//!
//! An entity decodes its whole payload eagerly at construction: nested
//! objects become entities (typed when their field name resolves to a
//! registered kind, generic otherwise), sequences decode element-wise, and
//! scalars are stored verbatim. The fixed set of kinds with nested
//! sub-resources additionally gets its sub-collections attached.

use crate::api::http::HttpTransport;
use crate::error::Error;
use crate::resource::collection::{Collection, ParentRef};
use crate::resource::naming;
use crate::resource::registry::EntityKind;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// One decoded attribute value.
#[derive(Debug, Clone)]
pub enum AttrValue {
    /// String, number, boolean, or null, stored verbatim.
    Scalar(Value),
    /// Nested resource object.
    Entity(Entity),
    /// Ordered sequence of decoded values.
    List(Vec<AttrValue>),
}

impl AttrValue {
    /// Scalar payload; `None` for entities and lists.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            AttrValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// Nested entity; `None` for scalars and lists.
    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            AttrValue::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    /// Decoded sequence; `None` for scalars and entities.
    pub fn as_list(&self) -> Option<&[AttrValue]> {
        match self {
            AttrValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Shortcut for string scalars.
    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar().and_then(Value::as_str)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Scalar(value) => write!(f, "{value}"),
            AttrValue::Entity(entity) => write!(f, "{entity}"),
            AttrValue::List(items) => write!(f, "[{} items]", items.len()),
        }
    }
}

/// A single resource instance decoded from a response payload.
#[derive(Debug, Clone)]
pub struct Entity {
    kind: EntityKind,
    collection: Collection,
    attrs: BTreeMap<String, AttrValue>,
    subcollections: BTreeMap<String, Collection>,
}

impl Entity {
    /// Decode an entity from the payload found under a response's singular
    /// key. Anything other than an object decodes to an empty attribute
    /// bag.
    pub(crate) fn from_payload(collection: Collection, payload: Value) -> Self {
        let transport = collection.transport().clone();
        let kind = collection.entity_kind();

        let mut attrs = BTreeMap::new();
        if let Value::Object(fields) = payload {
            for (key, value) in fields {
                let decoded = decode_value(&transport, &key, value);
                attrs.insert(key, decoded);
            }
        }

        let mut entity = Self {
            kind,
            collection,
            attrs,
            subcollections: BTreeMap::new(),
        };
        entity.attach_subcollections();
        entity
    }

    /// Sub-collections exist for a fixed, closed set of kinds, driven by
    /// the API's actual resource graph. They need the entity's id for path
    /// construction, so an entity decoded without one gets none.
    fn attach_subcollections(&mut self) {
        let names: &[&str] = match self.kind {
            EntityKind::Service => &["email_filters"],
            EntityKind::Schedule => &["overrides", "users", "entries"],
            EntityKind::User => &["notification_rules", "contact_methods"],
            _ => return,
        };

        let Some(id) = self.id().map(str::to_string) else {
            return;
        };
        let parent = ParentRef {
            collection: self.collection.name().to_string(),
            id,
        };
        for name in names {
            let nested =
                Collection::new(self.collection.transport().clone(), name, Some(parent.clone()));
            self.subcollections.insert((*name).to_string(), nested);
        }
    }

    /// Declared kind this entity decoded as.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The collection this entity belongs to.
    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// The entity's identity attribute, when present as a string.
    pub fn id(&self) -> Option<&str> {
        match self.attrs.get("id") {
            Some(AttrValue::Scalar(value)) => value.as_str(),
            _ => None,
        }
    }

    /// Read an attribute. Unknown names fail with
    /// [`Error::AttributeNotFound`].
    pub fn get(&self, name: &str) -> Result<&AttrValue, Error> {
        self.attrs
            .get(name)
            .ok_or_else(|| Error::AttributeNotFound(name.to_string()))
    }

    /// Write an attribute, overwriting any existing value or storing a new
    /// one.
    pub fn set(&mut self, name: &str, value: AttrValue) {
        self.attrs.insert(name.to_string(), value);
    }

    /// Names of all decoded attributes.
    pub fn attr_names(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }

    /// Nested collection scoped under this entity, for the kinds that have
    /// them (services, schedules, users).
    pub fn subcollection(&self, name: &str) -> Option<&Collection> {
        self.subcollections.get(name)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}:", self.kind.name())?;
        let mut first = true;
        for (name, value) in &self.attrs {
            let sep = if first { "" } else { "," };
            write!(f, "{sep} {name}={value}")?;
            first = false;
        }
        write!(f, ">")
    }
}

/// Decode one field value, using the field's singularized name as the
/// naming hint for nested objects and sequence elements.
fn decode_value(transport: &Arc<HttpTransport>, key: &str, value: Value) -> AttrValue {
    match value {
        Value::Array(items) => {
            let hint = naming::singularize(key);
            AttrValue::List(
                items
                    .into_iter()
                    .map(|item| decode_value(transport, &hint, item))
                    .collect(),
            )
        }
        Value::Object(_) => {
            let singular = naming::singularize(key);
            let nested = Collection::new(transport.clone(), &naming::pluralize(&singular), None);
            AttrValue::Entity(Entity::from_payload(nested, value))
        }
        scalar => AttrValue::Scalar(scalar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::DEFAULT_TIMEOUT;
    use serde_json::json;
    use url::Url;

    fn collection(name: &str) -> Collection {
        let base = Url::parse("https://acme.pagerduty.com/api/v1/").unwrap();
        let transport =
            Arc::new(HttpTransport::new(base, "token".to_string(), DEFAULT_TIMEOUT).unwrap());
        Collection::new(transport, name, None)
    }

    #[test]
    fn test_scalars_are_stored_verbatim() {
        let entity = Entity::from_payload(
            collection("incidents"),
            json!({
                "id": "PIJ90N7",
                "incident_number": 1,
                "resolved": false,
                "description": null
            }),
        );

        assert_eq!(entity.kind(), EntityKind::Incident);
        assert_eq!(entity.get("id").unwrap().as_str(), Some("PIJ90N7"));
        assert_eq!(
            entity.get("incident_number").unwrap().as_scalar(),
            Some(&json!(1))
        );
        assert_eq!(
            entity.get("resolved").unwrap().as_scalar(),
            Some(&json!(false))
        );
        assert_eq!(
            entity.get("description").unwrap().as_scalar(),
            Some(&Value::Null)
        );
    }

    #[test]
    fn test_unknown_attribute_fails() {
        let entity = Entity::from_payload(collection("incidents"), json!({"id": "PIJ90N7"}));
        assert!(matches!(
            entity.get("status"),
            Err(Error::AttributeNotFound(name)) if name == "status"
        ));
    }

    #[test]
    fn test_set_overwrites_and_adds_attributes() {
        let mut entity =
            Entity::from_payload(collection("incidents"), json!({"status": "triggered"}));
        entity.set("status", AttrValue::Scalar(json!("resolved")));
        entity.set("note", AttrValue::Scalar(json!("manually resolved")));

        assert_eq!(entity.get("status").unwrap().as_str(), Some("resolved"));
        assert_eq!(
            entity.get("note").unwrap().as_str(),
            Some("manually resolved")
        );
    }

    #[test]
    fn test_registered_nested_objects_decode_typed() {
        let entity = Entity::from_payload(
            collection("incidents"),
            json!({
                "id": "PIJ90N7",
                "service": {"id": "PS1", "name": "ops"},
                "escalation_policy": {"id": "PEP1", "name": "default"}
            }),
        );

        let service = entity.get("service").unwrap().as_entity().unwrap();
        assert_eq!(service.kind(), EntityKind::Service);
        assert_eq!(service.get("name").unwrap().as_str(), Some("ops"));

        let policy = entity.get("escalation_policy").unwrap().as_entity().unwrap();
        assert_eq!(policy.kind(), EntityKind::EscalationPolicy);
    }

    #[test]
    fn test_unregistered_nested_objects_decode_generic() {
        let entity = Entity::from_payload(
            collection("incidents"),
            json!({
                "assigned_to_user": {"id": "PU1", "name": "Alice Example"}
            }),
        );

        let nested = entity.get("assigned_to_user").unwrap().as_entity().unwrap();
        assert_eq!(nested.kind(), EntityKind::Generic);
        assert_eq!(nested.get("name").unwrap().as_str(), Some("Alice Example"));
    }

    #[test]
    fn test_sequences_decode_with_singularized_hint() {
        let entity = Entity::from_payload(
            collection("schedules"),
            json!({
                "id": "S123",
                "schedule_layers": [
                    {"id": "L1", "name": "Daytime"},
                    {"id": "L2", "name": "Nighttime"}
                ],
                "time_zones": ["UTC", "Eastern Time (US & Canada)"]
            }),
        );

        let layers = entity.get("schedule_layers").unwrap().as_list().unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(
            layers[0].as_entity().unwrap().kind(),
            EntityKind::ScheduleLayer
        );

        let zones = entity.get("time_zones").unwrap().as_list().unwrap();
        assert_eq!(zones[0].as_str(), Some("UTC"));
    }

    #[test]
    fn test_schedule_gets_its_subcollections() {
        let entity = Entity::from_payload(collection("schedules"), json!({"id": "S123"}));

        for name in ["overrides", "users", "entries"] {
            let nested = entity.subcollection(name).unwrap();
            let parent = nested.parent().unwrap();
            assert_eq!(parent.collection, "schedules");
            assert_eq!(parent.id, "S123");
        }
        assert!(entity.subcollection("email_filters").is_none());
    }

    #[test]
    fn test_user_and_service_subcollections() {
        let user = Entity::from_payload(collection("users"), json!({"id": "PU1"}));
        assert!(user.subcollection("notification_rules").is_some());
        assert!(user.subcollection("contact_methods").is_some());

        let service = Entity::from_payload(collection("services"), json!({"id": "PS1"}));
        assert!(service.subcollection("email_filters").is_some());
    }

    #[test]
    fn test_entity_without_id_gets_no_subcollections() {
        let entity = Entity::from_payload(collection("schedules"), json!({"name": "Primary"}));
        assert!(entity.subcollection("overrides").is_none());
    }

    #[test]
    fn test_non_object_payload_decodes_to_empty_bag() {
        let entity = Entity::from_payload(collection("incidents"), Value::Null);
        assert_eq!(entity.attr_names().count(), 0);
        assert!(entity.get("id").is_err());
    }

    #[test]
    fn test_display_names_the_kind() {
        let entity = Entity::from_payload(collection("incidents"), json!({"id": "PIJ90N7"}));
        assert_eq!(entity.to_string(), r#"<Incident: id="PIJ90N7">"#);

        let generic = Entity::from_payload(collection("widgets"), json!({"id": "W1"}));
        assert!(generic.to_string().starts_with("<Entity:"));
    }
}
