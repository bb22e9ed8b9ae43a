//! Resource registry - wire names to declared kinds.
//!
//! The table is hand-written and built exactly once, before any request is
//! issued; afterwards it is only ever read. Nested payload decoding consults
//! it to decide whether a field materializes as a typed entity or a generic
//! attribute bag.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Declared entity kinds of the API's resource graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Incident,
    Alert,
    EmailFilter,
    MaintenanceWindow,
    Override,
    NotificationRule,
    ContactMethod,
    EscalationPolicy,
    ScheduleLayer,
    Service,
    Schedule,
    User,
    Entry,
    /// Untyped bag for nested objects with no registered kind.
    Generic,
}

impl EntityKind {
    /// Declaration-style name, used for display.
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Incident => "Incident",
            EntityKind::Alert => "Alert",
            EntityKind::EmailFilter => "EmailFilter",
            EntityKind::MaintenanceWindow => "MaintenanceWindow",
            EntityKind::Override => "Override",
            EntityKind::NotificationRule => "NotificationRule",
            EntityKind::ContactMethod => "ContactMethod",
            EntityKind::EscalationPolicy => "EscalationPolicy",
            EntityKind::ScheduleLayer => "ScheduleLayer",
            EntityKind::Service => "Service",
            EntityKind::Schedule => "Schedule",
            EntityKind::User => "User",
            EntityKind::Entry => "Entry",
            EntityKind::Generic => "Entity",
        }
    }
}

/// Declared collection kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Incidents,
    Alerts,
    EmailFilters,
    MaintenanceWindows,
    Overrides,
    NotificationRules,
    ContactMethods,
    Services,
    Schedules,
    Users,
    Entries,
    /// Fallback for plural names with no registered collection behavior.
    Generic,
}

/// Lookup table from wire-style resource names to declared kinds.
#[derive(Debug)]
pub struct Registry {
    entities: HashMap<&'static str, EntityKind>,
    collections: HashMap<&'static str, CollectionKind>,
}

impl Registry {
    /// Entity kind registered for a singular wire name.
    pub fn entity_kind(&self, singular: &str) -> Option<EntityKind> {
        self.entities.get(singular).copied()
    }

    /// Collection kind registered for a plural wire name.
    pub fn collection_kind(&self, plural: &str) -> Option<CollectionKind> {
        self.collections.get(plural).copied()
    }

    /// All registered singular wire names.
    pub fn entity_names(&self) -> Vec<&'static str> {
        self.entities.keys().copied().collect()
    }

    /// All registered plural wire names.
    pub fn collection_names(&self) -> Vec<&'static str> {
        self.collections.keys().copied().collect()
    }
}

/// Global registry, written once on first access.
static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Get the resource registry (built on first access, immutable afterward).
pub fn get_registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let entities = HashMap::from([
            ("incident", EntityKind::Incident),
            ("alert", EntityKind::Alert),
            ("email_filter", EntityKind::EmailFilter),
            ("maintenance_window", EntityKind::MaintenanceWindow),
            ("override", EntityKind::Override),
            ("notification_rule", EntityKind::NotificationRule),
            ("contact_method", EntityKind::ContactMethod),
            ("escalation_policy", EntityKind::EscalationPolicy),
            ("schedule_layer", EntityKind::ScheduleLayer),
            ("service", EntityKind::Service),
            ("schedule", EntityKind::Schedule),
            ("user", EntityKind::User),
            ("entry", EntityKind::Entry),
        ]);

        let collections = HashMap::from([
            ("incidents", CollectionKind::Incidents),
            ("alerts", CollectionKind::Alerts),
            ("email_filters", CollectionKind::EmailFilters),
            ("maintenance_windows", CollectionKind::MaintenanceWindows),
            ("overrides", CollectionKind::Overrides),
            ("notification_rules", CollectionKind::NotificationRules),
            ("contact_methods", CollectionKind::ContactMethods),
            ("services", CollectionKind::Services),
            ("schedules", CollectionKind::Schedules),
            ("users", CollectionKind::Users),
            ("entries", CollectionKind::Entries),
        ]);

        Registry {
            entities,
            collections,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::naming;

    #[test]
    fn test_registry_loads_successfully() {
        let registry = get_registry();
        assert!(
            !registry.entity_names().is_empty(),
            "Registry should have entity kinds"
        );
    }

    #[test]
    fn test_incident_kinds_exist() {
        let registry = get_registry();
        assert_eq!(registry.entity_kind("incident"), Some(EntityKind::Incident));
        assert_eq!(
            registry.collection_kind("incidents"),
            Some(CollectionKind::Incidents)
        );
    }

    #[test]
    fn test_unknown_names_have_no_kind() {
        let registry = get_registry();
        assert_eq!(registry.entity_kind("assigned_to_user"), None);
        assert_eq!(registry.collection_kind("widgets"), None);
    }

    #[test]
    fn test_entity_names_match_declared_kinds() {
        // Every registered singular wire name title-cases to the declared
        // kind name it maps to.
        let registry = get_registry();
        for name in registry.entity_names() {
            let kind = registry.entity_kind(name).unwrap();
            assert_eq!(naming::type_name(name), kind.name());
            assert_eq!(naming::wire_name(kind.name()), name);
        }
    }

    #[test]
    fn test_every_collection_has_an_entity_kind() {
        // EscalationPolicy and ScheduleLayer only ever appear nested, so the
        // check runs from the collection side.
        let registry = get_registry();
        for plural in registry.collection_names() {
            let singular = naming::singularize(plural);
            assert!(
                registry.entity_kind(&singular).is_some(),
                "collection {plural} has no entity kind"
            );
        }
    }
}
