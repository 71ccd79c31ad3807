//! Template resolution.
//!
//! Maps an entity to the ordered list of templates that must be instantiated
//! for it. Resolution is pure and depends only on the entity's field types
//! and relation topology; identical input yields an identical, order-stable
//! list, which downstream diffing relies on.

use gantry_schema::{Entity, EntityId, Schema, SchemaError};

use crate::{files, GenerateError, Module};

/// One template to instantiate for an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateKind {
    EntityDto,
    CreateInput,
    UpdateInput,
    WhereInput,
    WhereUniqueInput,
    ServiceBase,
    Service,
    ControllerBase,
    Controller,
    ResolverBase,
    Resolver,
    ModuleBase,
    ModuleWiring,
    /// Reference input for a relation target, emitted into the owning
    /// entity's `base/` directory.
    RelationInput { related: EntityId },
}

/// Fixed per-entity template order; relation inputs are appended after.
const ENTITY_TEMPLATES: &[TemplateKind] = &[
    TemplateKind::EntityDto,
    TemplateKind::CreateInput,
    TemplateKind::UpdateInput,
    TemplateKind::WhereInput,
    TemplateKind::WhereUniqueInput,
    TemplateKind::ServiceBase,
    TemplateKind::Service,
    TemplateKind::ControllerBase,
    TemplateKind::Controller,
    TemplateKind::ResolverBase,
    TemplateKind::Resolver,
    TemplateKind::ModuleBase,
    TemplateKind::ModuleWiring,
];

/// Resolve the templates to instantiate for one entity.
///
/// Relation inputs follow field declaration order, deduplicated by target.
/// A self-relation adds no template: the entity's own `WhereUniqueInput`
/// already covers it. A lookup whose target is not part of the schema fails
/// here, before any emission.
pub fn resolve(schema: &Schema, entity: &Entity) -> Result<Vec<TemplateKind>, GenerateError> {
    let mut templates: Vec<TemplateKind> = ENTITY_TEMPLATES.to_vec();

    let mut seen: Vec<&EntityId> = Vec::new();
    for field in entity.relations() {
        let Some(related) = field.data_type.related_entity() else {
            continue;
        };

        if schema.entity(related).is_none() {
            return Err(GenerateError::Schema(SchemaError::UnknownRelationTarget {
                entity: entity.name.clone(),
                field: field.name.clone(),
                target: related.to_string(),
            }));
        }
        if related == &entity.id || seen.contains(&related) {
            continue;
        }
        seen.push(related);
        templates.push(TemplateKind::RelationInput {
            related: related.clone(),
        });
    }

    Ok(templates)
}

/// Run-level modules that do not belong to any entity: the Prisma wiring,
/// the health surface, and the application module.
pub fn static_modules(schema: &Schema) -> Vec<Module> {
    let mut modules = vec![
        Module::base("prisma/prisma.service.ts", files::prisma::service()),
        Module::base("prisma/prisma.module.ts", files::prisma::module()),
        Module::base(
            "health/base/health.controller.base.ts",
            files::health::controller_base(),
        ),
        Module::base(
            "health/base/health.service.base.ts",
            files::health::service_base(),
        ),
        Module::scaffold("health/health.controller.ts", files::health::controller()),
        Module::scaffold("health/health.service.ts", files::health::service()),
        Module::base("health/health.module.ts", files::health::module()),
    ];
    modules.push(Module::base(
        "app.module.ts",
        files::modules::AppModule::new(schema).render(),
    ));
    modules
}

#[cfg(test)]
mod tests {
    use gantry_schema::Schema;

    use super::*;

    fn two_entity_schema() -> Schema {
        Schema::from_json_str(
            r#"{
                "appName": "shop",
                "entities": [
                    { "id": "e-customer", "name": "Customer", "displayName": "Customer" },
                    {
                        "id": "e-order", "name": "Order", "displayName": "Order",
                        "fields": [
                            { "id": "f1", "name": "id", "dataType": "id" },
                            { "id": "f2", "name": "customer", "dataType": "lookup",
                              "properties": { "relatedEntityId": "e-customer" } },
                            { "id": "f3", "name": "billedTo", "dataType": "lookup",
                              "properties": { "relatedEntityId": "e-customer" } }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn resolution_is_order_stable() {
        let schema = two_entity_schema();
        let order = schema.entity_by_name("Order").unwrap();

        let a = resolve(&schema, order).unwrap();
        let b = resolve(&schema, order).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.first(), Some(&TemplateKind::EntityDto));
    }

    #[test]
    fn repeated_relation_targets_are_deduplicated() {
        let schema = two_entity_schema();
        let order = schema.entity_by_name("Order").unwrap();

        let templates = resolve(&schema, order).unwrap();
        let relation_count = templates
            .iter()
            .filter(|t| matches!(t, TemplateKind::RelationInput { .. }))
            .count();
        assert_eq!(relation_count, 1);
    }

    #[test]
    fn self_relation_adds_no_template() {
        let schema = Schema::from_json_str(
            r#"{
                "appName": "org",
                "entities": [{
                    "id": "e-emp", "name": "Employee", "displayName": "Employee",
                    "fields": [{
                        "id": "f1", "name": "manager", "dataType": "lookup",
                        "properties": { "relatedEntityId": "e-emp" }
                    }]
                }]
            }"#,
        )
        .unwrap();
        let employee = schema.entity_by_name("Employee").unwrap();

        let templates = resolve(&schema, employee).unwrap();
        assert!(!templates
            .iter()
            .any(|t| matches!(t, TemplateKind::RelationInput { .. })));
    }
}
