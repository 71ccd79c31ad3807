//! Template instantiation.

use gantry_schema::{Entity, Schema, SchemaError};

use crate::files::{
    controller::{ControllerBase, ControllerWrapper},
    graphql::{ResolverBase, ResolverWrapper},
    inputs::{CreateInput, EntityDto, RelationInput, UpdateInput, WhereInput, WhereUniqueInput},
    modules::{ModuleBase, ModuleWiring},
    service::{ServiceBase, ServiceWrapper},
    EntityNames,
};
use crate::naming::to_pascal_case;
use crate::{GenerateError, Module, TemplateKind};

/// Instantiate one template for an entity.
///
/// Content is a pure function of the entity snapshot and the template;
/// nothing ambient (timestamps, counters, environment) flows in, so
/// emitting twice from the same schema yields byte-identical output.
pub fn emit(
    schema: &Schema,
    entity: &Entity,
    kind: &TemplateKind,
) -> Result<Module, GenerateError> {
    let n = EntityNames::of(entity);
    let dir = &n.dir;
    let class = &n.class;

    let module = match kind {
        TemplateKind::EntityDto => Module::base(
            format!("{dir}/base/{class}.ts"),
            EntityDto::new(schema, entity).render(),
        ),
        TemplateKind::CreateInput => Module::base(
            format!("{dir}/base/{class}CreateInput.ts"),
            CreateInput::new(schema, entity).render(),
        ),
        TemplateKind::UpdateInput => Module::base(
            format!("{dir}/base/{class}UpdateInput.ts"),
            UpdateInput::new(schema, entity).render(),
        ),
        TemplateKind::WhereInput => Module::base(
            format!("{dir}/base/{class}WhereInput.ts"),
            WhereInput::new(entity).render(),
        ),
        TemplateKind::WhereUniqueInput => Module::base(
            format!("{dir}/base/{class}WhereUniqueInput.ts"),
            WhereUniqueInput::new(entity).render(),
        ),
        TemplateKind::ServiceBase => Module::base(
            format!("{dir}/base/{dir}.service.base.ts"),
            ServiceBase::new(entity).render(),
        ),
        TemplateKind::Service => Module::scaffold(
            format!("{dir}/{dir}.service.ts"),
            ServiceWrapper::new(entity).render(),
        ),
        TemplateKind::ControllerBase => Module::base(
            format!("{dir}/base/{dir}.controller.base.ts"),
            ControllerBase::new(entity).render(),
        ),
        TemplateKind::Controller => Module::scaffold(
            format!("{dir}/{dir}.controller.ts"),
            ControllerWrapper::new(entity).render(),
        ),
        TemplateKind::ResolverBase => Module::base(
            format!("{dir}/base/{dir}.resolver.base.ts"),
            ResolverBase::new(entity).render(),
        ),
        TemplateKind::Resolver => Module::scaffold(
            format!("{dir}/{dir}.resolver.ts"),
            ResolverWrapper::new(entity).render(),
        ),
        TemplateKind::ModuleBase => Module::base(
            format!("{dir}/base/{dir}.module.base.ts"),
            ModuleBase::new(entity).render(),
        ),
        TemplateKind::ModuleWiring => Module::scaffold(
            format!("{dir}/{dir}.module.ts"),
            ModuleWiring::new(entity).render(),
        ),
        TemplateKind::RelationInput { related } => {
            let related = schema.entity(related).ok_or_else(|| {
                let field = entity
                    .relations()
                    .find(|f| f.data_type.related_entity() == Some(related))
                    .map(|f| f.name.clone())
                    .unwrap_or_default();
                GenerateError::Schema(SchemaError::UnknownRelationTarget {
                    entity: entity.name.clone(),
                    field,
                    target: related.to_string(),
                })
            })?;
            Module::base(
                format!(
                    "{dir}/base/{related_class}WhereUniqueInput.ts",
                    related_class = to_pascal_case(&related.name)
                ),
                RelationInput::new(related).render(),
            )
        }
    };

    Ok(module)
}
