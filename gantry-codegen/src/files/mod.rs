//! Per-template renderers.
//!
//! One renderer per generated file, each producing the file's full textual
//! body. Entity templates derive every identifier from the entity name, so
//! output is reproducible for identical schema input.

pub mod controller;
pub mod graphql;
pub mod health;
pub mod inputs;
pub mod modules;
pub mod prisma;
pub mod service;

use gantry_schema::Entity;

use crate::naming::{to_camel_case, to_kebab_case, to_pascal_case};

/// Derived names for one entity, shared across its templates.
#[derive(Debug, Clone)]
pub(crate) struct EntityNames {
    /// Class name, e.g. `OrderItem`.
    pub class: String,
    /// Directory and file-name stem, e.g. `order-item`.
    pub dir: String,
    /// Singular variable name, e.g. `orderItem`; also the Prisma delegate.
    pub var: String,
    /// Plural variable name, e.g. `orderItems`; the collection query name.
    pub plural_var: String,
    /// REST route, e.g. `order-items`.
    pub route: String,
}

impl EntityNames {
    pub fn of(entity: &Entity) -> Self {
        Self {
            class: to_pascal_case(&entity.name),
            dir: to_kebab_case(&entity.name),
            var: to_camel_case(&entity.name),
            plural_var: to_camel_case(&entity.plural()),
            route: to_kebab_case(&entity.plural()),
        }
    }
}
