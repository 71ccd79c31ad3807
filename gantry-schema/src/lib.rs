//! Entity schema model for the gantry generator.
//!
//! This crate holds the typed, validated representation of an entity schema:
//! the entities, their fields, and the per-data-type option sets. It is the
//! single source of truth the code generator works from.
//!
//! # Architecture
//!
//! ```text
//! schema.json → Schema (parsing + validation) → gantry-codegen → gantry-git
//! ```
//!
//! A [`Schema`] is immutable once loaded: validation happens at load time,
//! before any code is emitted, so downstream stages never see a relation to a
//! missing entity or an option set without options. The schema's
//! [`Fingerprint`] is a stable content hash over everything generation
//! depends on, used for branch naming and for caching generation results.

mod entity;
mod error;
mod field_type;
mod fingerprint;
mod schema;
mod validate;

pub use entity::{Entity, EntityId, Field, FieldId};
pub use error::SchemaError;
pub use field_type::{FieldType, OptionSetValue};
pub use fingerprint::Fingerprint;
pub use schema::Schema;
