use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while loading or validating a schema document.
///
/// All of these are fatal and abort the run before any code is emitted.
#[derive(Debug, Error, Diagnostic)]
pub enum SchemaError {
    #[error("failed to read schema from '{path}'")]
    #[diagnostic(code(gantry::schema::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema document")]
    #[diagnostic(
        code(gantry::schema::parse),
        help("the schema must be a JSON document with an `appName` and an `entities` array")
    )]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate entity name '{name}'")]
    #[diagnostic(
        code(gantry::schema::duplicate_entity),
        help("entity names must be unique within a schema")
    )]
    DuplicateEntity { name: String },

    #[error("duplicate field '{field}' on entity '{entity}'")]
    #[diagnostic(code(gantry::schema::duplicate_field))]
    DuplicateField { entity: String, field: String },

    #[error("field '{entity}.{field}' references unknown entity '{target}'")]
    #[diagnostic(
        code(gantry::schema::unknown_relation_target),
        help("lookup fields must reference an entity defined in the same schema")
    )]
    UnknownRelationTarget {
        entity: String,
        field: String,
        target: String,
    },

    #[error("option set field '{entity}.{field}' has no options")]
    #[diagnostic(
        code(gantry::schema::empty_option_set),
        help("add at least one option, or change the field's data type")
    )]
    EmptyOptionSet { entity: String, field: String },

    #[error(
        "field '{entity}.{field}' has an invalid range: minimum {minimum} exceeds maximum {maximum}"
    )]
    #[diagnostic(code(gantry::schema::invalid_range))]
    InvalidRange {
        entity: String,
        field: String,
        minimum: f64,
        maximum: f64,
    },
}
