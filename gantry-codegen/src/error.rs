use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while resolving templates or assembling the module set.
///
/// All are fatal: generation aborts before anything reaches the delivery
/// pipeline.
#[derive(Debug, Error, Diagnostic)]
pub enum GenerateError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Schema(#[from] gantry_schema::SchemaError),

    #[error("two generated modules collide at path '{path}'")]
    #[diagnostic(
        code(gantry::codegen::duplicate_module),
        help("this indicates a template resolution defect; entity names must map to distinct output directories")
    )]
    DuplicateModule { path: String },
}
