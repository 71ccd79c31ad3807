//! Schema document loading.

use std::path::Path;

use serde::Deserialize;

use crate::{Entity, EntityId, SchemaError};

/// A complete, validated entity schema.
///
/// Loading performs validation; a constructed `Schema` is internally
/// consistent and immutable for the rest of the run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Name of the generated application; drives branch naming and the
    /// application module.
    pub app_name: String,
    /// Entities in declaration order. Order is preserved through generation
    /// so output is reproducible for identical input.
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl Schema {
    /// Parse and validate a schema from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, SchemaError> {
        let schema: Schema =
            serde_json::from_str(content).map_err(|source| SchemaError::Parse { source })?;
        schema.validate()?;
        Ok(schema)
    }

    /// Parse and validate a schema from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| &e.id == id)
    }

    pub fn entity_by_name(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_minimal_schema() {
        let schema = Schema::from_json_str(
            r#"{
                "appName": "crm",
                "entities": [
                    {
                        "id": "e-user",
                        "name": "User",
                        "displayName": "User",
                        "fields": [
                            { "id": "f-id", "name": "id", "dataType": "id" },
                            { "id": "f-name", "name": "name", "dataType": "singleLineText" },
                            { "id": "f-email", "name": "email", "dataType": "email", "required": true }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(schema.app_name, "crm");
        assert_eq!(schema.entities.len(), 1);
        assert_eq!(schema.entities[0].fields.len(), 3);
    }

    #[test]
    fn rejects_malformed_documents() {
        let err = Schema::from_json_str("{ \"entities\": [] }").unwrap_err();
        assert!(matches!(err, SchemaError::Parse { .. }));
    }
}
