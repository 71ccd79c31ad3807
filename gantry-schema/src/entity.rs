//! Entity and field types.
//!
//! These are the read-only inputs to a generation run, supplied by an
//! external entity store as a JSON document. Lifecycle timestamps are
//! metadata only and never reach generated content.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::FieldType;

/// Identifier of an entity within a schema document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a field within its entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entity of the modeled domain.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: EntityId,
    /// Singular PascalCase-able name, e.g. "User".
    pub name: String,
    pub display_name: String,
    /// Plural form; derived from `name` when absent.
    #[serde(default)]
    pub plural_name: Option<String>,
    /// Fields in declaration order. Order is load-bearing: template
    /// resolution and emitted content follow it.
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity {
    /// Plural name, falling back to a naive `-s` suffix.
    pub fn plural(&self) -> String {
        match &self.plural_name {
            Some(plural) => plural.clone(),
            None => format!("{}s", self.name),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Lookup fields in declaration order.
    pub fn relations(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .filter(|f| f.data_type.related_entity().is_some())
    }
}

/// A single field on an entity.
#[derive(Debug, Clone)]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    pub display_name: String,
    pub data_type: FieldType,
    pub required: bool,
    pub searchable: bool,
    pub unique: bool,
    pub description: Option<String>,
}

/// Wire shape of a field: `dataType` discriminator plus a `properties`
/// object whose layout depends on it.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    id: FieldId,
    name: String,
    #[serde(default)]
    display_name: Option<String>,
    data_type: String,
    #[serde(default)]
    properties: serde_json::Value,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    searchable: bool,
    #[serde(default)]
    unique: bool,
    #[serde(default)]
    description: Option<String>,
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawField::deserialize(deserializer)?;
        let data_type = FieldType::from_parts(&raw.data_type, raw.properties)
            .map_err(|e| serde::de::Error::custom(format!("field '{}': {e}", raw.name)))?;
        Ok(Field {
            id: raw.id,
            display_name: raw.display_name.unwrap_or_else(|| raw.name.clone()),
            name: raw.name,
            data_type,
            required: raw.required,
            searchable: raw.searchable,
            unique: raw.unique,
            description: raw.description,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_decodes_data_type_and_properties() {
        let field: Field = serde_json::from_str(
            r#"{
                "id": "f1",
                "name": "email",
                "dataType": "email",
                "required": true,
                "searchable": true
            }"#,
        )
        .unwrap();

        assert_eq!(field.name, "email");
        assert_eq!(field.display_name, "email");
        assert_eq!(field.data_type, FieldType::Email);
        assert!(field.required);
        assert!(!field.unique);
    }

    #[test]
    fn field_with_unknown_data_type_fails_naming_the_field() {
        let err = serde_json::from_str::<Field>(
            r#"{ "id": "f1", "name": "spot", "dataType": "geoPoint" }"#,
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("spot"));
        assert!(message.contains("geoPoint"));
    }

    #[test]
    fn entity_plural_falls_back_to_suffix() {
        let entity: Entity = serde_json::from_str(
            r#"{ "id": "e1", "name": "User", "displayName": "User" }"#,
        )
        .unwrap();
        assert_eq!(entity.plural(), "Users");
    }
}
