//! Schema consistency checks.
//!
//! Validation runs once at load time. Everything downstream relies on the
//! invariants established here: unique entity and field names, relation
//! targets that exist in the same schema, non-empty option sets, sane
//! numeric ranges.

use std::collections::HashSet;

use crate::{FieldType, Schema, SchemaError};

impl Schema {
    pub(crate) fn validate(&self) -> Result<(), SchemaError> {
        let mut entity_names = HashSet::new();
        for entity in &self.entities {
            if !entity_names.insert(entity.name.as_str()) {
                return Err(SchemaError::DuplicateEntity {
                    name: entity.name.clone(),
                });
            }
        }

        for entity in &self.entities {
            let mut field_names = HashSet::new();
            for field in &entity.fields {
                if !field_names.insert(field.name.as_str()) {
                    return Err(SchemaError::DuplicateField {
                        entity: entity.name.clone(),
                        field: field.name.clone(),
                    });
                }

                match &field.data_type {
                    FieldType::Lookup {
                        related_entity_id, ..
                    } => {
                        if self.entity(related_entity_id).is_none() {
                            return Err(SchemaError::UnknownRelationTarget {
                                entity: entity.name.clone(),
                                field: field.name.clone(),
                                target: related_entity_id.to_string(),
                            });
                        }
                    }
                    FieldType::OptionSet { options }
                    | FieldType::MultiSelectOptionSet { options } => {
                        if options.is_empty() {
                            return Err(SchemaError::EmptyOptionSet {
                                entity: entity.name.clone(),
                                field: field.name.clone(),
                            });
                        }
                    }
                    FieldType::WholeNumber {
                        minimum: Some(min),
                        maximum: Some(max),
                    } if min > max => {
                        return Err(SchemaError::InvalidRange {
                            entity: entity.name.clone(),
                            field: field.name.clone(),
                            minimum: *min as f64,
                            maximum: *max as f64,
                        });
                    }
                    FieldType::DecimalNumber {
                        minimum: Some(min),
                        maximum: Some(max),
                        ..
                    } if min > max => {
                        return Err(SchemaError::InvalidRange {
                            entity: entity.name.clone(),
                            field: field.name.clone(),
                            minimum: *min,
                            maximum: *max,
                        });
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Schema, SchemaError};

    fn schema(entities: &str) -> Result<Schema, SchemaError> {
        Schema::from_json_str(&format!(
            r#"{{ "appName": "test", "entities": {entities} }}"#
        ))
    }

    #[test]
    fn rejects_duplicate_entity_names() {
        let err = schema(
            r#"[
                { "id": "e1", "name": "User", "displayName": "User" },
                { "id": "e2", "name": "User", "displayName": "User again" }
            ]"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateEntity { name } if name == "User"));
    }

    #[test]
    fn rejects_duplicate_field_names() {
        let err = schema(
            r#"[{
                "id": "e1", "name": "User", "displayName": "User",
                "fields": [
                    { "id": "f1", "name": "name", "dataType": "singleLineText" },
                    { "id": "f2", "name": "name", "dataType": "email" }
                ]
            }]"#,
        )
        .unwrap_err();
        assert!(
            matches!(err, SchemaError::DuplicateField { entity, field } if entity == "User" && field == "name")
        );
    }

    #[test]
    fn rejects_relation_to_missing_entity() {
        let err = schema(
            r#"[{
                "id": "e1", "name": "Order", "displayName": "Order",
                "fields": [{
                    "id": "f1", "name": "customer", "dataType": "lookup",
                    "properties": { "relatedEntityId": "e-missing" }
                }]
            }]"#,
        )
        .unwrap_err();
        match err {
            SchemaError::UnknownRelationTarget {
                entity,
                field,
                target,
            } => {
                assert_eq!(entity, "Order");
                assert_eq!(field, "customer");
                assert_eq!(target, "e-missing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_empty_option_sets() {
        let err = schema(
            r#"[{
                "id": "e1", "name": "Ticket", "displayName": "Ticket",
                "fields": [{
                    "id": "f1", "name": "status", "dataType": "optionSet",
                    "properties": { "options": [] }
                }]
            }]"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::EmptyOptionSet { .. }));
    }

    #[test]
    fn rejects_inverted_ranges() {
        let err = schema(
            r#"[{
                "id": "e1", "name": "Item", "displayName": "Item",
                "fields": [{
                    "id": "f1", "name": "qty", "dataType": "wholeNumber",
                    "properties": { "minimum": 10, "maximum": 1 }
                }]
            }]"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidRange { .. }));
    }

    #[test]
    fn accepts_relations_within_the_schema() {
        let schema = schema(
            r#"[
                { "id": "e-user", "name": "User", "displayName": "User" },
                {
                    "id": "e-order", "name": "Order", "displayName": "Order",
                    "fields": [{
                        "id": "f1", "name": "customer", "dataType": "lookup",
                        "properties": { "relatedEntityId": "e-user", "allowMultiple": false }
                    }]
                }
            ]"#,
        )
        .unwrap();
        assert_eq!(schema.entities.len(), 2);
    }
}
