//! Typed per-data-type option sets.
//!
//! The schema document carries a `dataType` discriminator next to a
//! `properties` object whose shape depends on the discriminator. Both
//! collapse into a single [`FieldType`] variant here, so templates never
//! inspect an untyped property bag.

use serde::Deserialize;

use crate::EntityId;

/// The data type of a [`Field`](crate::Field), with its valid options inline.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// Primary identifier, engine-managed.
    Id,
    /// Short free text.
    SingleLineText {
        /// Maximum accepted length, unlimited when absent.
        max_length: Option<u32>,
    },
    /// Long free text.
    MultiLineText,
    /// Email address with format validation.
    Email,
    /// Integer value.
    WholeNumber {
        minimum: Option<i64>,
        maximum: Option<i64>,
    },
    /// Floating point value.
    DecimalNumber {
        minimum: Option<f64>,
        maximum: Option<f64>,
        /// Digits after the decimal point.
        precision: Option<u8>,
    },
    Boolean,
    DateTime {
        /// Store and render the date portion only.
        date_only: bool,
    },
    /// Arbitrary JSON payload.
    Json,
    /// Single choice from a fixed option list.
    OptionSet { options: Vec<OptionSetValue> },
    /// Multiple choices from a fixed option list.
    MultiSelectOptionSet { options: Vec<OptionSetValue> },
    /// Relation to another entity in the same schema.
    Lookup {
        related_entity_id: EntityId,
        /// Cardinality: `true` for to-many, `false` for to-one.
        allow_multiple: bool,
    },
    /// Creation timestamp, engine-managed.
    CreatedAt,
    /// Last-update timestamp, engine-managed.
    UpdatedAt,
}

/// One choice in an option set.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OptionSetValue {
    pub label: String,
    pub value: String,
}

impl FieldType {
    /// Decode a `dataType` discriminator and its `properties` object.
    pub(crate) fn from_parts(
        tag: &str,
        properties: serde_json::Value,
    ) -> Result<Self, String> {
        fn props<T>(value: serde_json::Value) -> Result<T, String>
        where
            T: serde::de::DeserializeOwned + Default,
        {
            if value.is_null() {
                return Ok(T::default());
            }
            serde_json::from_value(value).map_err(|e| e.to_string())
        }

        #[derive(Deserialize, Default)]
        #[serde(rename_all = "camelCase", default)]
        struct TextProps {
            max_length: Option<u32>,
        }

        #[derive(Deserialize, Default)]
        #[serde(rename_all = "camelCase", default)]
        struct WholeNumberProps {
            minimum: Option<i64>,
            maximum: Option<i64>,
        }

        #[derive(Deserialize, Default)]
        #[serde(rename_all = "camelCase", default)]
        struct DecimalNumberProps {
            minimum: Option<f64>,
            maximum: Option<f64>,
            precision: Option<u8>,
        }

        #[derive(Deserialize, Default)]
        #[serde(rename_all = "camelCase", default)]
        struct DateTimeProps {
            date_only: bool,
        }

        #[derive(Deserialize, Default)]
        #[serde(rename_all = "camelCase", default)]
        struct OptionSetProps {
            options: Vec<OptionSetValue>,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct LookupProps {
            related_entity_id: EntityId,
            #[serde(default)]
            allow_multiple: bool,
        }

        match tag {
            "id" => Ok(Self::Id),
            "singleLineText" => {
                let p: TextProps = props(properties)?;
                Ok(Self::SingleLineText {
                    max_length: p.max_length,
                })
            }
            "multiLineText" => Ok(Self::MultiLineText),
            "email" => Ok(Self::Email),
            "wholeNumber" => {
                let p: WholeNumberProps = props(properties)?;
                Ok(Self::WholeNumber {
                    minimum: p.minimum,
                    maximum: p.maximum,
                })
            }
            "decimalNumber" => {
                let p: DecimalNumberProps = props(properties)?;
                Ok(Self::DecimalNumber {
                    minimum: p.minimum,
                    maximum: p.maximum,
                    precision: p.precision,
                })
            }
            "boolean" => Ok(Self::Boolean),
            "dateTime" => {
                let p: DateTimeProps = props(properties)?;
                Ok(Self::DateTime {
                    date_only: p.date_only,
                })
            }
            "json" => Ok(Self::Json),
            "optionSet" => {
                let p: OptionSetProps = props(properties)?;
                Ok(Self::OptionSet { options: p.options })
            }
            "multiSelectOptionSet" => {
                let p: OptionSetProps = props(properties)?;
                Ok(Self::MultiSelectOptionSet { options: p.options })
            }
            "lookup" => {
                let p: LookupProps =
                    serde_json::from_value(properties).map_err(|e| e.to_string())?;
                Ok(Self::Lookup {
                    related_entity_id: p.related_entity_id,
                    allow_multiple: p.allow_multiple,
                })
            }
            "createdAt" => Ok(Self::CreatedAt),
            "updatedAt" => Ok(Self::UpdatedAt),
            other => Err(format!("unknown data type '{other}'")),
        }
    }

    /// The `dataType` discriminator this variant corresponds to.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::SingleLineText { .. } => "singleLineText",
            Self::MultiLineText => "multiLineText",
            Self::Email => "email",
            Self::WholeNumber { .. } => "wholeNumber",
            Self::DecimalNumber { .. } => "decimalNumber",
            Self::Boolean => "boolean",
            Self::DateTime { .. } => "dateTime",
            Self::Json => "json",
            Self::OptionSet { .. } => "optionSet",
            Self::MultiSelectOptionSet { .. } => "multiSelectOptionSet",
            Self::Lookup { .. } => "lookup",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }

    /// Returns the related entity id for lookup fields.
    pub fn related_entity(&self) -> Option<&EntityId> {
        match self {
            Self::Lookup {
                related_entity_id, ..
            } => Some(related_entity_id),
            _ => None,
        }
    }

    /// Returns true for fields the engine manages itself (id, timestamps).
    pub fn is_system(&self) -> bool {
        matches!(self, Self::Id | Self::CreatedAt | Self::UpdatedAt)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_text_with_max_length() {
        let ty = FieldType::from_parts("singleLineText", json!({ "maxLength": 80 })).unwrap();
        assert_eq!(
            ty,
            FieldType::SingleLineText {
                max_length: Some(80)
            }
        );
    }

    #[test]
    fn missing_properties_default() {
        let ty = FieldType::from_parts("dateTime", serde_json::Value::Null).unwrap();
        assert_eq!(ty, FieldType::DateTime { date_only: false });
    }

    #[test]
    fn lookup_requires_target() {
        let err = FieldType::from_parts("lookup", json!({})).unwrap_err();
        assert!(err.contains("relatedEntityId"));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = FieldType::from_parts("geoPoint", serde_json::Value::Null).unwrap_err();
        assert!(err.contains("geoPoint"));
    }
}
