//! Field-type to TypeScript mapping.
//!
//! Each schema field maps to a TypeScript property type, a GraphQL type
//! reference, and the class-validator decorators enforcing its options.

use gantry_schema::{Field, FieldType};

/// TypeScript rendering info for one field.
#[derive(Debug, Clone)]
pub struct TsField {
    /// Property type, e.g. `string`, `number`, `"open" | "closed"`.
    pub ts_type: String,
    /// GraphQL type factory body, e.g. `String`, `[String]`, `Date`.
    pub gql_type: String,
    /// class-validator decorator lines, without indentation.
    pub validators: Vec<String>,
    /// Named imports required from "class-validator".
    pub validator_imports: Vec<&'static str>,
}

impl TsField {
    pub fn of(field: &Field) -> Self {
        match &field.data_type {
            FieldType::Id => Self {
                ts_type: "string".into(),
                gql_type: "ID".into(),
                validators: vec!["@IsString()".into()],
                validator_imports: vec!["IsString"],
            },
            FieldType::SingleLineText { max_length } => {
                let mut validators = vec!["@IsString()".to_string()];
                let mut imports = vec!["IsString"];
                if let Some(max) = max_length {
                    validators.push(format!("@MaxLength({max})"));
                    imports.push("MaxLength");
                }
                Self {
                    ts_type: "string".into(),
                    gql_type: "String".into(),
                    validators,
                    validator_imports: imports,
                }
            }
            FieldType::MultiLineText => Self {
                ts_type: "string".into(),
                gql_type: "String".into(),
                validators: vec!["@IsString()".into()],
                validator_imports: vec!["IsString"],
            },
            FieldType::Email => Self {
                ts_type: "string".into(),
                gql_type: "String".into(),
                validators: vec!["@IsEmail()".into()],
                validator_imports: vec!["IsEmail"],
            },
            FieldType::WholeNumber { minimum, maximum } => {
                let mut validators = vec!["@IsInt()".to_string()];
                let mut imports = vec!["IsInt"];
                if let Some(min) = minimum {
                    validators.push(format!("@Min({min})"));
                    imports.push("Min");
                }
                if let Some(max) = maximum {
                    validators.push(format!("@Max({max})"));
                    imports.push("Max");
                }
                Self {
                    ts_type: "number".into(),
                    gql_type: "Int".into(),
                    validators,
                    validator_imports: imports,
                }
            }
            FieldType::DecimalNumber {
                minimum, maximum, ..
            } => {
                let mut validators = vec!["@IsNumber()".to_string()];
                let mut imports = vec!["IsNumber"];
                if let Some(min) = minimum {
                    validators.push(format!("@Min({min})"));
                    imports.push("Min");
                }
                if let Some(max) = maximum {
                    validators.push(format!("@Max({max})"));
                    imports.push("Max");
                }
                Self {
                    ts_type: "number".into(),
                    gql_type: "Float".into(),
                    validators,
                    validator_imports: imports,
                }
            }
            FieldType::Boolean => Self {
                ts_type: "boolean".into(),
                gql_type: "Boolean".into(),
                validators: vec!["@IsBoolean()".into()],
                validator_imports: vec!["IsBoolean"],
            },
            FieldType::DateTime { .. } | FieldType::CreatedAt | FieldType::UpdatedAt => Self {
                ts_type: "Date".into(),
                gql_type: "Date".into(),
                validators: vec!["@IsDate()".into()],
                validator_imports: vec!["IsDate"],
            },
            FieldType::Json => Self {
                ts_type: "unknown".into(),
                gql_type: "GraphQLJSON".into(),
                validators: Vec::new(),
                validator_imports: Vec::new(),
            },
            FieldType::OptionSet { options } => {
                let values: Vec<String> =
                    options.iter().map(|o| format!("\"{}\"", o.value)).collect();
                Self {
                    ts_type: values.join(" | "),
                    gql_type: "String".into(),
                    validators: vec![format!("@IsIn([{}])", values.join(", "))],
                    validator_imports: vec!["IsIn"],
                }
            }
            FieldType::MultiSelectOptionSet { options } => {
                let values: Vec<String> =
                    options.iter().map(|o| format!("\"{}\"", o.value)).collect();
                Self {
                    ts_type: format!("({})[]", values.join(" | ")),
                    gql_type: "[String]".into(),
                    validators: vec![
                        "@IsArray()".to_string(),
                        format!("@IsIn([{}], {{ each: true }})", values.join(", ")),
                    ],
                    validator_imports: vec!["IsArray", "IsIn"],
                }
            }
            // Relations render through their target's DTO types; the
            // emitter substitutes the class name per template.
            FieldType::Lookup { allow_multiple, .. } => Self {
                ts_type: if *allow_multiple {
                    "unknown[]".into()
                } else {
                    "unknown".into()
                },
                gql_type: "GraphQLJSON".into(),
                validators: vec!["@ValidateNested()".into()],
                validator_imports: vec!["ValidateNested"],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use gantry_schema::Field;

    use super::*;

    fn field(json: &str) -> Field {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn bounded_text_gets_max_length() {
        let f = field(
            r#"{ "id": "f", "name": "title", "dataType": "singleLineText",
                 "properties": { "maxLength": 120 } }"#,
        );
        let ts = TsField::of(&f);
        assert_eq!(ts.ts_type, "string");
        assert!(ts.validators.contains(&"@MaxLength(120)".to_string()));
    }

    #[test]
    fn option_set_renders_a_literal_union() {
        let f = field(
            r#"{ "id": "f", "name": "status", "dataType": "optionSet",
                 "properties": { "options": [
                    { "label": "Open", "value": "open" },
                    { "label": "Closed", "value": "closed" }
                 ] } }"#,
        );
        let ts = TsField::of(&f);
        assert_eq!(ts.ts_type, "\"open\" | \"closed\"");
        assert_eq!(ts.validators, vec!["@IsIn([\"open\", \"closed\"])"]);
    }

    #[test]
    fn whole_number_bounds_become_min_max() {
        let f = field(
            r#"{ "id": "f", "name": "qty", "dataType": "wholeNumber",
                 "properties": { "minimum": 1, "maximum": 99 } }"#,
        );
        let ts = TsField::of(&f);
        assert_eq!(ts.gql_type, "Int");
        assert!(ts.validators.contains(&"@Min(1)".to_string()));
        assert!(ts.validators.contains(&"@Max(99)".to_string()));
    }
}
