//! Content-addressable schema identity.
//!
//! The fingerprint is a sha256 over everything generated output depends on:
//! names, data types and their options, flags, declaration order. Entity and
//! field ids, lifecycle timestamps, and display names of relation targets are
//! resolved or excluded so that two schemas producing the same output hash
//! the same.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::{FieldType, Schema};

/// Stable hash of a schema's generation-relevant content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// First eight hex characters; used in derived branch names.
    pub fn short(&self) -> String {
        self.to_hex()[..8].to_string()
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Schema {
    /// Compute the schema's content fingerprint.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = Sha256::new();
        write_str(&mut hasher, &self.app_name);

        for entity in &self.entities {
            write_str(&mut hasher, "entity");
            write_str(&mut hasher, &entity.name);
            write_str(&mut hasher, &entity.display_name);
            write_str(&mut hasher, &entity.plural());

            for field in &entity.fields {
                write_str(&mut hasher, "field");
                write_str(&mut hasher, &field.name);
                write_str(&mut hasher, &field.display_name);
                write_flags(&mut hasher, field.required, field.searchable, field.unique);
                write_str(&mut hasher, field.description.as_deref().unwrap_or(""));
                self.write_type(&mut hasher, &field.data_type);
            }
        }

        Fingerprint(hasher.finalize().into())
    }

    fn write_type(&self, hasher: &mut Sha256, ty: &FieldType) {
        write_str(hasher, ty.name());
        match ty {
            FieldType::SingleLineText { max_length } => {
                write_opt_num(hasher, max_length.map(|v| v as f64));
            }
            FieldType::WholeNumber { minimum, maximum } => {
                write_opt_num(hasher, minimum.map(|v| v as f64));
                write_opt_num(hasher, maximum.map(|v| v as f64));
            }
            FieldType::DecimalNumber {
                minimum,
                maximum,
                precision,
            } => {
                write_opt_num(hasher, *minimum);
                write_opt_num(hasher, *maximum);
                write_opt_num(hasher, precision.map(|v| v as f64));
            }
            FieldType::DateTime { date_only } => {
                write_flags(hasher, *date_only, false, false);
            }
            FieldType::OptionSet { options } | FieldType::MultiSelectOptionSet { options } => {
                for option in options {
                    write_str(hasher, &option.label);
                    write_str(hasher, &option.value);
                }
            }
            FieldType::Lookup {
                related_entity_id,
                allow_multiple,
            } => {
                // Hash the resolved target name, not its id: re-imported
                // schemas keep their fingerprint as long as output would
                // not change.
                let target = self
                    .entity(related_entity_id)
                    .map(|e| e.name.as_str())
                    .unwrap_or_else(|| related_entity_id.as_str());
                write_str(hasher, target);
                write_flags(hasher, *allow_multiple, false, false);
            }
            _ => {}
        }
    }
}

fn write_str(hasher: &mut Sha256, s: &str) {
    hasher.update((s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

fn write_opt_num(hasher: &mut Sha256, value: Option<f64>) {
    match value {
        Some(v) => {
            hasher.update([1u8]);
            hasher.update(v.to_le_bytes());
        }
        None => hasher.update([0u8]),
    }
}

fn write_flags(hasher: &mut Sha256, a: bool, b: bool, c: bool) {
    hasher.update([u8::from(a) | (u8::from(b) << 1) | (u8::from(c) << 2)]);
}

#[cfg(test)]
mod tests {
    use crate::Schema;

    const BASE: &str = r#"{
        "appName": "crm",
        "entities": [{
            "id": "e1", "name": "User", "displayName": "User",
            "createdAt": "2024-01-01T00:00:00Z",
            "fields": [
                { "id": "f1", "name": "id", "dataType": "id" },
                { "id": "f2", "name": "email", "dataType": "email", "required": true }
            ]
        }]
    }"#;

    #[test]
    fn identical_schemas_share_a_fingerprint() {
        let a = Schema::from_json_str(BASE).unwrap();
        let b = Schema::from_json_str(BASE).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn timestamps_and_ids_do_not_affect_the_fingerprint() {
        let relabeled = BASE
            .replace("2024-01-01", "2025-06-30")
            .replace("\"e1\"", "\"e-other\"")
            .replace("\"f1\"", "\"f-other\"");
        let a = Schema::from_json_str(BASE).unwrap();
        let b = Schema::from_json_str(&relabeled).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn renaming_a_field_changes_the_fingerprint() {
        let renamed = BASE.replace("\"name\": \"email\"", "\"name\": \"contact\"");
        let a = Schema::from_json_str(BASE).unwrap();
        let b = Schema::from_json_str(&renamed).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn short_form_is_eight_hex_chars() {
        let schema = Schema::from_json_str(BASE).unwrap();
        let short = schema.fingerprint().short();
        assert_eq!(short.len(), 8);
        assert!(short.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
