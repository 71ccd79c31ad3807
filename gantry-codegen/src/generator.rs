//! Generation entry points.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use rayon::prelude::*;

use gantry_schema::Schema;

use crate::{emit, resolve, static_modules, GenerateError, Module, ModuleSet, ModuleSetBuilder, Provenance};

/// Generate the full module set for a schema.
///
/// Emission fans out per entity; nothing shared is written during emission,
/// so entities render in parallel. The builder merge is the single
/// serialization point: duplicate path detection needs one consistent view
/// of every path.
pub fn generate(schema: &Schema) -> Result<ModuleSet, GenerateError> {
    generate_with_overrides(schema, Vec::new())
}

/// Generate, then merge hand-authored modules over the generated set.
///
/// Merged modules replace generated content at the same path; this is the
/// only sanctioned way a later write wins.
pub fn generate_with_overrides(
    schema: &Schema,
    overrides: Vec<Module>,
) -> Result<ModuleSet, GenerateError> {
    let per_entity: Vec<Vec<Module>> = schema
        .entities
        .par_iter()
        .map(|entity| {
            let templates = resolve(schema, entity)?;
            templates
                .iter()
                .map(|kind| emit(schema, entity, kind))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<_, _>>()?;

    let mut builder = ModuleSetBuilder::new();
    for modules in per_entity {
        for module in modules {
            builder.insert(module)?;
        }
    }
    for module in static_modules(schema) {
        builder.insert(module)?;
    }
    for module in overrides {
        builder.merge(module);
    }

    Ok(builder.finish(schema))
}

/// Memoizes module sets by schema fingerprint.
///
/// Generation is deterministic, so a repeated run over an unchanged schema
/// can reuse the previous module set instead of recomputing it.
#[derive(Debug, Default)]
pub struct GenerationCache {
    sets: std::collections::HashMap<gantry_schema::Fingerprint, ModuleSet>,
}

impl GenerationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_generate(&mut self, schema: &Schema) -> Result<&ModuleSet, GenerateError> {
        let fingerprint = schema.fingerprint();
        if !self.sets.contains_key(&fingerprint) {
            let set = generate(schema)?;
            self.sets.insert(fingerprint, set);
        }
        Ok(&self.sets[&fingerprint])
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Result of writing a module set to disk.
#[derive(Debug, Default)]
pub struct WriteSummary {
    /// Paths written this run.
    pub written: Vec<String>,
    /// Override paths left untouched because a file already existed.
    pub skipped: Vec<String>,
    /// Paths removed because their module carried no content.
    pub removed: Vec<String>,
}

/// Write a module set into a local directory.
///
/// Base modules always overwrite; override modules are only created when
/// missing, mirroring how the delivery pipeline treats the remote tree.
pub fn write_to_dir(set: &ModuleSet, dir: &Path) -> Result<WriteSummary> {
    let mut summary = WriteSummary::default();

    for module in set.iter() {
        let path = dir.join(&module.path);
        match (&module.content, module.provenance) {
            (Some(content), Provenance::Base) => {
                write_file(&path, content)?;
                summary.written.push(module.path.clone());
            }
            (Some(content), Provenance::Override) => {
                if path.exists() {
                    summary.skipped.push(module.path.clone());
                } else {
                    write_file(&path, content)?;
                    summary.written.push(module.path.clone());
                }
            }
            (None, _) => {
                if path.exists() {
                    std::fs::remove_file(&path)
                        .wrap_err_with(|| format!("failed to remove {}", path.display()))?;
                    summary.removed.push(module.path.clone());
                }
            }
        }
    }

    Ok(summary)
}

fn write_file(path: &PathBuf, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use gantry_schema::Schema;
    use tempfile::TempDir;

    use super::*;

    fn user_schema() -> Schema {
        Schema::from_json_str(
            r#"{
                "appName": "crm",
                "entities": [{
                    "id": "e-user", "name": "User", "displayName": "User",
                    "fields": [
                        { "id": "f1", "name": "id", "dataType": "id" },
                        { "id": "f2", "name": "name", "dataType": "singleLineText" },
                        { "id": "f3", "name": "email", "dataType": "email", "required": true }
                    ]
                }]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn generates_base_modules_at_deterministic_paths() {
        let set = generate(&user_schema()).unwrap();

        for path in [
            "user/base/user.controller.base.ts",
            "user/base/user.service.base.ts",
            "user/user.module.ts",
            "user/base/User.ts",
            "health/base/health.controller.base.ts",
            "app.module.ts",
        ] {
            assert!(set.get(path).is_some(), "missing module at {path}");
        }

        assert!(set.get("user/base/user.service.base.ts").unwrap().is_base());
        assert!(set.get("user/user.service.ts").unwrap().is_override());
    }

    #[test]
    fn generating_twice_is_byte_identical() {
        let schema = user_schema();
        let a = generate(&schema).unwrap();
        let b = generate(&schema).unwrap();

        assert_eq!(a.len(), b.len());
        assert_eq!(a.fingerprint, b.fingerprint);
        for (left, right) in a.iter().zip(b.iter()) {
            assert_eq!(left, right);
        }
    }

    #[test]
    fn hand_authored_override_merge_wins() {
        let schema = user_schema();
        let set = generate_with_overrides(
            &schema,
            vec![Module::base("app.module.ts", "// pinned by hand\n")],
        )
        .unwrap();

        assert_eq!(
            set.get("app.module.ts").unwrap().content.as_deref(),
            Some("// pinned by hand\n")
        );
    }

    #[test]
    fn write_preserves_existing_override_files() {
        let schema = user_schema();
        let set = generate(&schema).unwrap();
        let dir = TempDir::new().unwrap();

        let first = write_to_dir(&set, dir.path()).unwrap();
        assert!(first.skipped.is_empty());

        let service_path = dir.path().join("user/user.service.ts");
        std::fs::write(&service_path, "// edited by hand\n").unwrap();

        let second = write_to_dir(&set, dir.path()).unwrap();
        assert!(second
            .skipped
            .contains(&"user/user.service.ts".to_string()));
        assert_eq!(
            std::fs::read_to_string(&service_path).unwrap(),
            "// edited by hand\n"
        );
    }

    #[test]
    fn cache_reuses_sets_for_unchanged_schemas() {
        let schema = user_schema();
        let mut cache = GenerationCache::new();

        let first_len = cache.get_or_generate(&schema).unwrap().len();
        let second_len = cache.get_or_generate(&schema).unwrap().len();

        assert_eq!(first_len, second_len);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn relation_targets_outside_the_schema_fail_resolution() {
        use gantry_schema::{Entity, EntityId, Field, FieldId, FieldType};

        // Assembled by hand to bypass load-time validation.
        let user = Entity {
            id: EntityId::new("e-user"),
            name: "User".into(),
            display_name: "User".into(),
            plural_name: None,
            fields: vec![Field {
                id: FieldId::new("f1"),
                name: "org".into(),
                display_name: "org".into(),
                data_type: FieldType::Lookup {
                    related_entity_id: EntityId::new("e-missing"),
                    allow_multiple: false,
                },
                required: false,
                searchable: false,
                unique: false,
                description: None,
            }],
            created_at: None,
            updated_at: None,
        };
        let schema = Schema {
            app_name: "crm".into(),
            entities: vec![user],
        };

        let err = generate(&schema).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Schema(gantry_schema::SchemaError::UnknownRelationTarget { .. })
        ));
    }
}
